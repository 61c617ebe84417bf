//! # Base types for pinion
//!
//! This is an auxiliary crate for `pinion`, which contains the core value types: squares,
//! colors, pieces, castling rights and bitboards. Everything declared here is a plain value
//! with no dependency on the rest of the engine.
//!
//! Normally you don't want to use this crate directly. Use `pinion` instead.

pub mod bitboard;
pub mod bitboard_consts;
pub mod geometry;
pub mod types;
