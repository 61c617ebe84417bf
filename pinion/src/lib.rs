//! # pinion
//!
//! A bitboard-based chess move generation library: board representation, pseudo-legal
//! move generation with a do/undo legality filter, and a perft harness to verify it all.
//!
//! The entry point is [`Position`]: build one from a [`Setup`], generate moves with
//! [`movegen::generate`] or [`movegen::legal_moves`], and apply them with
//! [`Position::do_move`] / [`Position::undo_move`].
//!
//! ```
//! use pinion::{movegen, Position};
//!
//! let mut pos = Position::initial();
//! let moves = movegen::legal_moves(&pos);
//! assert_eq!(moves.len(), 20);
//! let undo = pos.do_move(moves[0]);
//! pos.undo_move(moves[0], undo);
//! assert_eq!(pos, Position::initial());
//! ```

pub mod attack;
pub mod castling;
pub mod movegen;
pub mod moves;
pub mod perft;
pub mod position;

pub use pinion_base::bitboard::Bitboard;
pub use pinion_base::types::{
    CastlingRights, CastlingSide, Color, File, Piece, PieceKind, Rank, Square,
};
pub use pinion_base::{bitboard_consts, geometry};

pub use moves::{Move, PromotePiece, Undo};
pub use perft::perft;
pub use position::{Board, Position, PrettyStyle, Setup, ValidateError};
