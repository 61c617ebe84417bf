//! Square and mask constants for castling.
//!
//! Everything here is given for White and shifted up by 56 bits for Black, as both sides
//! castle on their own back rank with the same file layout.

use pinion_base::bitboard::Bitboard;
use pinion_base::types::{CastlingSide, Color, File, Square};

const fn offset(c: Color) -> usize {
    match c {
        Color::White => 0,
        Color::Black => 56,
    }
}

/// Squares that must be empty for the given castling to be available.
pub const fn pass(c: Color, s: CastlingSide) -> Bitboard {
    match s {
        // b1, c1, d1
        CastlingSide::Queen => Bitboard::from_raw(0x0e << offset(c)),
        // f1, g1
        CastlingSide::King => Bitboard::from_raw(0x60 << offset(c)),
    }
}

/// Squares the king occupies or crosses during the given castling, including its source
/// and destination. None of them may be attacked by the opponent.
pub const fn king_pass(c: Color, s: CastlingSide) -> Bitboard {
    match s {
        // c1, d1, e1
        CastlingSide::Queen => Bitboard::from_raw(0x1c << offset(c)),
        // e1, f1, g1
        CastlingSide::King => Bitboard::from_raw(0x70 << offset(c)),
    }
}

/// Initial king and rook squares for the given castling. A move that touches any of these
/// squares invalidates the corresponding castling right.
pub const fn srcs(c: Color, s: CastlingSide) -> Bitboard {
    match s {
        // a1, e1
        CastlingSide::Queen => Bitboard::from_raw(0x11 << offset(c)),
        // e1, h1
        CastlingSide::King => Bitboard::from_raw(0x90 << offset(c)),
    }
}

/// Union of [`srcs`] over all four castling rights.
pub const ALL_SRCS: Bitboard = Bitboard::from_raw(
    srcs(Color::White, CastlingSide::Queen).as_raw()
        | srcs(Color::White, CastlingSide::King).as_raw()
        | srcs(Color::Black, CastlingSide::Queen).as_raw()
        | srcs(Color::Black, CastlingSide::King).as_raw(),
);

pub const fn king_src(c: Color) -> Square {
    Square::from_parts(File::E, pinion_base::geometry::castling_rank(c))
}

pub const fn king_dst(c: Color, s: CastlingSide) -> Square {
    let file = match s {
        CastlingSide::Queen => File::C,
        CastlingSide::King => File::G,
    };
    Square::from_parts(file, pinion_base::geometry::castling_rank(c))
}

pub const fn rook_src(c: Color, s: CastlingSide) -> Square {
    let file = match s {
        CastlingSide::Queen => File::A,
        CastlingSide::King => File::H,
    };
    Square::from_parts(file, pinion_base::geometry::castling_rank(c))
}

pub const fn rook_dst(c: Color, s: CastlingSide) -> Square {
    let file = match s {
        CastlingSide::Queen => File::D,
        CastlingSide::King => File::F,
    };
    Square::from_parts(file, pinion_base::geometry::castling_rank(c))
}
