//! Board geometry facts that depend on side to move.

use crate::types::{Color, Rank};

/// Rank on which castling happens for the given side.
#[inline]
pub const fn castling_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    }
}

/// Rank from which the given side's pawns may make a double advance.
#[inline]
pub const fn double_move_src_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
    }
}

/// Rank on which the given side's pawns land after a double advance.
#[inline]
pub const fn double_move_dst_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R4,
        Color::Black => Rank::R5,
    }
}

/// Rank on which the given side's pawns promote.
#[inline]
pub const fn promote_dst_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R8,
        Color::Black => Rank::R1,
    }
}

/// Rank of a valid en passant target square when the given side is to move.
///
/// The target is the square skipped by the opponent's double advance, so it lies on
/// the opponent's third rank.
#[inline]
pub const fn enpassant_dst_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R6,
        Color::Black => Rank::R3,
    }
}

/// Square index delta of a single pawn advance for the given side.
#[inline]
pub const fn pawn_forward_delta(c: Color) -> isize {
    match c {
        Color::White => 8,
        Color::Black => -8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Square};

    #[test]
    fn test_ranks() {
        assert_eq!(castling_rank(Color::White), Rank::R1);
        assert_eq!(castling_rank(Color::Black), Rank::R8);
        assert_eq!(double_move_src_rank(Color::White), Rank::R2);
        assert_eq!(double_move_dst_rank(Color::Black), Rank::R5);
        assert_eq!(promote_dst_rank(Color::White), Rank::R8);
        assert_eq!(enpassant_dst_rank(Color::Black), Rank::R3);
    }

    #[test]
    fn test_forward_delta() {
        let e2 = Square::from_parts(File::E, Rank::R2);
        let e3 = Square::from_parts(File::E, Rank::R3);
        assert_eq!(e2.add(pawn_forward_delta(Color::White)), e3);
        assert_eq!(e3.add(pawn_forward_delta(Color::Black)), e2);
    }
}
