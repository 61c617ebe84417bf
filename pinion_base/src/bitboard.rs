use crate::types::Square;
use derive_more::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};
use std::fmt;
use std::iter::IntoIterator;

/// Set of squares, represented as a 64-bit mask.
///
/// Bit `i` corresponds to the square with index `i` (a1 is bit 0, h8 is bit 63).
#[derive(
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct Bitboard(u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const FULL: Bitboard = Bitboard(u64::MAX);

    pub const fn from_raw(val: u64) -> Bitboard {
        Bitboard(val)
    }

    pub const fn from_square(sq: Square) -> Bitboard {
        Bitboard(1_u64 << sq.index())
    }

    pub const fn with(self, sq: Square) -> Bitboard {
        Bitboard(self.0 | (1_u64 << sq.index()))
    }

    pub const fn without(self, sq: Square) -> Bitboard {
        Bitboard(self.0 & !(1_u64 << sq.index()))
    }

    pub const fn shl(self, by: usize) -> Bitboard {
        Bitboard(self.0 << by)
    }

    pub const fn shr(self, by: usize) -> Bitboard {
        Bitboard(self.0 >> by)
    }

    pub fn set(&mut self, sq: Square) {
        *self = self.with(sq);
    }

    pub fn unset(&mut self, sq: Square) {
        *self = self.without(sq);
    }

    pub const fn has(&self, sq: Square) -> bool {
        ((self.0 >> sq.index()) & 1) != 0
    }

    pub const fn as_raw(&self) -> u64 {
        self.0
    }

    pub const fn popcount(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }

    /// Returns the square with the lowest index in the set.
    ///
    /// # Panics
    ///
    /// Panics if the bitboard is empty.
    pub fn first(&self) -> Square {
        assert!(self.0 != 0, "first() called on an empty bitboard");
        unsafe { Square::from_index_unchecked(self.0.trailing_zeros() as usize) }
    }

    /// Returns the square with the highest index in the set.
    ///
    /// # Panics
    ///
    /// Panics if the bitboard is empty.
    pub fn last(&self) -> Square {
        assert!(self.0 != 0, "last() called on an empty bitboard");
        unsafe { Square::from_index_unchecked(63 - self.0.leading_zeros() as usize) }
    }
}

impl From<Bitboard> for u64 {
    fn from(b: Bitboard) -> u64 {
        b.0
    }
}

impl From<u64> for Bitboard {
    fn from(u: u64) -> Bitboard {
        Bitboard(u)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Bitboard({})", self)
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        // Ranks are printed from the 8th down to the 1st, files from a to h.
        let v = self.0;
        write!(
            f,
            "{:08b}/{:08b}/{:08b}/{:08b}/{:08b}/{:08b}/{:08b}/{:08b}",
            ((v >> 56) & 0xff).reverse_bits() >> 56,
            ((v >> 48) & 0xff).reverse_bits() >> 56,
            ((v >> 40) & 0xff).reverse_bits() >> 56,
            ((v >> 32) & 0xff).reverse_bits() >> 56,
            ((v >> 24) & 0xff).reverse_bits() >> 56,
            ((v >> 16) & 0xff).reverse_bits() >> 56,
            ((v >> 8) & 0xff).reverse_bits() >> 56,
            (v & 0xff).reverse_bits() >> 56,
        )
    }
}

/// Iterator over the squares of a bitboard, in ascending index order.
pub struct Iter(u64);

impl Iterator for Iter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros();
        self.0 &= self.0.wrapping_sub(1_u64);
        unsafe { Some(Square::from_index_unchecked(bit as usize)) }
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        Iter(self.0)
    }
}
