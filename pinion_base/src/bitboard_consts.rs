use crate::bitboard::Bitboard;
use crate::types::{File, Rank};

pub const RANKS: [Bitboard; 8] = [
    Bitboard::from_raw(0x0000_0000_0000_00ff),
    Bitboard::from_raw(0x0000_0000_0000_ff00),
    Bitboard::from_raw(0x0000_0000_00ff_0000),
    Bitboard::from_raw(0x0000_0000_ff00_0000),
    Bitboard::from_raw(0x0000_00ff_0000_0000),
    Bitboard::from_raw(0x0000_ff00_0000_0000),
    Bitboard::from_raw(0x00ff_0000_0000_0000),
    Bitboard::from_raw(0xff00_0000_0000_0000),
];

pub const FILES: [Bitboard; 8] = [
    Bitboard::from_raw(0x0101_0101_0101_0101),
    Bitboard::from_raw(0x0202_0202_0202_0202),
    Bitboard::from_raw(0x0404_0404_0404_0404),
    Bitboard::from_raw(0x0808_0808_0808_0808),
    Bitboard::from_raw(0x1010_1010_1010_1010),
    Bitboard::from_raw(0x2020_2020_2020_2020),
    Bitboard::from_raw(0x4040_4040_4040_4040),
    Bitboard::from_raw(0x8080_8080_8080_8080),
];

#[inline]
pub const fn rank(r: Rank) -> Bitboard {
    RANKS[r.index()]
}

#[inline]
pub const fn file(f: File) -> Bitboard {
    FILES[f.index()]
}
