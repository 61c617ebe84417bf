//! Attack bitboards for all piece kinds.
//!
//! Leaper attacks (pawn, knight, king) are plain table lookups. Slider attacks (bishop,
//! rook, queen) use the classical ray approach: for each direction we store the full ray
//! from every square, find the nearest blocker on it in the occupancy, and cut off the
//! part of the ray hidden behind that blocker.
//!
//! All tables are built once on first use and never change afterwards.

use lazy_static::lazy_static;
use pinion_base::bitboard::Bitboard;
use pinion_base::bitboard_consts;
use pinion_base::types::{Color, File, PieceKind, Square};

/// Ray directions, split into those that increase the square index and those that
/// decrease it. The nearest blocker on an increasing ray is the lowest set bit, and on a
/// decreasing ray the highest one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(usize)]
enum Direction {
    East = 0,
    North = 1,
    NorthEast = 2,
    NorthWest = 3,
    West = 4,
    South = 5,
    SouthWest = 6,
    SouthEast = 7,
}

const DIRECTION_COUNT: usize = 8;

impl Direction {
    const fn offsets(self) -> (isize, isize) {
        match self {
            Direction::East => (1, 0),
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::SouthEast => (1, -1),
        }
    }

    const fn is_increasing(self) -> bool {
        (self as usize) < 4
    }
}

const BISHOP_DIRECTIONS: [Direction; 4] = [
    Direction::NorthEast,
    Direction::NorthWest,
    Direction::SouthWest,
    Direction::SouthEast,
];

const ROOK_DIRECTIONS: [Direction; 4] = [
    Direction::East,
    Direction::North,
    Direction::West,
    Direction::South,
];

struct Tables {
    king: [Bitboard; 64],
    knight: [Bitboard; 64],
    pawn: [[Bitboard; 64]; 2],
    rays: [[Bitboard; 64]; DIRECTION_COUNT],
}

/// Shifts a bitboard by the given file and rank offsets. File-exclusion masks are
/// applied before each horizontal step, so nothing wraps between the a- and h-files;
/// vertical steps just fall off the ends of the u64.
fn shifted(bb: Bitboard, (delta_file, delta_rank): (isize, isize)) -> Bitboard {
    let mut res = bb;
    let mut df = delta_file;
    while df > 0 {
        res = (res & !bitboard_consts::file(File::H)).shl(1);
        df -= 1;
    }
    while df < 0 {
        res = (res & !bitboard_consts::file(File::A)).shr(1);
        df += 1;
    }
    if delta_rank >= 0 {
        res.shl((delta_rank * 8) as usize)
    } else {
        res.shr((-delta_rank * 8) as usize)
    }
}

fn leaper_table(offsets: &[(isize, isize)]) -> [Bitboard; 64] {
    let mut res = [Bitboard::EMPTY; 64];
    for sq in Square::iter() {
        for &off in offsets {
            res[sq.index()] |= shifted(Bitboard::from_square(sq), off);
        }
    }
    res
}

fn ray_table(dir: Direction) -> [Bitboard; 64] {
    let (df, dr) = dir.offsets();
    let mut res = [Bitboard::EMPTY; 64];
    for sq in Square::iter() {
        let mut cur = sq;
        while let Some(next) = cur.try_shift(df, dr) {
            res[sq.index()].set(next);
            cur = next;
        }
    }
    res
}

impl Tables {
    fn build() -> Tables {
        let mut rays = [[Bitboard::EMPTY; 64]; DIRECTION_COUNT];
        for dir in [
            Direction::East,
            Direction::North,
            Direction::NorthEast,
            Direction::NorthWest,
            Direction::West,
            Direction::South,
            Direction::SouthWest,
            Direction::SouthEast,
        ] {
            rays[dir as usize] = ray_table(dir);
        }
        Tables {
            king: leaper_table(&[
                (-1, -1),
                (-1, 0),
                (-1, 1),
                (0, -1),
                (0, 1),
                (1, -1),
                (1, 0),
                (1, 1),
            ]),
            knight: leaper_table(&[
                (-2, -1),
                (-2, 1),
                (-1, -2),
                (-1, 2),
                (1, -2),
                (1, 2),
                (2, -1),
                (2, 1),
            ]),
            pawn: [
                leaper_table(&[(-1, 1), (1, 1)]),
                leaper_table(&[(-1, -1), (1, -1)]),
            ],
            rays,
        }
    }

    fn ray_attack(&self, dir: Direction, sq: Square, occupied: Bitboard) -> Bitboard {
        let ray = self.rays[dir as usize][sq.index()];
        let blockers = ray & occupied;
        if blockers.is_empty() {
            return ray;
        }
        let nearest = if dir.is_increasing() {
            blockers.first()
        } else {
            blockers.last()
        };
        ray ^ self.rays[dir as usize][nearest.index()]
    }
}

lazy_static! {
    static ref TABLES: Tables = Tables::build();
}

/// Squares attacked by a pawn of color `c` standing on `sq`.
///
/// This is the pair of forward diagonals only. Pawn advances are not attacks and are
/// handled separately by the move generator.
#[inline]
pub fn pawn(c: Color, sq: Square) -> Bitboard {
    TABLES.pawn[c.index()][sq.index()]
}

#[inline]
pub fn king(sq: Square) -> Bitboard {
    TABLES.king[sq.index()]
}

#[inline]
pub fn knight(sq: Square) -> Bitboard {
    TABLES.knight[sq.index()]
}

/// Squares attacked by a bishop on `sq`, given the full occupancy of the board.
///
/// The nearest occupied square on each ray is included in the result regardless of the
/// color of the piece standing there.
pub fn bishop(sq: Square, occupied: Bitboard) -> Bitboard {
    let t = &*TABLES;
    BISHOP_DIRECTIONS
        .iter()
        .fold(Bitboard::EMPTY, |acc, &dir| {
            acc | t.ray_attack(dir, sq, occupied)
        })
}

/// Squares attacked by a rook on `sq`, given the full occupancy of the board.
pub fn rook(sq: Square, occupied: Bitboard) -> Bitboard {
    let t = &*TABLES;
    ROOK_DIRECTIONS.iter().fold(Bitboard::EMPTY, |acc, &dir| {
        acc | t.ray_attack(dir, sq, occupied)
    })
}

/// Squares attacked by a queen on `sq`, given the full occupancy of the board.
pub fn queen(sq: Square, occupied: Bitboard) -> Bitboard {
    bishop(sq, occupied) | rook(sq, occupied)
}

/// Squares attacked by a piece of the given kind and color on `sq`. Only pawns care
/// about the color.
pub fn piece(kind: PieceKind, c: Color, sq: Square, occupied: Bitboard) -> Bitboard {
    match kind {
        PieceKind::Pawn => pawn(c, sq),
        PieceKind::Knight => knight(sq),
        PieceKind::Bishop => bishop(sq, occupied),
        PieceKind::Rook => rook(sq, occupied),
        PieceKind::Queen => queen(sq, occupied),
        PieceKind::King => king(sq),
    }
}
