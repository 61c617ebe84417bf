//! Board and position representation.
//!
//! [`Board`] is the pure piece placement: twelve per-piece bitboards plus cached
//! per-color and occupancy masks. [`Setup`] is a freely editable aggregate of placement
//! and game state, and [`Position`] is a `Setup` that passed validation. All move
//! generation APIs work on `Position` only, so the invariants checked at validation time
//! hold whenever moves are generated or applied.

use crate::movegen;
use pinion_base::bitboard::Bitboard;
use pinion_base::geometry;
use pinion_base::types::{CastlingRights, CastlingSide, Color, File, Piece, PieceKind, Rank, Square};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ValidateError {
    #[error("no king of color {0}")]
    NoKing(Color),
    #[error("more than one king of color {0}")]
    TooManyKings(Color),
    #[error("more than 16 pieces of color {0}")]
    TooManyPieces(Color),
    #[error("pawn on rank {0}")]
    InvalidPawnRank(Rank),
    #[error("invalid en passant target {0}")]
    InvalidEnpassant(Square),
    #[error("castling rights {0} without king and rook on their home squares")]
    InvalidCastling(CastlingRights),
    #[error("king of the side not to move is attacked")]
    OpponentKingAttacked,
}

/// Piece placement as a set of disjoint bitboards.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Board {
    pieces: [Bitboard; Piece::COUNT],
    colors: [Bitboard; 2],
    all: Bitboard,
}

impl Board {
    pub const EMPTY: Board = Board {
        pieces: [Bitboard::EMPTY; Piece::COUNT],
        colors: [Bitboard::EMPTY; 2],
        all: Bitboard::EMPTY,
    };

    /// Mask of squares occupied by the given piece.
    #[inline]
    pub const fn piece(&self, p: Piece) -> Bitboard {
        self.pieces[p.index()]
    }

    /// Mask of squares occupied by pieces of kind `kind` and color `c`.
    #[inline]
    pub const fn piece2(&self, c: Color, kind: PieceKind) -> Bitboard {
        self.pieces[Piece::from_parts(c, kind).index()]
    }

    /// Mask of squares occupied by pieces of color `c`.
    #[inline]
    pub const fn color(&self, c: Color) -> Bitboard {
        self.colors[c.index()]
    }

    /// Mask of all occupied squares.
    #[inline]
    pub const fn occupied(&self) -> Bitboard {
        self.all
    }

    /// Returns the piece standing on `sq`, if any.
    ///
    /// There is no mailbox array, so this scans the twelve piece masks. It is meant for
    /// setup, display and move application, not for hot inner loops.
    pub fn get(&self, sq: Square) -> Option<Piece> {
        if !self.all.has(sq) {
            return None;
        }
        Piece::iter().find(|p| self.pieces[p.index()].has(sq))
    }

    /// Puts `piece` on `sq`, removing whatever piece was there before.
    pub fn put(&mut self, sq: Square, piece: Piece) {
        self.remove(sq);
        self.pieces[piece.index()].set(sq);
        self.colors[piece.color().index()].set(sq);
        self.all.set(sq);
    }

    /// Removes and returns the piece on `sq`, if any.
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.get(sq)?;
        self.pieces[piece.index()].unset(sq);
        self.colors[piece.color().index()].unset(sq);
        self.all.unset(sq);
        Some(piece)
    }
}

/// Raw position state with no invariants attached.
///
/// All fields are public and freely editable. Convert to [`Position`] via `TryFrom` to
/// actually use it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Setup {
    pub board: Board,
    pub side: Color,
    pub castling: CastlingRights,
    pub ep_target: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Setup {
    pub fn empty() -> Setup {
        Setup {
            board: Board::EMPTY,
            side: Color::White,
            castling: CastlingRights::EMPTY,
            ep_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// The standard chess starting position.
    pub fn initial() -> Setup {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = Board::EMPTY;
        for (file, &kind) in File::iter().zip(BACK_RANK.iter()) {
            board.put(
                Square::from_parts(file, Rank::R1),
                Piece::from_parts(Color::White, kind),
            );
            board.put(
                Square::from_parts(file, Rank::R2),
                Piece::from_parts(Color::White, PieceKind::Pawn),
            );
            board.put(
                Square::from_parts(file, Rank::R7),
                Piece::from_parts(Color::Black, PieceKind::Pawn),
            );
            board.put(
                Square::from_parts(file, Rank::R8),
                Piece::from_parts(Color::Black, kind),
            );
        }
        Setup {
            board,
            side: Color::White,
            castling: CastlingRights::FULL,
            ep_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

/// Style of the board pretty-printer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrettyStyle {
    Ascii,
    Utf8,
}

/// A validated position, ready for move generation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) side: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) ep_target: Option<Square>,
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
}

impl Position {
    pub fn initial() -> Position {
        // The starting position is always valid.
        match Position::try_from(Setup::initial()) {
            Ok(pos) => pos,
            Err(_) => unreachable!(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn ep_target(&self) -> Option<Square> {
        self.ep_target
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Returns the square of the king of color `c`.
    ///
    /// # Panics
    ///
    /// Panics if the king mask of `c` does not contain exactly one square. A validated
    /// position can only get into this state through memory corruption or a bug in move
    /// application, so there is no sensible recovery.
    pub fn king_square(&self, c: Color) -> Square {
        let kings = self.board.piece2(c, PieceKind::King);
        assert!(
            kings.popcount() == 1,
            "king mask of {} is corrupted",
            c
        );
        kings.first()
    }

    /// Returns `true` if the side to move is in check.
    pub fn is_check(&self) -> bool {
        movegen::is_square_attacked(self, self.king_square(self.side), self.side.flip())
    }

    /// Renders the board as eight newline-terminated ranks, from White's perspective.
    pub fn pretty(&self, style: PrettyStyle) -> String {
        let mut res = String::new();
        for rank_idx in (0..8).rev() {
            for file in File::iter() {
                let sq = Square::from_parts(file, Rank::from_index(rank_idx));
                let ch = match (self.board.get(sq), style) {
                    (Some(p), PrettyStyle::Ascii) => p.as_char(),
                    (Some(p), PrettyStyle::Utf8) => p.as_utf8_char(),
                    (None, _) => '.',
                };
                res.push(ch);
            }
            res.push('\n');
        }
        res
    }
}

fn validate_ep(pos: &Position) -> Result<(), ValidateError> {
    let target = match pos.ep_target {
        Some(sq) => sq,
        None => return Ok(()),
    };
    let err = ValidateError::InvalidEnpassant(target);
    if target.rank() != geometry::enpassant_dst_rank(pos.side) {
        return Err(err);
    }
    let delta = geometry::pawn_forward_delta(pos.side);
    let victim = target.add(-delta);
    let origin = target.add(delta);
    let enemy_pawns = pos.board.piece2(pos.side.flip(), PieceKind::Pawn);
    if !enemy_pawns.has(victim) || pos.board.occupied().has(target) || pos.board.occupied().has(origin)
    {
        return Err(err);
    }
    Ok(())
}

fn validate_castling(pos: &Position) -> Result<(), ValidateError> {
    for color in [Color::White, Color::Black] {
        for side in [CastlingSide::Queen, CastlingSide::King] {
            if !pos.castling.has(color, side) {
                continue;
            }
            let king_ok = pos
                .board
                .piece2(color, PieceKind::King)
                .has(crate::castling::king_src(color));
            let rook_ok = pos
                .board
                .piece2(color, PieceKind::Rook)
                .has(crate::castling::rook_src(color, side));
            if !king_ok || !rook_ok {
                return Err(ValidateError::InvalidCastling(pos.castling));
            }
        }
    }
    Ok(())
}

impl TryFrom<Setup> for Position {
    type Error = ValidateError;

    fn try_from(setup: Setup) -> Result<Position, ValidateError> {
        let board = &setup.board;
        for color in [Color::White, Color::Black] {
            match board.piece2(color, PieceKind::King).popcount() {
                0 => return Err(ValidateError::NoKing(color)),
                1 => {}
                _ => return Err(ValidateError::TooManyKings(color)),
            }
            if board.color(color).popcount() > 16 {
                return Err(ValidateError::TooManyPieces(color));
            }
        }
        let pawns = board.piece2(Color::White, PieceKind::Pawn)
            | board.piece2(Color::Black, PieceKind::Pawn);
        for rank in [Rank::R1, Rank::R8] {
            if (pawns & pinion_base::bitboard_consts::rank(rank)).is_nonempty() {
                return Err(ValidateError::InvalidPawnRank(rank));
            }
        }

        let pos = Position {
            board: setup.board,
            side: setup.side,
            castling: setup.castling,
            ep_target: setup.ep_target,
            halfmove_clock: setup.halfmove_clock,
            fullmove_number: setup.fullmove_number,
        };
        validate_ep(&pos)?;
        validate_castling(&pos)?;

        let enemy = pos.side.flip();
        if movegen::is_square_attacked(&pos, pos.king_square(enemy), pos.side) {
            return Err(ValidateError::OpponentKingAttacked);
        }
        Ok(pos)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.pretty(PrettyStyle::Ascii))?;
        write!(
            f,
            "side: {}, castling: {}, ep: ",
            self.side, self.castling
        )?;
        match self.ep_target {
            Some(sq) => write!(f, "{}", sq),
            None => write!(f, "-"),
        }
    }
}
