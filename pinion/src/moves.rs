//! Moves and in-place move application.
//!
//! A [`Move`] carries only its source, destination and an optional promotion piece.
//! Everything else (whether the move is a capture, a castling, a double pawn push or an
//! en passant capture) is recomputed from the position when the move is applied, so the
//! same move value can be applied to any position it was generated for.

use crate::castling;
use crate::position::Position;
use pinion_base::bitboard::Bitboard;
use pinion_base::geometry;
use pinion_base::types::{
    CastlingRights, CastlingSide, Color, File, Piece, PieceKind, Square, SquareParseError,
};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("invalid string length")]
    BadLength,
    #[error("cannot parse square: {0}")]
    BadSquare(#[from] SquareParseError),
    #[error("unexpected promotion char {0:?}")]
    BadPromote(char),
}

/// Piece a pawn may promote to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PromotePiece {
    Knight = 0,
    Bishop = 1,
    Rook = 2,
    Queen = 3,
}

impl PromotePiece {
    pub const fn kind(self) -> PieceKind {
        match self {
            PromotePiece::Knight => PieceKind::Knight,
            PromotePiece::Bishop => PieceKind::Bishop,
            PromotePiece::Rook => PieceKind::Rook,
            PromotePiece::Queen => PieceKind::Queen,
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        [
            PromotePiece::Knight,
            PromotePiece::Bishop,
            PromotePiece::Rook,
            PromotePiece::Queen,
        ]
        .into_iter()
    }

    fn as_char(self) -> char {
        match self {
            PromotePiece::Knight => 'n',
            PromotePiece::Bishop => 'b',
            PromotePiece::Rook => 'r',
            PromotePiece::Queen => 'q',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(PromotePiece::Knight),
            'b' => Some(PromotePiece::Bishop),
            'r' => Some(PromotePiece::Rook),
            'q' => Some(PromotePiece::Queen),
            _ => None,
        }
    }
}

/// A chess move, as emitted by the move generator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub src: Square,
    pub dst: Square,
    pub promote: Option<PromotePiece>,
}

impl Move {
    pub const fn new(src: Square, dst: Square) -> Move {
        Move {
            src,
            dst,
            promote: None,
        }
    }

    pub const fn with_promote(src: Square, dst: Square, promote: PromotePiece) -> Move {
        Move {
            src,
            dst,
            promote: Some(promote),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)?;
        if let Some(p) = self.promote {
            write!(f, "{}", p.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() || (s.len() != 4 && s.len() != 5) {
            return Err(MoveParseError::BadLength);
        }
        let src = Square::from_str(&s[0..2])?;
        let dst = Square::from_str(&s[2..4])?;
        let promote = match s[4..].chars().next() {
            Some(c) => Some(PromotePiece::from_char(c).ok_or(MoveParseError::BadPromote(c))?),
            None => None,
        };
        Ok(Move { src, dst, promote })
    }
}

/// State needed to take a move back, returned by [`Position::do_move`].
///
/// An `Undo` is only meaningful for the exact move and position it was produced from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Undo {
    captured: Option<Piece>,
    castling: CastlingRights,
    ep_target: Option<Square>,
    halfmove_clock: u16,
}

fn is_castling(piece: PieceKind, src: Square, dst: Square) -> bool {
    piece == PieceKind::King && src.file().index().abs_diff(dst.file().index()) == 2
}

fn update_castling(rights: &mut CastlingRights, change: Bitboard) {
    if (change & castling::ALL_SRCS).is_empty() {
        return;
    }
    for color in [Color::White, Color::Black] {
        for side in [CastlingSide::Queen, CastlingSide::King] {
            if rights.has(color, side) && (change & castling::srcs(color, side)).is_nonempty() {
                rights.unset(color, side);
            }
        }
    }
}

impl Position {
    /// Applies `mv` in place and returns the state required to take it back.
    ///
    /// `mv` must have been generated for this exact position. Applying any other move
    /// leaves the position in an unspecified (but memory-safe) state.
    ///
    /// # Panics
    ///
    /// Panics if the source square of `mv` is empty.
    pub fn do_move(&mut self, mv: Move) -> Undo {
        let side = self.side;
        let piece = match self.board.get(mv.src) {
            Some(p) => p,
            None => panic!("do_move: no piece on {}", mv.src),
        };
        let undo_ep = self.ep_target;
        let undo_castling = self.castling;
        let undo_halfmove = self.halfmove_clock;
        self.ep_target = None;

        self.board.remove(mv.src);
        let mut captured = self.board.remove(mv.dst);
        let placed = match mv.promote {
            Some(p) => Piece::from_parts(side, p.kind()),
            None => piece,
        };
        self.board.put(mv.dst, placed);

        if piece.kind() == PieceKind::Pawn {
            let delta = geometry::pawn_forward_delta(side);
            if mv.src.file() != mv.dst.file() && captured.is_none() {
                // Diagonal pawn move to an empty square, so it is en passant.
                captured = self.board.remove(mv.dst.add(-delta));
            } else if mv.src.rank() == geometry::double_move_src_rank(side)
                && mv.dst.rank() == geometry::double_move_dst_rank(side)
            {
                self.ep_target = Some(mv.src.add(delta));
            }
        } else if is_castling(piece.kind(), mv.src, mv.dst) {
            let cside = if mv.dst.file() == File::G {
                CastlingSide::King
            } else {
                CastlingSide::Queen
            };
            self.board.remove(castling::rook_src(side, cside));
            self.board.put(
                castling::rook_dst(side, cside),
                Piece::from_parts(side, PieceKind::Rook),
            );
        }

        let change = Bitboard::from_square(mv.src) | Bitboard::from_square(mv.dst);
        update_castling(&mut self.castling, change);

        if piece.kind() == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if side == Color::Black {
            self.fullmove_number += 1;
        }
        self.side = side.flip();

        Undo {
            captured,
            castling: undo_castling,
            ep_target: undo_ep,
            halfmove_clock: undo_halfmove,
        }
    }

    /// Takes back `mv`, restoring the position exactly as it was before the matching
    /// [`Position::do_move`] call.
    ///
    /// # Panics
    ///
    /// Panics if the destination square of `mv` is empty.
    pub fn undo_move(&mut self, mv: Move, u: Undo) {
        let side = self.side.flip();
        let placed = match self.board.remove(mv.dst) {
            Some(p) => p,
            None => panic!("undo_move: no piece on {}", mv.dst),
        };
        let piece = match mv.promote {
            Some(_) => Piece::from_parts(side, PieceKind::Pawn),
            None => placed,
        };
        self.board.put(mv.src, piece);

        if piece.kind() == PieceKind::Pawn
            && mv.src.file() != mv.dst.file()
            && u.ep_target == Some(mv.dst)
        {
            // The capture was en passant; the victim stands beside the target square.
            let delta = geometry::pawn_forward_delta(side);
            if let Some(victim) = u.captured {
                self.board.put(mv.dst.add(-delta), victim);
            }
        } else if let Some(victim) = u.captured {
            self.board.put(mv.dst, victim);
        } else if is_castling(piece.kind(), mv.src, mv.dst) {
            let cside = if mv.dst.file() == File::G {
                CastlingSide::King
            } else {
                CastlingSide::Queen
            };
            self.board.remove(castling::rook_dst(side, cside));
            self.board.put(
                castling::rook_src(side, cside),
                Piece::from_parts(side, PieceKind::Rook),
            );
        }

        self.castling = u.castling;
        self.ep_target = u.ep_target;
        self.halfmove_clock = u.halfmove_clock;
        if side == Color::Black {
            self.fullmove_number -= 1;
        }
        self.side = side;
    }
}
