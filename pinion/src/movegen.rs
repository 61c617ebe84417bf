//! Pseudo-legal move generation, attack queries and the legality filter.
//!
//! Generation order is fully deterministic: piece kinds in the order pawn, knight,
//! bishop, rook, queen, king; for each kind source squares in ascending index order; for
//! each source destinations in ascending index order; promotions expand in knight,
//! bishop, rook, queen order; en passant captures come last.

use crate::attack;
use crate::castling;
use crate::moves::{Move, PromotePiece};
use crate::position::Position;
use arrayvec::ArrayVec;
use pinion_base::bitboard::Bitboard;
use pinion_base::geometry;
use pinion_base::types::{CastlingSide, Color, PieceKind, Square};

/// Upper bound on the number of pseudo-legal moves in any position.
pub const MAX_MOVES: usize = 256;

pub type MoveList = ArrayVec<Move, MAX_MOVES>;

/// Sink for generated moves. Implemented for [`MoveList`] and `Vec<Move>`.
pub trait MovePush {
    fn push(&mut self, mv: Move);
}

impl MovePush for MoveList {
    #[inline]
    fn push(&mut self, mv: Move) {
        ArrayVec::push(self, mv);
    }
}

impl MovePush for Vec<Move> {
    #[inline]
    fn push(&mut self, mv: Move) {
        Vec::push(self, mv);
    }
}

/// Mask of pieces of color `c` that attack `sq`.
pub fn square_attackers(pos: &Position, sq: Square, c: Color) -> Bitboard {
    let b = pos.board();
    let occupied = b.occupied();
    let diag = b.piece2(c, PieceKind::Bishop) | b.piece2(c, PieceKind::Queen);
    let line = b.piece2(c, PieceKind::Rook) | b.piece2(c, PieceKind::Queen);
    // A pawn of color c attacks sq iff sq "attacks" it with the opposite pawn pattern.
    (attack::pawn(c.flip(), sq) & b.piece2(c, PieceKind::Pawn))
        | (attack::knight(sq) & b.piece2(c, PieceKind::Knight))
        | (attack::king(sq) & b.piece2(c, PieceKind::King))
        | (attack::bishop(sq, occupied) & diag)
        | (attack::rook(sq, occupied) & line)
}

/// Returns `true` if any piece of color `c` attacks `sq`.
pub fn is_square_attacked(pos: &Position, sq: Square, c: Color) -> bool {
    let b = pos.board();
    let occupied = b.occupied();
    if ((attack::pawn(c.flip(), sq) & b.piece2(c, PieceKind::Pawn))
        | (attack::knight(sq) & b.piece2(c, PieceKind::Knight))
        | (attack::king(sq) & b.piece2(c, PieceKind::King)))
    .is_nonempty()
    {
        return true;
    }
    let diag = b.piece2(c, PieceKind::Bishop) | b.piece2(c, PieceKind::Queen);
    if (attack::bishop(sq, occupied) & diag).is_nonempty() {
        return true;
    }
    let line = b.piece2(c, PieceKind::Rook) | b.piece2(c, PieceKind::Queen);
    (attack::rook(sq, occupied) & line).is_nonempty()
}

fn gen_pawn(pos: &Position, dst: &mut impl MovePush) {
    let side = pos.side();
    let board = pos.board();
    let occupied = board.occupied();
    let enemy = board.color(side.flip());
    let delta = geometry::pawn_forward_delta(side);
    let promote_rank = geometry::promote_dst_rank(side);
    let double_rank = geometry::double_move_src_rank(side);

    for src in board.piece2(side, PieceKind::Pawn) {
        let mut dests = attack::pawn(side, src) & enemy;
        let single = src.add(delta);
        if !occupied.has(single) {
            dests.set(single);
            if src.rank() == double_rank && !occupied.has(src.add(2 * delta)) {
                dests.set(src.add(2 * delta));
            }
        }
        for to in dests {
            if to.rank() == promote_rank {
                for p in PromotePiece::iter() {
                    dst.push(Move::with_promote(src, to, p));
                }
            } else {
                dst.push(Move::new(src, to));
            }
        }
    }
}

fn castling_dests(pos: &Position) -> Bitboard {
    let side = pos.side();
    let occupied = pos.board().occupied();
    let enemy = side.flip();
    let mut res = Bitboard::EMPTY;
    for cside in [CastlingSide::Queen, CastlingSide::King] {
        if !pos.castling().has(side, cside) {
            continue;
        }
        if (castling::pass(side, cside) & occupied).is_nonempty() {
            continue;
        }
        // The king's final square is handled by the legality filter, like any other
        // move into an attacked square.
        if is_square_attacked(pos, castling::king_src(side), enemy)
            || is_square_attacked(pos, castling::rook_dst(side, cside), enemy)
        {
            continue;
        }
        res.set(castling::king_dst(side, cside));
    }
    res
}

fn gen_kind(pos: &Position, kind: PieceKind, dst: &mut impl MovePush) {
    let side = pos.side();
    let board = pos.board();
    let occupied = board.occupied();
    let own = board.color(side);

    for src in board.piece2(side, kind) {
        let mut dests = attack::piece(kind, side, src, occupied);
        if kind == PieceKind::King {
            dests |= castling_dests(pos);
        }
        dests = dests & !own;
        for to in dests {
            dst.push(Move::new(src, to));
        }
    }
}

fn gen_en_passant(pos: &Position, dst: &mut impl MovePush) {
    let target = match pos.ep_target() {
        Some(sq) => sq,
        None => return,
    };
    let side = pos.side();
    // Pawns able to capture on the target square stand on its reverse attack pattern.
    let origins = attack::pawn(side.flip(), target) & pos.board().piece2(side, PieceKind::Pawn);
    for src in origins {
        dst.push(Move::new(src, target));
    }
}

/// Generates all pseudo-legal moves into `dst`.
pub fn generate_into(pos: &Position, dst: &mut impl MovePush) {
    gen_pawn(pos, dst);
    gen_kind(pos, PieceKind::Knight, dst);
    gen_kind(pos, PieceKind::Bishop, dst);
    gen_kind(pos, PieceKind::Rook, dst);
    gen_kind(pos, PieceKind::Queen, dst);
    gen_kind(pos, PieceKind::King, dst);
    gen_en_passant(pos, dst);
}

/// Generates all pseudo-legal moves for the side to move.
pub fn generate(pos: &Position) -> MoveList {
    let mut res = MoveList::new();
    generate_into(pos, &mut res);
    res
}

/// Checks that the last applied move was legal, i.e. the side that just moved did not
/// leave its own king under attack.
///
/// # Panics
///
/// Panics if the king mask of the side that just moved is corrupted (see
/// [`Position::king_square`]).
pub fn is_legal(pos: &Position) -> bool {
    let mover = pos.side().flip();
    !is_square_attacked(pos, pos.king_square(mover), pos.side())
}

/// Generates all legal moves for the side to move.
///
/// An empty result is a terminal position: checkmate if [`Position::is_check`] holds,
/// stalemate otherwise.
pub fn legal_moves(pos: &Position) -> MoveList {
    let mut res = MoveList::new();
    let mut cur = *pos;
    for mv in generate(pos) {
        let undo = cur.do_move(mv);
        if is_legal(&cur) {
            res.push(mv);
        }
        cur.undo_move(mv, undo);
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Setup;
    use pinion_base::types::{CastlingRights, Piece};
    use std::str::FromStr;

    fn sq(s: &str) -> Square {
        Square::from_str(s).unwrap()
    }

    fn mv(s: &str) -> Move {
        Move::from_str(s).unwrap()
    }

    fn strs(list: &MoveList) -> Vec<String> {
        list.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_initial_moves() {
        let pos = Position::initial();
        let moves = generate(&pos);
        assert_eq!(moves.len(), 20);
        assert_eq!(legal_moves(&pos).len(), 20);
        assert_eq!(
            strs(&moves),
            vec![
                "a2a3", "a2a4", "b2b3", "b2b4", "c2c3", "c2c4", "d2d3", "d2d4", "e2e3",
                "e2e4", "f2f3", "f2f4", "g2g3", "g2g4", "h2h3", "h2h4", "b1a3", "b1c3",
                "g1f3", "g1h3",
            ],
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let mut pos = Position::initial();
        for m in ["e2e4", "e7e5", "g1f3"] {
            pos.do_move(mv(m));
        }
        assert_eq!(strs(&generate(&pos)), strs(&generate(&pos)));
    }

    #[test]
    fn test_attack_queries() {
        let mut pos = Position::initial();
        pos.do_move(mv("e2e4"));
        assert!(is_square_attacked(&pos, sq("d5"), Color::White));
        assert!(is_square_attacked(&pos, sq("f3"), Color::White));
        assert!(!is_square_attacked(&pos, sq("e5"), Color::White));
        assert!(!is_square_attacked(&pos, sq("d5"), Color::Black));
        // The g2 pawn, the g1 knight and the d1 queen (through the vacated e2 square)
        // all attack f3.
        assert_eq!(
            square_attackers(&pos, sq("f3"), Color::White),
            Bitboard::EMPTY
                .with(sq("g2"))
                .with(sq("g1"))
                .with(sq("d1")),
        );
    }

    #[test]
    fn test_castling_generated() {
        let mut pos = Position::initial();
        for m in ["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"] {
            pos.do_move(mv(m));
        }
        let moves = generate(&pos);
        assert!(moves.contains(&mv("e1g1")));
        assert!(!moves.contains(&mv("e1c1")));
        // King moves stay grouped and sorted by destination.
        let king_moves: Vec<_> = strs(&moves)
            .into_iter()
            .filter(|m| m.starts_with("e1"))
            .collect();
        assert_eq!(king_moves, vec!["e1f1", "e1g1", "e1e2"]);
    }

    #[test]
    fn test_castling_blocked_by_attack() {
        // The black rook on f8 covers f1, so short castling is not generated.
        let mut setup = Setup::empty();
        for (s, p) in [
            ("e1", "K"),
            ("h1", "R"),
            ("e8", "k"),
            ("f8", "r"),
        ] {
            setup.board.put(sq(s), Piece::from_str(p).unwrap());
        }
        setup.castling = CastlingRights::from_str("K").unwrap();
        let pos = Position::try_from(setup).unwrap();
        assert!(!generate(&pos).contains(&mv("e1g1")));

        // With the rook on g8 the transit square is free; the final square is left to
        // the legality filter.
        let mut setup2 = setup;
        setup2.board.remove(sq("f8"));
        setup2.board.put(sq("g8"), Piece::from_str("r").unwrap());
        let pos2 = Position::try_from(setup2).unwrap();
        assert!(generate(&pos2).contains(&mv("e1g1")));
        assert!(!legal_moves(&pos2).contains(&mv("e1g1")));
    }

    #[test]
    fn test_en_passant_generated_last() {
        let mut pos = Position::initial();
        for m in ["e2e4", "a7a6", "e4e5", "d7d5"] {
            pos.do_move(mv(m));
        }
        let moves = generate(&pos);
        assert_eq!(moves.last().map(|m| m.to_string()), Some("e5d6".into()));
        assert_eq!(pos.ep_target(), Some(sq("d6")));
    }

    #[test]
    fn test_promotions_expand() {
        let mut setup = Setup::empty();
        for (s, p) in [("e1", "K"), ("a8", "k"), ("g7", "P"), ("h8", "n")] {
            setup.board.put(sq(s), Piece::from_str(p).unwrap());
        }
        let pos = Position::try_from(setup).unwrap();
        let pawn_moves: Vec<_> = strs(&generate(&pos))
            .into_iter()
            .filter(|m| m.starts_with("g7"))
            .collect();
        assert_eq!(
            pawn_moves,
            vec!["g7g8n", "g7g8b", "g7g8r", "g7g8q", "g7h8n", "g7h8b", "g7h8r", "g7h8q"],
        );
    }

    #[test]
    fn test_pseudo_legal_includes_self_check() {
        // The e-file pawn is pinned against the king by the rook.
        let mut setup = Setup::empty();
        for (s, p) in [("e1", "K"), ("e8", "k"), ("e4", "P"), ("e7", "r")] {
            setup.board.put(sq(s), Piece::from_str(p).unwrap());
        }
        let pos = Position::try_from(setup).unwrap();
        assert!(generate(&pos).contains(&mv("e4e5")));
        assert!(legal_moves(&pos).contains(&mv("e4e5")));

        // Pinned pawn on d4: capturing away from the file is pseudo-legal only.
        let mut setup3 = Setup::empty();
        for (s, p) in [("d1", "K"), ("e8", "k"), ("d4", "P"), ("d7", "r"), ("c5", "r")] {
            setup3.board.put(sq(s), Piece::from_str(p).unwrap());
        }
        let pos3 = Position::try_from(setup3).unwrap();
        assert!(generate(&pos3).contains(&mv("d4c5")));
        assert!(!legal_moves(&pos3).contains(&mv("d4c5")));
        assert!(legal_moves(&pos3).contains(&mv("d4d5")));
    }

    #[test]
    fn test_checkmate_is_empty_list() {
        // Fool's mate.
        let mut pos = Position::initial();
        for m in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            pos.do_move(mv(m));
        }
        assert!(pos.is_check());
        assert!(legal_moves(&pos).is_empty());
        assert!(!generate(&pos).is_empty());
    }

    #[test]
    fn test_stalemate_is_empty_list() {
        let mut setup = Setup::empty();
        for (s, p) in [("h8", "k"), ("f7", "K"), ("g6", "Q")] {
            setup.board.put(sq(s), Piece::from_str(p).unwrap());
        }
        setup.side = Color::Black;
        let pos = Position::try_from(setup).unwrap();
        assert!(!pos.is_check());
        assert!(legal_moves(&pos).is_empty());
    }

    #[test]
    fn test_legal_moves_leaves_position_intact() {
        let mut pos = Position::initial();
        for m in ["e2e4", "e7e5", "g1f3"] {
            pos.do_move(mv(m));
        }
        let copy = pos;
        let _ = legal_moves(&pos);
        assert_eq!(pos, copy);
    }
}
