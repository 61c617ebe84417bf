//! Perft, the standard correctness harness for move generators.
//!
//! `perft(pos, d)` counts the leaf nodes of the legal move tree of depth `d`. The counts
//! for well-known positions are published and disagreements pinpoint generator bugs, so
//! the integration tests compare against them.

use crate::movegen;
use crate::position::Position;

/// Counts leaf nodes of the legal move tree of the given depth.
///
/// The position is mutated during the walk and restored before returning.
pub fn perft(pos: &mut Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut res = 0;
    for mv in movegen::generate(pos) {
        let undo = pos.do_move(mv);
        if movegen::is_legal(pos) {
            res += perft(pos, depth - 1);
        }
        pos.undo_move(mv, undo);
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_shallow() {
        let mut pos = Position::initial();
        assert_eq!(perft(&mut pos, 0), 1);
        assert_eq!(perft(&mut pos, 1), 20);
        assert_eq!(perft(&mut pos, 2), 400);
        assert_eq!(perft(&mut pos, 3), 8_902);
        assert_eq!(pos, Position::initial());
    }
}
