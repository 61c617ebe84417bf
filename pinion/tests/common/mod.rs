//! Shared test helpers.
//!
//! The library itself has no notation parsing, so the tests carry their own loader for
//! FEN-like position strings, built on the public `Setup` API. It panics on malformed
//! input, which is exactly what a fixture loader should do.

use pinion::{File, Piece, Position, Rank, Setup, Square};

pub fn position(s: &str) -> Position {
    let mut setup = Setup::empty();
    let mut parts = s.split_whitespace();

    let placement = parts.next().expect("empty position string");
    let rows: Vec<_> = placement.split('/').collect();
    assert_eq!(rows.len(), 8, "placement must have 8 ranks: {:?}", placement);
    for (row, chars) in rows.iter().enumerate() {
        let rank = Rank::from_index(7 - row);
        let mut file = 0_usize;
        for c in chars.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as usize;
                continue;
            }
            let piece = Piece::from_char(c)
                .unwrap_or_else(|| panic!("bad piece char {:?} in {:?}", c, placement));
            assert!(file < 8, "rank overflow in {:?}", placement);
            setup
                .board
                .put(Square::from_parts(File::from_index(file), rank), piece);
            file += 1;
        }
        assert_eq!(file, 8, "rank {:?} does not cover 8 files", chars);
    }

    setup.side = parts
        .next()
        .expect("missing side to move")
        .parse()
        .expect("bad side to move");
    setup.castling = parts
        .next()
        .expect("missing castling rights")
        .parse()
        .expect("bad castling rights");
    match parts.next().expect("missing en passant field") {
        "-" => {}
        sq => setup.ep_target = Some(sq.parse().expect("bad en passant square")),
    }
    if let Some(clock) = parts.next() {
        setup.halfmove_clock = clock.parse().expect("bad halfmove clock");
    }
    if let Some(num) = parts.next() {
        setup.fullmove_number = num.parse().expect("bad fullmove number");
    }

    Position::try_from(setup).expect("invalid test position")
}
