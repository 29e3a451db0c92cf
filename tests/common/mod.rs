#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Knight check forks king and rook, rook mates next move
pub const FORK_THEN_MATE_FEN: &str = "6k1/5ppp/8/3N4/8/8/2r2PPP/3R2K1 b - - 0 1";
pub const FORK_THEN_MATE_MOVES: &str = "c2c6 d5e7 g8h8 d1d8";

/// Quiet rook lift then back-rank mate, no fork anywhere
pub const QUIET_MATE_FEN: &str = "5k2/8/8/8/8/8/1R6/R3K3 b - - 0 1";
pub const QUIET_MATE_MOVES: &str = "f8g8 b2b7 g8h8 a1a8";

/// Bb5 pins the c6 knight, Ne5 forks rook, queen and knight two moves later
pub const PIN_THEN_FORK_FEN: &str = "4k3/5r1p/2nq4/8/8/5N2/4B3/K7 b - - 0 1";
pub const PIN_THEN_FORK_MOVES: &str = "d6g6 e2b5 h7h6 a1b2 h6h5 f3e5 g6h6 e5f7";

/// Smothered mate: Nf7# with the king boxed in by its own rook and pawns
pub const SMOTHERED_FEN: &str = "5r1k/6pp/8/6N1/8/8/8/6K1 b - - 0 1";
pub const SMOTHERED_MOVES: &str = "f8g8 g5f7";

/// Moves listed past the mate are never replayed
pub const QUIET_MATE_PADDED_MOVES: &str = "f8g8 b2b7 g8h8 a1a8 h8h7 b7g7";

/// Bb3 skewers the d5 queen against the e6 bishop, Rd8 mates on the back rank
pub const SKEWER_THEN_MATE_FEN: &str = "3q2k1/5ppp/4b3/8/8/8/2B2PPP/3R2K1 b - - 0 1";
pub const SKEWER_THEN_MATE_MOVES: &str = "d8d5 c2b3 d5h5 d1d8";

/// Ne7+ uncovers the b3 bishop onto g8 (double check), Rd8 mates
pub const DISCOVERED_THEN_MATE_FEN: &str = "r5k1/6pp/8/3N4/8/1B6/5PPP/3R2K1 b - - 0 1";
pub const DISCOVERED_THEN_MATE_MOVES: &str = "a8a7 d5e7 g8h8 d1d8";

/// Bxf6 takes the only guard of the d5 bishop, Ne7+ forks king and c8 rook
pub const DEFLECTION_THEN_FORK_FEN: &str = "6k1/2r5/5n2/3b1NB1/8/8/8/3R2K1 b - - 0 1";
pub const DEFLECTION_THEN_FORK_MOVES: &str = "c7c8 g5f6 d5a2 f5e7";

/// Bb3 skewers queen and bishop, the queen steps to c6 and Ne7+ forks it with the king
pub const SKEWER_THEN_FORK_FEN: &str = "3q2k1/5ppp/4b3/5N2/8/8/2B2PPP/6K1 b - - 0 1";
pub const SKEWER_THEN_FORK_MOVES: &str = "d8d5 c2b3 d5c6 f5e7";

/// Bb1 uncovers the e1 rook onto e8, Nd7+ forks the king on f8 and the b6 queen
pub const DISCOVERED_THEN_FORK_FEN: &str = "4k3/8/8/q1N5/4B3/8/5PPP/4R1K1 b - - 0 1";
pub const DISCOVERED_THEN_FORK_MOVES: &str = "a5b6 e4b1 e8f8 c5d7";

/// Scenario C with Ba4 renewing the pin on move 2 before the fork on move 3
pub const REPEATED_PIN_MOVES: &str = "d6g6 e2b5 h7h6 b5a4 h6h5 f3e5 g6h6 e5f7";

/// Compact dataset row: id,fen,moves,rating,themes,url
pub fn row(id: &str, fen: &str, moves: &str, rating: i32, themes: &str) -> String {
    format!("{id},{fen},{moves},{rating},{themes},https://lichess.org/training/{id}\n")
}

pub fn write_dataset(dir: &Path, name: &str, rows: &[String]) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, rows.concat()).unwrap();
}
