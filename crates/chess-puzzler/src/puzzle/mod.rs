/// Puzzle data model: dataset records

pub mod record;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A puzzle as it appears in the dataset. Read-only once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Puzzle identifier
    pub id: String,
    /// Position before the setup ply
    pub fen: String,
    /// [setup_ply, solver_move_1, response_1, solver_move_2, ...] in UCI
    pub moves: Vec<String>,
    pub rating: i32,
    /// Unordered theme tags from the source
    pub themes: BTreeSet<String>,
    /// Source URL (game link)
    pub url: String,
}

impl Puzzle {
    /// Does the tag set carry both themes?
    pub fn has_themes(&self, theme1: &str, theme2: &str) -> bool {
        self.themes.contains(theme1) && self.themes.contains(theme2)
    }

    /// The move list as a single space-separated string
    pub fn moves_uci(&self) -> String {
        self.moves.join(" ")
    }

    /// Number of solver plies (every other move after the setup ply)
    pub fn solver_ply_count(&self) -> usize {
        self.moves.len().saturating_sub(1).div_ceil(2)
    }
}
