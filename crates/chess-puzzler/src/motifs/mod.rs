/// Motif classifiers
///
/// Each classifier is a pure predicate over (position before, move, position after).
/// A move may satisfy several of them at once; none of them try to be exclusive.

pub mod defenders;
pub mod fork;
pub mod lines;

use std::fmt;

use chess::{Board, ChessMove};
use serde::{Deserialize, Serialize};

use crate::board_utils::same_position;
use crate::position;

/// Signature shared by every classifier
pub type Classifier = fn(&Board, ChessMove, &Board) -> bool;

/// Tactical motifs the engine can recognise
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Motif {
    Fork,
    Pin,
    Skewer,
    DiscoveredAttack,
    /// Remove-the-defender and deflection share one classifier
    Deflection,
    Checkmate,
}

impl Motif {
    pub const ALL: [Motif; 6] = [
        Motif::Fork,
        Motif::Pin,
        Motif::Skewer,
        Motif::DiscoveredAttack,
        Motif::Deflection,
        Motif::Checkmate,
    ];

    /// Map a dataset theme tag onto a motif. Unknown tags yield `None`.
    pub fn from_theme(theme: &str) -> Option<Motif> {
        let theme = theme.trim().to_ascii_lowercase();
        match theme.as_str() {
            "fork" => Some(Motif::Fork),
            "pin" => Some(Motif::Pin),
            "skewer" => Some(Motif::Skewer),
            "discoveredattack" | "discovered-attack" | "discoveredcheck" => {
                Some(Motif::DiscoveredAttack)
            }
            "deflection" | "removedefender" | "remove-defender" | "capturingdefender" => {
                Some(Motif::Deflection)
            }
            "stalemate" => None,
            t if t.starts_with("matein") || t.ends_with("mate") => Some(Motif::Checkmate),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Motif::Fork => "fork",
            Motif::Pin => "pin",
            Motif::Skewer => "skewer",
            Motif::DiscoveredAttack => "discoveredAttack",
            Motif::Deflection => "deflection",
            Motif::Checkmate => "checkmate",
        }
    }

    pub fn classifier(self) -> Classifier {
        match self {
            Motif::Fork => fork::fork,
            Motif::Pin => lines::pin,
            Motif::Skewer => lines::skewer,
            Motif::DiscoveredAttack => lines::discovered_attack,
            Motif::Deflection => defenders::removes_defender,
            Motif::Checkmate => checkmate,
        }
    }

    /// Is `chess_move` (played from `before`, giving `after`) an instance of this motif?
    pub fn classify(self, before: &Board, chess_move: ChessMove, after: &Board) -> bool {
        (self.classifier())(before, chess_move, after)
    }
}

impl fmt::Display for Motif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// First occurrence of a motif within one walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MotifOccurrence {
    pub motif: Motif,
    /// 1-based solver ply number ("move number" for callers)
    pub ply: usize,
    /// The ply was a capture, check or checkmate
    pub forcing: bool,
}

/// Checkmate: the resulting position is mate
pub fn checkmate(before: &Board, _chess_move: ChessMove, after: &Board) -> bool {
    !same_position(before, after) && position::is_checkmate(after)
}
