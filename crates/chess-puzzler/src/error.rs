//! Puzzle error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Invalid FEN: {0}")]
    InvalidFen(String),

    #[error("Invalid UCI move: {0}")]
    InvalidUci(String),

    #[error("Illegal move {uci} at ply {ply}")]
    IllegalMove { ply: usize, uci: String },

    #[error("Solution has no setup ply")]
    MissingSetupPly,

    #[error("Dataset parse error on line {line}: {reason}")]
    DatasetParse { line: usize, reason: String },
}
