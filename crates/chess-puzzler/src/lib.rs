pub use chess;

pub mod board_utils;
pub mod error;
pub mod motifs;
pub mod policy;
pub mod position;
pub mod puzzle;
pub mod skill_stack;
pub mod walker;

pub use error::PuzzleError;
pub use motifs::Motif;
pub use puzzle::Puzzle;
pub use skill_stack::{
    verify_skill_stack_sequence, Confidence, SkillStackResult, SkillStackValidator,
};
