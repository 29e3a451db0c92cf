//! Skill-stack validation entry point
//!
//! Glues the walker and the policy table together: resolve the two theme tags to motifs,
//! replay the solution once, and let the pair's policy judge the causal link.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;
use crate::motifs::Motif;
use crate::policy::PolicyTable;
use crate::puzzle::Puzzle;
use crate::walker;

/// How much a verdict can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Confidence {
    /// Produced by a bespoke policy for the pair
    Confirmed,
    /// Fallback verdict for a pair nobody wrote a policy for
    Generic,
}

/// Verdict for one (solution, motif pair) validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillStackResult {
    pub valid: bool,
    /// Move number where motif1 first occurs
    pub motif1_ply_index: Option<usize>,
    /// Move number where motif2 first occurs
    pub motif2_ply_index: Option<usize>,
    pub reasoning: String,
    pub confidence: Confidence,
}

impl SkillStackResult {
    pub fn confirmed(motif1_ply: usize, motif2_ply: usize, reasoning: impl Into<String>) -> Self {
        Self {
            valid: motif2_ply > motif1_ply,
            motif1_ply_index: Some(motif1_ply),
            motif2_ply_index: Some(motif2_ply),
            reasoning: reasoning.into(),
            confidence: Confidence::Confirmed,
        }
    }

    pub fn invalid(
        motif1_ply: Option<usize>,
        motif2_ply: Option<usize>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            valid: false,
            motif1_ply_index: motif1_ply,
            motif2_ply_index: motif2_ply,
            reasoning: reasoning.into(),
            confidence: Confidence::Confirmed,
        }
    }

    /// Permissive verdict for unhandled combinations, flagged for manual review
    pub fn generic(theme1: &str, theme2: &str) -> Self {
        Self {
            valid: true,
            motif1_ply_index: Some(1),
            motif2_ply_index: Some(2),
            reasoning: format!(
                "generic validation - review recommended (no policy for {theme1} then {theme2})"
            ),
            confidence: Confidence::Generic,
        }
    }

    pub fn is_generic(&self) -> bool {
        self.confidence == Confidence::Generic
    }
}

/// Validates solutions against a policy table
#[derive(Clone, Default)]
pub struct SkillStackValidator {
    table: PolicyTable,
}

impl SkillStackValidator {
    pub fn new(table: PolicyTable) -> Self {
        Self { table }
    }

    /// Judge whether `theme1` causally enables `theme2` in the solution `moves`
    /// (setup ply first).
    pub fn validate<S: AsRef<str>>(
        &self,
        fen: &str,
        moves: &[S],
        theme1: &str,
        theme2: &str,
    ) -> SkillStackResult {
        self.validate_outcome(fen, moves, theme1, theme2).result
    }

    pub fn validate_puzzle_outcome(
        &self,
        puzzle: &Puzzle,
        theme1: &str,
        theme2: &str,
    ) -> ValidationOutcome {
        self.validate_outcome(&puzzle.fen, puzzle.moves.as_slice(), theme1, theme2)
    }

    /// Like [`validate`](Self::validate), also handing back why the replay stopped early
    pub fn validate_outcome<S: AsRef<str>>(
        &self,
        fen: &str,
        moves: &[S],
        theme1: &str,
        theme2: &str,
    ) -> ValidationOutcome {
        let motifs = (Motif::from_theme(theme1), Motif::from_theme(theme2));

        // Pairs without a policy still replay, watching nothing
        let watch = match motifs {
            (Some(motif1), Some(motif2)) if self.table.has_policy(motif1, motif2) => {
                vec![motif1, motif2, Motif::Checkmate]
            }
            _ => Vec::new(),
        };
        let walk = walker::walk(fen, moves, &watch);

        let mut result = match motifs {
            (Some(motif1), Some(motif2)) => self.table.evaluate(motif1, motif2, &walk),
            _ => SkillStackResult::generic(theme1, theme2),
        };
        if let Some(halt) = &walk.halt {
            if result.is_generic() {
                result.valid = false;
                result.motif1_ply_index = None;
                result.motif2_ply_index = None;
            }
            result.reasoning = format!("{}; walk halted: {halt}", result.reasoning);
        }

        ValidationOutcome {
            result,
            halt: walk.halt,
        }
    }
}

/// A verdict plus the data-quality failure that cut the replay short, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub result: SkillStackResult,
    pub halt: Option<PuzzleError>,
}

impl From<SkillStackResult> for ValidationOutcome {
    fn from(result: SkillStackResult) -> Self {
        Self { result, halt: None }
    }
}

fn standard_validator() -> &'static SkillStackValidator {
    static VALIDATOR: OnceLock<SkillStackValidator> = OnceLock::new();
    VALIDATOR.get_or_init(SkillStackValidator::default)
}

/// Validate a space-separated UCI solution against the standard policy table
pub fn verify_skill_stack_sequence(
    fen: &str,
    moves_uci: &str,
    theme1: &str,
    theme2: &str,
) -> SkillStackResult {
    let moves: Vec<&str> = moves_uci.split_whitespace().collect();
    standard_validator().validate(fen, &moves, theme1, theme2)
}
