//! Sequence walker: replays a puzzle solution and records where each motif first shows up.
//!
//! The move list is `[setup_ply, solver_1, response_1, solver_2, ...]`. The setup ply is
//! applied blindly, then every solver ply is handed to the watched classifiers.

use std::collections::BTreeMap;

use chess::Board;
use tracing::debug;

use crate::error::PuzzleError;
use crate::motifs::{Motif, MotifOccurrence};
use crate::position::{self, apply_uci, PlayedMove};

/// 1-based solver move number for an index into `moves[1..]`, `None` for response plies.
///
/// This is the only place the walk's 0-based iteration meets the 1-based move numbers
/// reported to callers.
pub fn solver_ply_number(index: usize) -> Option<usize> {
    if index % 2 == 0 {
        Some(index / 2 + 1)
    } else {
        None
    }
}

/// Everything a single replay found out about a solution
#[derive(Debug, Clone, Default)]
pub struct Walk {
    /// Applied plies, setup ply included, in order
    pub mainline: Vec<PlayedMove>,
    /// Solver plies actually applied
    pub solver_plies: usize,
    /// Move number of the first capture, check or mate played by the solver
    pub first_forcing: Option<usize>,
    /// Why the replay stopped before the end of the move list
    pub halt: Option<PuzzleError>,
    occurrences: BTreeMap<Motif, MotifOccurrence>,
}

impl Walk {
    /// Record an occurrence. Only the first one per motif is kept.
    pub fn record(&mut self, motif: Motif, ply: usize, forcing: bool) {
        self.occurrences.entry(motif).or_insert(MotifOccurrence {
            motif,
            ply,
            forcing,
        });
    }

    pub fn occurrence(&self, motif: Motif) -> Option<&MotifOccurrence> {
        self.occurrences.get(&motif)
    }

    /// Move number of the first occurrence of `motif`
    pub fn ply_of(&self, motif: Motif) -> Option<usize> {
        self.occurrence(motif).map(|o| o.ply)
    }

    /// Occurrences ordered by motif
    pub fn occurrences(&self) -> impl Iterator<Item = &MotifOccurrence> {
        self.occurrences.values()
    }

    pub fn is_halted(&self) -> bool {
        self.halt.is_some()
    }

    /// Did the replay end in checkmate?
    pub fn is_mate(&self) -> bool {
        self.mainline.last().is_some_and(|played| played.mate)
    }
}

/// Replay `moves` from `fen`, running the classifiers of `watch` on every solver ply.
///
/// Never fails: a bad FEN, an empty move list or an illegal move ends the walk early and
/// is kept in [`Walk::halt`], with every motif not yet seen left absent.
pub fn walk<S: AsRef<str>>(fen: &str, moves: &[S], watch: &[Motif]) -> Walk {
    let mut walk = Walk::default();

    let mut board = match position::parse_fen(fen) {
        Ok(board) => board,
        Err(e) => {
            debug!(fen, error = %e, "walk halted before setup ply");
            walk.halt = Some(e);
            return walk;
        }
    };

    let Some((setup, solution)) = moves.split_first() else {
        walk.halt = Some(PuzzleError::MissingSetupPly);
        return walk;
    };

    board = match step(&mut walk, board, setup.as_ref(), 0) {
        Some(after) => after,
        None => return walk,
    };

    for (index, uci) in solution.iter().enumerate() {
        if walk.is_mate() {
            break;
        }

        let before = board;
        board = match step(&mut walk, before, uci.as_ref(), index + 1) {
            Some(after) => after,
            None => break,
        };

        let Some(number) = solver_ply_number(index) else {
            continue;
        };
        walk.solver_plies += 1;

        let played = walk.mainline[index + 1];
        let forcing = played.is_forcing();
        if forcing && walk.first_forcing.is_none() {
            walk.first_forcing = Some(number);
        }

        for motif in watch {
            if motif.classify(&before, played.chess_move, &board) {
                walk.record(*motif, number, forcing);
            }
        }
    }

    walk
}

/// Apply one ply and push it onto the mainline. Returns `None` (and halts) when illegal.
fn step(walk: &mut Walk, board: Board, uci: &str, ply: usize) -> Option<Board> {
    match apply_uci(&board, uci, ply) {
        Ok((after, played)) => {
            walk.mainline.push(played);
            Some(after)
        }
        Err(e) => {
            debug!(ply, uci, error = %e, "walk halted");
            walk.halt = Some(e);
            None
        }
    }
}
