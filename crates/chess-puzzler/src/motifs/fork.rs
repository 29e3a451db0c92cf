/// Fork: the moved piece attacks several valuable enemy pieces at once

use chess::{Board, ChessMove, Piece};

use crate::board_utils::{attacked_opponent_squares, piece_value, same_position};

/// Combined value the attacked pieces must exceed when the king is not one of them
pub const FORK_MATERIAL_THRESHOLD: i32 = 5;

/// Kind of fork, ordered by strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ForkKind {
    /// Two or more pieces worth more than the threshold together
    Material,
    /// King plus at least one non-pawn piece
    Royal,
}

/// Classify the fork delivered by a move, if any.
/// Pawns never count as fork targets.
pub fn fork_kind(before: &Board, chess_move: ChessMove, after: &Board) -> Option<ForkKind> {
    if same_position(before, after) {
        return None;
    }

    let mover = before.side_to_move();
    let to_sq = chess_move.get_dest();
    if after.color_on(to_sq) != Some(mover) {
        return None;
    }

    let mut attacks_king = false;
    let mut targets = 0;
    let mut target_value = 0;

    for (piece, _square) in attacked_opponent_squares(after, to_sq, mover) {
        match piece {
            Piece::King => attacks_king = true,
            Piece::Pawn => {}
            other => {
                targets += 1;
                target_value += piece_value(other);
            }
        }
    }

    if attacks_king && targets >= 1 {
        Some(ForkKind::Royal)
    } else if targets >= 2 && target_value > FORK_MATERIAL_THRESHOLD {
        Some(ForkKind::Material)
    } else {
        None
    }
}

pub fn fork(before: &Board, chess_move: ChessMove, after: &Board) -> bool {
    fork_kind(before, chess_move, after).is_some()
}
