/// Remove-the-defender / deflection
///
/// Fires when the move leaves an enemy piece attacked and without defenders, either by
/// capturing its only defender or by checking a king that was its only defender.

use chess::{BitBoard, Board, ChessMove, Color, Piece, Square, EMPTY};

use crate::board_utils::{attackers, same_position};
use crate::position;

/// Enemy non-king pieces (in `board`) whose defenders are exactly `defender`
fn sole_dependents(board: &Board, enemy: Color, defender: Square) -> Vec<Square> {
    let defender_bb = BitBoard::from_square(defender);
    let pieces = *board.color_combined(enemy) & !*board.pieces(Piece::King) & !defender_bb;

    pieces
        .filter(|sq| attackers(board, enemy, *sq) == defender_bb)
        .collect()
}

/// Still there, attacked by `mover`, and nobody left to defend it
fn hanging(after: &Board, square: Square, mover: Color) -> bool {
    after.color_on(square) == Some(!mover)
        && attackers(after, !mover, square) == EMPTY
        && attackers(after, mover, square) != EMPTY
}

pub fn removes_defender(before: &Board, chess_move: ChessMove, after: &Board) -> bool {
    if same_position(before, after) {
        return false;
    }

    let mover = before.side_to_move();
    let enemy = !mover;
    let to_sq = chess_move.get_dest();

    // Capture of the only defender
    if before.color_on(to_sq) == Some(enemy) {
        let undefended = sole_dependents(before, enemy, to_sq)
            .into_iter()
            .any(|sq| hanging(after, sq, mover));
        if undefended {
            return true;
        }
    }

    // Check drags the king away from the piece it alone protects
    if position::is_check(after) {
        let king_sq = after.king_square(enemy);
        return sole_dependents(after, enemy, king_sq)
            .into_iter()
            .any(|sq| attackers(after, mover, sq) != EMPTY);
    }

    false
}
