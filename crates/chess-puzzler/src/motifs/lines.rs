/// Line geometry detectors: pin, skewer, discovered_attack

use chess::{BitBoard, Board, ChessMove, Color, Piece, Square, EMPTY};

use crate::board_utils::{
    attacks, between, castling_rook_square, first_two_on_ray, is_castling_move, is_ray_piece,
    king_value, piece_of, same_position, slider_directions,
};

/// Enemy pieces seen from the moved slider: (front, back) pairs per ray
fn enemy_pairs_on_rays(after: &Board, from: Square, mover: Color) -> Vec<(Piece, Piece)> {
    let slider = match piece_of(after, from, mover) {
        Some(p) if is_ray_piece(p) => p,
        _ => return Vec::new(),
    };

    slider_directions(slider)
        .iter()
        .filter_map(|step| {
            let (front, back) = first_two_on_ray(after, from, *step);
            let front = piece_of(after, front?, !mover)?;
            let back = piece_of(after, back?, !mover)?;
            Some((front, back))
        })
        .collect()
}

/// Pin: the moved slider pins an enemy piece against its king (absolute)
/// or against a more valuable piece behind it (relative)
pub fn pin(before: &Board, chess_move: ChessMove, after: &Board) -> bool {
    if same_position(before, after) {
        return false;
    }

    let mover = before.side_to_move();
    enemy_pairs_on_rays(after, chess_move.get_dest(), mover)
        .into_iter()
        .any(|(front, back)| {
            front != Piece::King && (back == Piece::King || king_value(back) > king_value(front))
        })
}

/// Skewer: the moved slider attacks a more valuable piece (or the king)
/// with a less valuable enemy piece standing behind it on the same line
pub fn skewer(before: &Board, chess_move: ChessMove, after: &Board) -> bool {
    if same_position(before, after) {
        return false;
    }

    let mover = before.side_to_move();
    enemy_pairs_on_rays(after, chess_move.get_dest(), mover)
        .into_iter()
        .any(|(front, back)| back != Piece::King && king_value(front) > king_value(back))
}

/// Discovered attack (includes discovered check): vacating the origin square
/// opens a friendly slider's line onto the king or a non-pawn enemy piece
pub fn discovered_attack(before: &Board, chess_move: ChessMove, after: &Board) -> bool {
    if same_position(before, after) {
        return false;
    }

    let mover = before.side_to_move();
    let from_sq = chess_move.get_source();
    // Castling moves the rook too
    let mut moved = BitBoard::from_square(chess_move.get_dest());
    if is_castling_move(before, chess_move) {
        moved |= BitBoard::from_square(castling_rook_square(chess_move));
    }

    // Discovered check: the checker is not a piece that moved
    let checkers = *after.checkers();
    if checkers != EMPTY && (checkers & !moved) != EMPTY {
        return true;
    }

    let sliders = (*after.pieces(Piece::Bishop)
        | *after.pieces(Piece::Rook)
        | *after.pieces(Piece::Queen))
        & *after.color_combined(mover)
        & !moved;
    let targets = *after.color_combined(!mover) & !*after.pieces(Piece::Pawn);

    for slider_sq in sliders {
        let opened = attacks(after, slider_sq) & !attacks(before, slider_sq) & targets;
        for target_sq in opened {
            if (between(slider_sq, target_sq) & BitBoard::from_square(from_sq)) != EMPTY {
                return true;
            }
        }
    }
    false
}
