/// Board utility functions for motif geometry
/// Attack maps, piece values and ray walking shared by the classifiers

use chess::{BitBoard, Board, ChessMove, Color, File, Piece, Rank, Square, EMPTY};

// Piece values for material comparisons
pub const PAWN_VALUE: i32 = 1;
pub const KNIGHT_VALUE: i32 = 3;
pub const BISHOP_VALUE: i32 = 3;
pub const ROOK_VALUE: i32 = 5;
pub const QUEEN_VALUE: i32 = 9;
pub const KING_VALUE: i32 = 99;

/// Rank/file steps for rook-like rays
pub const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Rank/file steps for bishop-like rays
pub const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const ALL_DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Piece value (no king)
pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => 0,
    }
}

/// Piece value including king (for pin/skewer ordering)
pub fn king_value(piece: Piece) -> i32 {
    match piece {
        Piece::King => KING_VALUE,
        other => piece_value(other),
    }
}

/// Is this a ray (sliding) piece type?
pub fn is_ray_piece(piece: Piece) -> bool {
    matches!(piece, Piece::Queen | Piece::Rook | Piece::Bishop)
}

/// Ray directions a sliding piece moves along. Empty for non-sliders.
pub fn slider_directions(piece: Piece) -> &'static [(i32, i32)] {
    match piece {
        Piece::Bishop => &DIAGONAL,
        Piece::Rook => &ORTHOGONAL,
        Piece::Queen => &ALL_DIRECTIONS,
        _ => &[],
    }
}

/// Get squares attacked by a piece on a given square
pub fn attacks(board: &Board, square: Square) -> BitBoard {
    let piece = match board.piece_on(square) {
        Some(p) => p,
        None => return EMPTY,
    };

    match piece {
        Piece::Pawn => match board.color_on(square) {
            Some(color) => pawn_attacks(square, color),
            None => EMPTY,
        },
        Piece::Knight => chess::get_knight_moves(square),
        Piece::King => chess::get_king_moves(square),
        Piece::Bishop => chess::get_bishop_moves(square, *board.combined()),
        Piece::Rook => chess::get_rook_moves(square, *board.combined()),
        Piece::Queen => {
            chess::get_bishop_moves(square, *board.combined())
                | chess::get_rook_moves(square, *board.combined())
        }
    }
}

/// Pawn attack squares (just the diagonal attacks, not pushes)
pub fn pawn_attacks(square: Square, color: Color) -> BitBoard {
    let file = square.get_file().to_index();
    let rank = square.get_rank().to_index();

    let target_rank = match color {
        Color::White if rank < 7 => rank + 1,
        Color::Black if rank > 0 => rank - 1,
        _ => return EMPTY,
    };

    let mut result = EMPTY;
    if file > 0 {
        result |= BitBoard::from_square(Square::make_square(
            Rank::from_index(target_rank),
            File::from_index(file - 1),
        ));
    }
    if file < 7 {
        result |= BitBoard::from_square(Square::make_square(
            Rank::from_index(target_rank),
            File::from_index(file + 1),
        ));
    }
    result
}

/// Get all pieces of a given color that attack a square
pub fn attackers(board: &Board, color: Color, square: Square) -> BitBoard {
    let occupied = *board.combined();
    let color_pieces = *board.color_combined(color);

    let mut result = EMPTY;

    // Pawns: reverse lookup from the target square with the opposite color
    result |= pawn_attacks(square, !color) & *board.pieces(Piece::Pawn) & color_pieces;
    result |= chess::get_knight_moves(square) & *board.pieces(Piece::Knight) & color_pieces;
    result |= chess::get_king_moves(square) & *board.pieces(Piece::King) & color_pieces;

    let diagonal_sliders = *board.pieces(Piece::Bishop) | *board.pieces(Piece::Queen);
    result |= chess::get_bishop_moves(square, occupied) & diagonal_sliders & color_pieces;

    let straight_sliders = *board.pieces(Piece::Rook) | *board.pieces(Piece::Queen);
    result |= chess::get_rook_moves(square, occupied) & straight_sliders & color_pieces;

    result
}

/// Is this a castling move? (king moves more than one file)
pub fn is_castling_move(board: &Board, m: ChessMove) -> bool {
    if let Some(piece) = board.piece_on(m.get_source()) {
        if piece == Piece::King {
            let from_file = m.get_source().get_file().to_index() as i32;
            let to_file = m.get_dest().get_file().to_index() as i32;
            return (from_file - to_file).abs() > 1;
        }
    }
    false
}

/// Where the rook lands when `m` castles
pub fn castling_rook_square(m: ChessMove) -> Square {
    let dest = m.get_dest();
    let file = if dest.get_file() == File::G {
        File::F
    } else {
        File::D
    };
    Square::make_square(dest.get_rank(), file)
}

/// Opponent pieces attacked from a square: (piece, square)
pub fn attacked_opponent_squares(
    board: &Board,
    from_square: Square,
    pov: Color,
) -> Vec<(Piece, Square)> {
    let mut result = Vec::new();
    for sq in attacks(board, from_square) {
        if let (Some(piece), Some(color)) = (board.piece_on(sq), board.color_on(sq)) {
            if color != pov {
                result.push((piece, sq));
            }
        }
    }
    result
}

/// Squares walked from `from` (exclusive) in one direction until the board edge
pub fn ray(from: Square, step: (i32, i32)) -> impl Iterator<Item = Square> {
    let (file_step, rank_step) = step;
    let mut file = from.get_file().to_index() as i32;
    let mut rank = from.get_rank().to_index() as i32;

    std::iter::from_fn(move || {
        file += file_step;
        rank += rank_step;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square::make_square(
                Rank::from_index(rank as usize),
                File::from_index(file as usize),
            ))
        } else {
            None
        }
    })
}

/// The first two occupied squares seen along a ray
pub fn first_two_on_ray(
    board: &Board,
    from: Square,
    step: (i32, i32),
) -> (Option<Square>, Option<Square>) {
    let mut occupied = ray(from, step).filter(|sq| board.piece_on(*sq).is_some());
    let front = occupied.next();
    let back = occupied.next();
    (front, back)
}

/// A piece of `color` standing on `square`, if any
pub fn piece_of(board: &Board, square: Square, color: Color) -> Option<Piece> {
    if board.color_on(square) == Some(color) {
        board.piece_on(square)
    } else {
        None
    }
}

/// Helper: get between squares (re-export from chess crate)
pub fn between(s1: Square, s2: Square) -> BitBoard {
    chess::between(s1, s2)
}

/// Do two boards hold the same position? Used to reject null moves.
pub fn same_position(a: &Board, b: &Board) -> bool {
    a.side_to_move() == b.side_to_move()
        && a.combined() == b.combined()
        && a.color_combined(Color::White) == b.color_combined(Color::White)
        && [
            Piece::Pawn,
            Piece::Knight,
            Piece::Bishop,
            Piece::Rook,
            Piece::Queen,
            Piece::King,
        ]
        .iter()
        .all(|piece| a.pieces(*piece) == b.pieces(*piece))
}
