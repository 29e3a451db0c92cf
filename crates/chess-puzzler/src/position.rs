//! Position adapter over the `chess` crate.
//!
//! `chess::Board` is `Copy`, so every applied move yields a fresh board and the
//! position before the move stays untouched for the classifiers to compare.

use std::str::FromStr;

use chess::{Board, BoardStatus, ChessMove, Color, File, MoveGen, Piece, Rank, Square};

use crate::error::PuzzleError;

/// A single applied ply with the facts the walker and policies need
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayedMove {
    pub chess_move: ChessMove,
    /// Piece taken by this move (en passant included)
    pub captured: Option<Piece>,
    /// The resulting position leaves the opponent in check
    pub check: bool,
    /// The resulting position is checkmate
    pub mate: bool,
}

impl PlayedMove {
    /// Capture, check or checkmate
    pub fn is_forcing(&self) -> bool {
        self.captured.is_some() || self.check || self.mate
    }

    pub fn uci(&self) -> String {
        self.chess_move.to_string()
    }
}

/// Eight ranks in the placement field. `chess` ignores extra ranks.
pub fn has_eight_ranks(fen: &str) -> bool {
    fen.split_whitespace()
        .next()
        .is_some_and(|placement| placement.split('/').count() == 8)
}

/// Parse a FEN into a board
pub fn parse_fen(fen: &str) -> Result<Board, PuzzleError> {
    if !has_eight_ranks(fen) {
        return Err(PuzzleError::InvalidFen(fen.to_string()));
    }
    Board::from_str(fen.trim()).map_err(|_| PuzzleError::InvalidFen(fen.to_string()))
}

fn parse_square(file: u8, rank: u8) -> Option<Square> {
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    Some(Square::make_square(
        Rank::from_index((rank - b'1') as usize),
        File::from_index((file - b'a') as usize),
    ))
}

/// Parse a coordinate move (`e2e4`, `e7e8q`). Legality is not checked here.
pub fn parse_uci(uci: &str) -> Result<ChessMove, PuzzleError> {
    let invalid = || PuzzleError::InvalidUci(uci.to_string());
    let bytes = uci.as_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return Err(invalid());
    }

    let from = parse_square(bytes[0], bytes[1]).ok_or_else(invalid)?;
    let to = parse_square(bytes[2], bytes[3]).ok_or_else(invalid)?;

    let promotion = match bytes.get(4) {
        None => None,
        Some(b'q') | Some(b'Q') => Some(Piece::Queen),
        Some(b'r') | Some(b'R') => Some(Piece::Rook),
        Some(b'b') | Some(b'B') => Some(Piece::Bishop),
        Some(b'n') | Some(b'N') => Some(Piece::Knight),
        Some(_) => return Err(invalid()),
    };

    Ok(ChessMove::new(from, to, promotion))
}

/// Piece captured by a move, counting en passant
fn captured_piece(board: &Board, m: ChessMove) -> Option<Piece> {
    if let Some(piece) = board.piece_on(m.get_dest()) {
        return Some(piece);
    }
    let moved = board.piece_on(m.get_source());
    let diagonal = m.get_source().get_file() != m.get_dest().get_file();
    if moved == Some(Piece::Pawn) && diagonal {
        return Some(Piece::Pawn);
    }
    None
}

/// Apply a coordinate move, returning the new position and the move facts.
/// `ply` is only used to label the error.
pub fn apply_uci(board: &Board, uci: &str, ply: usize) -> Result<(Board, PlayedMove), PuzzleError> {
    let chess_move = parse_uci(uci)?;
    apply_move(board, chess_move).ok_or_else(|| PuzzleError::IllegalMove {
        ply,
        uci: uci.to_string(),
    })
}

/// Apply a move if it is legal in `board`
pub fn apply_move(board: &Board, chess_move: ChessMove) -> Option<(Board, PlayedMove)> {
    if !MoveGen::new_legal(board).any(|m| m == chess_move) {
        return None;
    }

    let after = board.make_move_new(chess_move);
    let played = PlayedMove {
        chess_move,
        captured: captured_piece(board, chess_move),
        check: is_check(&after),
        mate: is_checkmate(&after),
    };
    Some((after, played))
}

/// Legal moves of the piece standing on `square`
pub fn moves_for(board: &Board, square: Square) -> Vec<ChessMove> {
    MoveGen::new_legal(board)
        .filter(|m| m.get_source() == square)
        .collect()
}

pub fn is_check(board: &Board) -> bool {
    board.checkers().popcnt() > 0
}

pub fn is_checkmate(board: &Board) -> bool {
    board.status() == BoardStatus::Checkmate
}

pub fn turn_color(board: &Board) -> Color {
    board.side_to_move()
}

pub fn piece_at(board: &Board, square: Square) -> Option<(Piece, Color)> {
    match (board.piece_on(square), board.color_on(square)) {
        (Some(piece), Some(color)) => Some((piece, color)),
        _ => None,
    }
}
