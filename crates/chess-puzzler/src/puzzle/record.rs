/// Dataset record parsing
///
/// Two comma-separated layouts are accepted:
///   compact:  id,fen,moves,rating,themes,url
///   lichess:  PuzzleId,FEN,Moves,Rating,RatingDeviation,Popularity,NbPlays,Themes,GameUrl[,OpeningTags]

use std::collections::BTreeSet;

use super::Puzzle;
use crate::error::PuzzleError;
use crate::position::has_eight_ranks;

const COMPACT_FIELDS: usize = 6;
const LICHESS_MIN_FIELDS: usize = 9;

/// Outcome of reading one dataset line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Puzzle(Puzzle),
    /// Header row or blank line
    Skip,
}

fn is_header(first_field: &str) -> bool {
    first_field.eq_ignore_ascii_case("puzzleid") || first_field.eq_ignore_ascii_case("id")
}

/// Parse one line of a dataset file. `line_no` is 1-based and only used for errors.
pub fn parse_record(line: &str, line_no: usize) -> Result<Record, PuzzleError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(Record::Skip);
    }

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if is_header(fields[0]) {
        return Ok(Record::Skip);
    }

    let parse_err = |reason: String| PuzzleError::DatasetParse {
        line: line_no,
        reason,
    };

    let (id, fen, moves, rating, themes, url) = match fields.len() {
        COMPACT_FIELDS => (fields[0], fields[1], fields[2], fields[3], fields[4], fields[5]),
        n if n >= LICHESS_MIN_FIELDS => {
            (fields[0], fields[1], fields[2], fields[3], fields[7], fields[8])
        }
        n => return Err(parse_err(format!("expected 6 or at least 9 fields, got {n}"))),
    };

    if id.is_empty() {
        return Err(parse_err("empty puzzle id".to_string()));
    }
    if fen.split_whitespace().count() < 4 || !has_eight_ranks(fen) {
        return Err(parse_err(format!("malformed FEN '{fen}'")));
    }

    let moves: Vec<String> = moves.split_whitespace().map(String::from).collect();
    if moves.len() < 2 {
        return Err(parse_err(format!(
            "need a setup ply and a solver ply, got {} moves",
            moves.len()
        )));
    }

    let rating: i32 = rating
        .parse()
        .map_err(|_| parse_err(format!("rating '{rating}' is not an integer")))?;

    let themes: BTreeSet<String> = themes.split_whitespace().map(String::from).collect();

    Ok(Record::Puzzle(Puzzle {
        id: id.to_string(),
        fen: fen.to_string(),
        moves,
        rating,
        themes,
        url: url.to_string(),
    }))
}
