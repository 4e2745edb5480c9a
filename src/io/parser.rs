//! Reading puzzle descriptions from text
//!
//! A puzzle is a dimensions header followed by one tokenized line per
//! board row:
//!
//! ```text
//! 4 2
//! 2 0 3 -
//! 0 3 0
//! ```
//!
//! The header gives `width height`. A `-` token is a permanently void
//! cell, a positive integer places a clue with that area, and any other
//! integer is a plain active cell. Rows shorter than the board width are
//! padded with void cells; extra tokens are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ndarray::Array2;

use crate::board::geometry::{Coord, Extent};
use crate::board::grid::Board;
use crate::io::configuration::VOID_MARKER;
use crate::io::error::{Result, SolverError};

fn malformed(line: usize, reason: &impl ToString) -> SolverError {
    SolverError::MalformedPuzzle {
        line,
        reason: reason.to_string(),
    }
}

/// Parse a puzzle description from any buffered reader
///
/// # Errors
///
/// Returns [`SolverError::MalformedPuzzle`] when the header or a row does
/// not follow the format, and board-validation errors for structurally
/// impossible puzzles.
pub fn parse_board<R: BufRead>(reader: R) -> Result<Board> {
    let mut lines = reader.lines();

    let header = lines
        .next()
        .ok_or_else(|| malformed(1, &"missing dimensions header"))??;
    let mut parts = header.split_whitespace();
    let width: usize = parts
        .next()
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| malformed(1, &"expected 'width height'"))?;
    let height: usize = parts
        .next()
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| malformed(1, &"expected 'width height'"))?;
    if parts.next().is_some() {
        return Err(malformed(1, &"trailing tokens after 'width height'"));
    }

    let mut active = Array2::from_elem((height, width), true);
    let mut clues = Vec::new();

    for row in 0..height {
        let line_number = row + 2;
        let line = lines
            .next()
            .ok_or_else(|| malformed(line_number, &"missing board row"))??;
        let tokens: Vec<&str> = line.split_whitespace().collect();

        for col in 0..width {
            // Short rows pad with void, extra tokens are dropped
            let Some(&token) = tokens.get(col) else {
                if let Some(cell) = active.get_mut((row, col)) {
                    *cell = false;
                }
                continue;
            };
            if token == VOID_MARKER {
                if let Some(cell) = active.get_mut((row, col)) {
                    *cell = false;
                }
                continue;
            }
            let value: i64 = token
                .parse()
                .map_err(|_| malformed(line_number, &format!("unrecognized token '{token}'")))?;
            if value > 0 {
                let area = u32::try_from(value).map_err(|_| {
                    malformed(line_number, &format!("clue value {value} is too large"))
                })?;
                clues.push((Coord::new(row, col), area));
            }
        }
    }

    Board::new(Extent::new(height, width), clues, active)
}

/// Parse a puzzle description held in a string
///
/// # Errors
///
/// Returns the same errors as [`parse_board`].
pub fn parse_board_str(text: &str) -> Result<Board> {
    parse_board(text.as_bytes())
}

/// Load a puzzle description from a file
///
/// # Errors
///
/// Returns [`SolverError::PuzzleRead`] when the file cannot be opened,
/// and the [`parse_board`] errors for malformed content.
pub fn load_board(path: &Path) -> Result<Board> {
    let file = File::open(path).map_err(|e| SolverError::PuzzleRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_board(BufReader::new(file))
}
