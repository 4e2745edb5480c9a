//! Terminal rendering of solutions
//!
//! Writes a solution-count header followed by one index-framed token grid
//! per printed solution. The default prints the lexicographically minimal
//! solution, which is stable because the engine canonicalizes before
//! deduplication.

use std::io::Write;

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

use crate::algorithm::canonical::{VOID_TOKEN, parse_labels};
use crate::algorithm::search::SolutionSet;
use crate::board::geometry::Coord;
use crate::board::grid::Board;
use crate::io::error::Result;

/// Options controlling terminal output
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOptions {
    /// Apply ANSI colors keyed by rectangle identity
    pub color: bool,
    /// Print every solution instead of the minimal one
    pub all: bool,
    /// Overlay original clue values at clue coordinates
    pub keep_numbers: bool,
}

/// ANSI palette cycled by rectangle identity
const TOKEN_PALETTE: [Color; 14] = [
    Color::Red,
    Color::DarkRed,
    Color::Green,
    Color::DarkGreen,
    Color::Yellow,
    Color::DarkYellow,
    Color::Blue,
    Color::DarkBlue,
    Color::Magenta,
    Color::DarkMagenta,
    Color::Cyan,
    Color::DarkCyan,
    Color::Grey,
    Color::White,
];

/// Write the puzzle result report
///
/// Unsolvable boards print `0 Unsolvable grid`; otherwise the solution
/// count is followed by the minimal solution, or by all of them.
///
/// # Errors
///
/// Returns an error if writing to the output fails or a solution string
/// does not decode.
pub fn write_report<W: Write>(
    out: &mut W,
    board: &Board,
    solutions: Option<&SolutionSet>,
    options: RenderOptions,
) -> Result<()> {
    let Some(solutions) = solutions else {
        writeln!(out, "0 Unsolvable grid")?;
        return Ok(());
    };

    writeln!(out, "{} Solutions", solutions.len())?;
    if options.all {
        for solution in solutions {
            write_grid(out, board, solution, options)?;
        }
    } else if let Some(minimum) = solutions.iter().next() {
        write_grid(out, board, minimum, options)?;
    }
    Ok(())
}

/// Write one solution as an index-framed token grid
///
/// # Errors
///
/// Returns an error if writing to the output fails or the solution string
/// does not decode.
pub fn write_grid<W: Write>(
    out: &mut W,
    board: &Board,
    solution: &str,
    options: RenderOptions,
) -> Result<()> {
    let labels = parse_labels(solution)?;

    writeln!(out)?;
    let header: String = (0..board.width()).map(|col| format!(" {col:02} ")).collect();
    write_colored(out, options.color, Color::White, &format!("   {header}"))?;
    writeln!(out)?;

    for row in 0..board.height() {
        write_colored(out, options.color, Color::White, &format!("{row:02} "))?;
        for col in 0..board.width() {
            match labels.get(row * board.width() + col).copied().flatten() {
                None => write!(out, " {VOID_TOKEN} ")?,
                Some(label) => {
                    let clue = options
                        .keep_numbers
                        .then(|| board.clue_at(Coord::new(row, col)))
                        .flatten();
                    if let Some(value) = clue {
                        write_colored(out, options.color, Color::White, &format!(" {value:02} "))?;
                    } else {
                        let color = TOKEN_PALETTE
                            .get(label as usize % TOKEN_PALETTE.len())
                            .copied()
                            .unwrap_or(Color::White);
                        write_colored(out, options.color, color, &format!(" {label:02} "))?;
                    }
                }
            }
        }
        writeln!(out)?;
    }

    if options.color {
        queue!(out, ResetColor)?;
    }
    out.flush()?;
    Ok(())
}

fn write_colored<W: Write>(out: &mut W, enabled: bool, color: Color, text: &str) -> Result<()> {
    if enabled {
        queue!(out, SetForegroundColor(color), Print(text))?;
    } else {
        write!(out, "{text}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{RenderOptions, write_report};
    use crate::algorithm::search::SolutionSet;
    use crate::board::geometry::Extent;
    use crate::board::grid::Board;

    #[test]
    fn unsolvable_report_is_a_single_line() {
        let board = Board::fully_active(Extent::new(1, 1), vec![]).ok();
        let Some(board) = board else {
            unreachable!();
        };
        let mut out = Vec::new();
        let written = write_report(&mut out, &board, None, RenderOptions::default());
        assert!(written.is_ok());
        assert_eq!(String::from_utf8(out).ok().as_deref(), Some("0 Unsolvable grid\n"));
    }

    #[test]
    fn plain_grid_lists_tokens_under_indices() {
        let board = Board::fully_active(Extent::new(1, 4), vec![]).ok();
        let Some(board) = board else {
            unreachable!();
        };
        let mut solutions = SolutionSet::new();
        solutions.insert("00000101".to_string());

        let mut out = Vec::new();
        let written = write_report(&mut out, &board, Some(&solutions), RenderOptions::default());
        assert!(written.is_ok());
        let text = String::from_utf8(out).unwrap_or_default();
        assert!(text.starts_with("1 Solutions\n"));
        assert!(text.contains("    00  01  02  03 \n"));
        assert!(text.contains("00  00  00  01  01 \n"));
    }
}
