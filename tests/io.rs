//! Input and output collaborators: text parsing, terminal reports, and
//! image exports driven by real solver output

use shikaku::Result;
use shikaku::algorithm::search::Solver;
use shikaku::board::geometry::Extent;
use shikaku::io::image::export_solution_png;
use shikaku::io::parser::{load_board, parse_board_str};
use shikaku::io::render::{RenderOptions, write_report};
use shikaku::io::visualization::SearchJournal;

#[test]
fn parsed_puzzle_solves_to_the_expected_report() -> Result<()> {
    let board = parse_board_str("4 1\n2 0 2 0\n")?;
    let solutions = Solver::new().solve(&board)?;

    let mut out = Vec::new();
    write_report(&mut out, &board, solutions.as_ref(), RenderOptions::default())?;
    let text = String::from_utf8(out).unwrap_or_default();
    assert_eq!(
        text,
        "1 Solutions\n\n    00  01  02  03 \n00  00  00  01  01 \n"
    );
    Ok(())
}

#[test]
fn keepnum_overlays_clue_values() -> Result<()> {
    let board = parse_board_str("4 1\n2 0 2 0\n")?;
    let solutions = Solver::new().solve(&board)?;

    let options = RenderOptions {
        keep_numbers: true,
        ..RenderOptions::default()
    };
    let mut out = Vec::new();
    write_report(&mut out, &board, solutions.as_ref(), options)?;
    let text = String::from_utf8(out).unwrap_or_default();
    assert!(text.contains("00  02  00  02  01 "));
    Ok(())
}

#[test]
fn unsolvable_puzzle_reports_a_single_line() -> Result<()> {
    let board = parse_board_str("2 2\n3 0\n0 0\n")?;
    let solutions = Solver::new().solve(&board)?;
    assert!(solutions.is_none());

    let mut out = Vec::new();
    write_report(&mut out, &board, solutions.as_ref(), RenderOptions::default())?;
    assert_eq!(
        String::from_utf8(out).unwrap_or_default(),
        "0 Unsolvable grid\n"
    );
    Ok(())
}

#[test]
fn colored_report_carries_ansi_escapes() -> Result<()> {
    let board = parse_board_str("4 1\n2 0 2 0\n")?;
    let solutions = Solver::new().solve(&board)?;

    let options = RenderOptions {
        color: true,
        ..RenderOptions::default()
    };
    let mut out = Vec::new();
    write_report(&mut out, &board, solutions.as_ref(), options)?;
    let text = String::from_utf8(out).unwrap_or_default();
    assert!(text.contains('\u{1b}'));
    assert!(text.starts_with("1 Solutions\n"));
    Ok(())
}

#[test]
fn missing_puzzle_file_reports_the_path() {
    let result = load_board(std::path::Path::new("no/such/puzzle.txt"));
    let message = result.err().map(|e| e.to_string()).unwrap_or_default();
    assert!(message.contains("Failed to read puzzle"));
    assert!(message.contains("puzzle.txt"));
}

#[test]
fn solution_png_is_written_and_decodable() -> Result<()> {
    let board = parse_board_str("2 2\n4 0\n0 0\n")?;
    let solutions = Solver::new().solve(&board)?;
    let Some(solutions) = solutions else {
        unreachable!();
    };
    let Some(solution) = solutions.iter().next() else {
        unreachable!();
    };

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("solution.png");
    export_solution_png(&board, solution, &path.to_string_lossy())?;

    assert!(path.exists());
    let dimensions = image::image_dimensions(&path).ok();
    assert_eq!(dimensions, Some((48, 48)));
    Ok(())
}

#[test]
fn search_journal_exports_an_animated_gif() -> Result<()> {
    let board = parse_board_str("2 2\n2 0\n0 2\n")?;
    let mut journal = Some(SearchJournal::new(board.extent()));
    let solutions = Solver::new().solve_with_journal(&board, &mut journal)?;
    assert!(solutions.is_some());

    let Some(journal) = journal else {
        unreachable!();
    };
    assert!(journal.event_count() > 0);

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("trace.gif");
    journal.export_gif(&path.to_string_lossy(), 60)?;

    let size = std::fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0);
    assert!(size > 0);
    Ok(())
}

#[test]
fn journal_observation_does_not_change_solutions() -> Result<()> {
    let board = parse_board_str("3 2\n2 0 0\n0 0 0\n")?;

    let plain = Solver::new().solve(&board)?;
    let mut journal = Some(SearchJournal::new(Extent::new(2, 3)));
    let observed = Solver::new().solve_with_journal(&board, &mut journal)?;
    assert_eq!(plain, observed);
    Ok(())
}
