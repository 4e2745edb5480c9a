//! Command-line interface for solving Shikaku puzzle files
//!
//! A single `.txt` puzzle, a directory of them, or stdin is solved with
//! one shared [`Solver`], so the free-rectangle tiling cache carries over
//! between puzzles of a batch.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use crate::algorithm::search::{SolutionSet, Solver};
use crate::board::grid::Board;
use crate::io::configuration::{
    GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX, PUZZLE_EXTENSION, SEARCH_SUFFIX,
};
use crate::io::error::{Result, SolverError};
use crate::io::image::export_solution_png;
use crate::io::parser;
use crate::io::progress::ProgressManager;
use crate::io::render::{RenderOptions, write_report};
use crate::io::visualization::SearchJournal;

/// How solutions are presented
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Token grids on the terminal
    Text,
    /// PNG images next to the puzzle file
    Image,
}

#[derive(Parser)]
#[command(name = "shikaku")]
#[command(version, about = "Solve Shikaku rectangle-partition puzzles")]
/// Command-line arguments for the puzzle solver
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Puzzle file or directory to process (reads stdin when omitted)
    #[arg(value_name = "TARGET")]
    pub target: Option<PathBuf>,

    /// Apply ANSI colors to text output
    #[arg(short, long)]
    pub color: bool,

    /// Report all solutions instead of the minimal one
    #[arg(short, long)]
    pub all: bool,

    /// Keep the clue numbers in text output
    #[arg(short, long)]
    pub keepnum: bool,

    /// Choose how to display solutions
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Export the search trace as an animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process puzzles even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates solving puzzle files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    solver: Solver,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            solver: Solver::new(),
            progress_manager,
        }
    }

    /// Process the target according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, parsing, solving, or any
    /// output operation fails
    pub fn process(&mut self) -> Result<()> {
        let Some(target) = self.cli.target.clone() else {
            return self.process_stdin();
        };

        let files = self.collect_files(&target)?;
        if files.is_empty() {
            return Ok(());
        }

        if let Some(pm) = &mut self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            self.process_file(file)?;
        }

        if let Some(pm) = &self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn process_stdin(&mut self) -> Result<()> {
        let board = parser::parse_board(std::io::stdin().lock())?;
        self.solve_and_emit(&board, None)
    }

    fn collect_files(&self, target: &Path) -> Result<Vec<PathBuf>> {
        if target.is_file() {
            if target.extension().and_then(|s| s.to_str()) == Some(PUZZLE_EXTENSION) {
                if self.should_process_file(target) {
                    Ok(vec![target.to_path_buf()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_target(target, "target file must be a .txt puzzle"))
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some(PUZZLE_EXTENSION)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_target(
                target,
                "target must be a puzzle file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if self.cli.output != OutputFormat::Image || !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::output_path(Some(input_path), None);
        if output_path.exists() {
            // Allow print for user feedback on skipped puzzles
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, path: &Path) -> Result<()> {
        if let Some(pm) = &mut self.progress_manager {
            pm.start_file(path);
        }

        let board = parser::load_board(path)?;
        self.solve_and_emit(&board, Some(path))?;

        if let Some(pm) = &mut self.progress_manager {
            pm.complete_file();
        }

        Ok(())
    }

    fn solve_and_emit(&mut self, board: &Board, source: Option<&Path>) -> Result<()> {
        let mut journal = self
            .cli
            .visualize
            .then(|| SearchJournal::new(board.extent()));
        let solutions = self.solver.solve_with_journal(board, &mut journal)?;

        match self.cli.output {
            OutputFormat::Text => self.emit_text(board, solutions.as_ref())?,
            OutputFormat::Image => self.emit_images(board, solutions.as_ref(), source)?,
        }

        // Unsolvable boards still leave a trace of the failed search
        if let Some(journal) = &journal {
            if journal.event_count() > 0 {
                let gif_path = Self::search_path(source);
                journal.export_gif(&gif_path.to_string_lossy(), GIF_FRAME_DELAY_MS)?;
            }
        }

        Ok(())
    }

    fn emit_text(&self, board: &Board, solutions: Option<&SolutionSet>) -> Result<()> {
        let options = RenderOptions {
            color: self.cli.color,
            all: self.cli.all,
            keep_numbers: self.cli.keepnum,
        };
        let mut stdout = std::io::stdout().lock();
        match &self.progress_manager {
            Some(pm) => pm.suspend(|| write_report(&mut stdout, board, solutions, options)),
            None => write_report(&mut stdout, board, solutions, options),
        }
    }

    fn emit_images(
        &self,
        board: &Board,
        solutions: Option<&SolutionSet>,
        source: Option<&Path>,
    ) -> Result<()> {
        let Some(solutions) = solutions else {
            return self.emit_text(board, None);
        };

        let mut stdout = std::io::stdout().lock();
        match &self.progress_manager {
            Some(pm) => pm.suspend(|| writeln!(stdout, "{} Solutions", solutions.len())),
            None => writeln!(stdout, "{} Solutions", solutions.len()),
        }?;

        let chosen: Vec<&String> = if self.cli.all {
            solutions.iter().collect()
        } else {
            solutions.iter().take(1).collect()
        };

        let numbered = chosen.len() > 1;
        for (index, solution) in chosen.iter().enumerate() {
            let path = Self::output_path(source, numbered.then_some(index + 1));
            export_solution_png(board, solution, &path.to_string_lossy())?;
        }

        Ok(())
    }

    fn output_base(source: Option<&Path>) -> (PathBuf, String) {
        source.map_or_else(
            || (PathBuf::new(), "shikaku".to_string()),
            |path| {
                (
                    path.parent().map_or_else(PathBuf::new, Path::to_path_buf),
                    path.file_stem()
                        .unwrap_or_default()
                        .to_string_lossy()
                        .into_owned(),
                )
            },
        )
    }

    fn output_path(source: Option<&Path>, index: Option<usize>) -> PathBuf {
        let (dir, stem) = Self::output_base(source);
        let name = match index {
            Some(n) => format!("{stem}{OUTPUT_SUFFIX}-{n}.png"),
            None => format!("{stem}{OUTPUT_SUFFIX}.png"),
        };
        dir.join(name)
    }

    fn search_path(source: Option<&Path>) -> PathBuf {
        let (dir, stem) = Self::output_base(source);
        dir.join(format!("{stem}{SEARCH_SUFFIX}.gif"))
    }
}

fn invalid_target(path: &Path, reason: &str) -> SolverError {
    SolverError::PuzzleRead {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, reason),
    }
}
