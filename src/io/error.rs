//! Error types for puzzle loading, solving, and export operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all solver operations
#[derive(Debug)]
pub enum SolverError {
    /// Failed to read a puzzle description from the filesystem
    PuzzleRead {
        /// Path to the puzzle file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Puzzle text does not follow the expected format
    MalformedPuzzle {
        /// One-based line number where parsing failed
        line: usize,
        /// Description of what is wrong with the text
        reason: String,
    },

    /// Board description violates a structural invariant
    InvalidBoard {
        /// Description of the violated invariant
        reason: String,
    },

    /// A clue cannot be part of a well-formed board
    InvalidClue {
        /// Row of the offending clue
        row: usize,
        /// Column of the offending clue
        col: usize,
        /// Explanation of why the clue is invalid
        reason: String,
    },

    /// Rectangle identifier space was exhausted during a solve
    ///
    /// Occurs when merged cache tilings or canonical labels would
    /// need more identifiers than the encoding can represent.
    IdentifierOverflow {
        /// Number of identifiers the operation required
        needed: usize,
    },

    /// A canonical solution string cannot be decoded
    MalformedSolution {
        /// Description of what is wrong with the string
        reason: String,
    },

    /// A visualization was requested for a journal with no events
    ///
    /// Occurs when the solve never committed a placement, e.g. a board
    /// whose solutions all come from the tiling cache.
    EmptySearchTrace,

    /// Failed to encode or save an output image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PuzzleRead { path, source } => {
                write!(f, "Failed to read puzzle '{}': {source}", path.display())
            }
            Self::MalformedPuzzle { line, reason } => {
                write!(f, "Malformed puzzle at line {line}: {reason}")
            }
            Self::InvalidBoard { reason } => {
                write!(f, "Invalid board: {reason}")
            }
            Self::InvalidClue { row, col, reason } => {
                write!(f, "Invalid clue at ({row}, {col}): {reason}")
            }
            Self::IdentifierOverflow { needed } => {
                write!(
                    f,
                    "Rectangle identifier space exhausted ({needed} identifiers required)"
                )
            }
            Self::MalformedSolution { reason } => {
                write!(f, "Malformed canonical solution: {reason}")
            }
            Self::EmptySearchTrace => {
                write!(f, "No search events were captured for visualization")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::PuzzleRead { source, .. } | Self::FileSystem { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, SolverError>;

impl From<std::io::Error> for SolverError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create a board-invariant error
pub fn invalid_board(reason: &impl ToString) -> SolverError {
    SolverError::InvalidBoard {
        reason: reason.to_string(),
    }
}

/// Create a clue-validation error
pub fn invalid_clue(row: usize, col: usize, reason: &impl ToString) -> SolverError {
    SolverError::InvalidClue {
        row,
        col,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{SolverError, invalid_clue};

    #[test]
    fn test_display_includes_context() {
        let err = invalid_clue(2, 3, &"area exceeds board size");
        assert_eq!(
            err.to_string(),
            "Invalid clue at (2, 3): area exceeds board size"
        );

        let overflow = SolverError::IdentifierOverflow { needed: 512 };
        assert!(overflow.to_string().contains("512"));
    }
}
