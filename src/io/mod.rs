//! Input/output operations and error handling
//!
//! Everything here sits strictly downstream of the solving engine: these
//! modules read puzzle text into a [`crate::board::Board`] and turn
//! canonical solution strings into terminal text, PNG images, or search
//! GIFs. Nothing in this module influences solving.

/// Command-line interface and batch file processing
pub mod cli;
/// Puzzle format constants and output configuration defaults
pub mod configuration;
/// Error types and context for all operations
pub mod error;
/// PNG export of solved boards
pub mod image;
/// Reading puzzle descriptions from text
pub mod parser;
/// Batch progress display
pub mod progress;
/// Terminal rendering of solutions
pub mod render;
/// Search trace capture and GIF export
pub mod visualization;
