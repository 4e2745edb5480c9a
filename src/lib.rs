//! Exhaustive backtracking solver for Shikaku rectangle-partition puzzles
//!
//! The engine enumerates every rectangle placement consistent with each area
//! clue, narrows them by constraint propagation, and searches the remaining
//! branches depth-first. Completed boards are reduced to canonical strings
//! for deduplication, and recurring unclued rectangular regions are tiled
//! once and replayed from a memoization cache.

#![forbid(unsafe_code)]

/// Core solving pipeline: possibility generation, propagation, search,
/// canonicalization, and the free-rectangle tiling cache
pub mod algorithm;
/// Puzzle board model and rectangle geometry
pub mod board;
/// Input/output operations and error handling
pub mod io;

pub use io::error::{Result, SolverError};
