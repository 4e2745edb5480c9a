/// Free-rectangle tiling cache and identifier allocation
pub mod cache;
/// Canonical solution-string encoding
pub mod canonical;
/// Rectangle placement enumeration per clue
pub mod possibilities;
/// Constraint propagation and search-branch state
pub mod propagation;
/// Backtracking search engine and solver front end
pub mod search;
/// Branch clue selection heuristic
pub mod selection;

pub use search::{SolutionSet, Solver};
