//! Canonical solution-string encoding
//!
//! A fully assigned ownership matrix is rendered to a fixed-width token
//! string: rectangle identifiers are relabeled in first-seen scan order so
//! that two assignments differing only in identifier choice encode
//! identically, while any boundary difference changes the string. The
//! strings are the sole vehicle for solution identity, deduplication, and
//! the minimum-solution display default.

use std::collections::HashMap;

use ndarray::Array2;

use crate::io::error::{Result, SolverError};

/// Token emitted for permanently void cells
pub const VOID_TOKEN: &str = "--";

/// Width of one cell token in characters
pub const LABEL_WIDTH: usize = 2;

/// Number of distinct rectangle labels the token format can express
const LABEL_SPACE: u32 = 100;

/// Encode a fully assigned ownership matrix as a canonical string
///
/// Cells are scanned in row-major order; each identifier receives a
/// two-digit label at its first appearance, and void cells emit
/// [`VOID_TOKEN`]. The matrix is assumed complete: every active cell
/// carries the identifier of the rectangle covering it.
///
/// # Errors
///
/// Returns [`SolverError::IdentifierOverflow`] if the assignment holds
/// more distinct rectangles than the label space can express.
pub fn canonicalize(cells: &Array2<u32>, active: &Array2<bool>) -> Result<String> {
    let mut labels: HashMap<u32, u32> = HashMap::new();
    let mut encoded = String::with_capacity(cells.len() * LABEL_WIDTH);

    for (index, &id) in cells.indexed_iter() {
        if active.get(index) != Some(&true) {
            encoded.push_str(VOID_TOKEN);
            continue;
        }
        let next = labels.len() as u32;
        let label = *labels.entry(id).or_insert(next);
        if label >= LABEL_SPACE {
            return Err(SolverError::IdentifierOverflow {
                needed: labels.len(),
            });
        }
        encoded.push_str(&format!("{label:02}"));
    }

    Ok(encoded)
}

/// Decode a canonical string into per-cell labels, `None` for void cells
///
/// # Errors
///
/// Returns [`SolverError::MalformedSolution`] if the string length is not
/// a whole number of tokens or a token is neither numeric nor the void
/// sentinel.
pub fn parse_labels(solution: &str) -> Result<Vec<Option<u32>>> {
    if solution.len() % LABEL_WIDTH != 0 {
        return Err(SolverError::MalformedSolution {
            reason: format!("length {} is not a whole number of tokens", solution.len()),
        });
    }

    solution
        .as_bytes()
        .chunks(LABEL_WIDTH)
        .map(|chunk| {
            let token = std::str::from_utf8(chunk).unwrap_or_default();
            if token == VOID_TOKEN {
                return Ok(None);
            }
            token
                .parse::<u32>()
                .map(Some)
                .map_err(|_| SolverError::MalformedSolution {
                    reason: format!("unrecognized token '{token}'"),
                })
        })
        .collect()
}
