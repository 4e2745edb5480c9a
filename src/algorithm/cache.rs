//! Free-rectangle tiling cache and identifier allocation
//!
//! Deep in the search the unsolved remainder of a board often reduces to a
//! bare unclued rectangle. The complete set of tilings of such a rectangle
//! depends on its dimensions alone, so it is computed once per shape and
//! replayed on every later encounter. Merged tilings draw fresh rectangle
//! identifiers from a shared allocator so they can never collide with
//! identifiers already committed on the surrounding board.

use std::collections::HashMap;

use ndarray::Array2;

use crate::algorithm::canonical::canonicalize;
use crate::board::geometry::{Coord, Extent, Placement};
use crate::io::error::{Result, SolverError};

/// Rectangle identifier committed for the clue at the given input index
pub const fn clue_identifier(clue: usize) -> u32 {
    clue as u32 + 1
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

/// Memoization cache for free-rectangle tilings
///
/// Maps rectangle dimensions to every canonical tiling of a fully active,
/// unclued rectangle of that shape. Entries are only ever added; the cache
/// lives for the process and is shared across top-level solves. Not
/// internally synchronized — concurrent callers need their own locking.
#[derive(Default)]
pub struct TilingCache {
    tilings: HashMap<(usize, usize), Vec<String>>,
    /// Cache performance statistics
    pub stats: CacheStats,
}

impl TilingCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// All canonical tilings of a free rectangle, computed on first use
    ///
    /// # Errors
    ///
    /// Returns an error if a tiling of the shape needs more rectangle
    /// labels than the canonical encoding supports.
    pub fn tilings(&mut self, extent: Extent) -> Result<&[String]> {
        let key = (extent.height, extent.width);
        if self.tilings.contains_key(&key) {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
            let computed = enumerate_tilings(extent)?;
            self.tilings.insert(key, computed);
        }
        match self.tilings.get(&key) {
            Some(tilings) => Ok(tilings.as_slice()),
            None => Ok(&[]),
        }
    }

    /// Number of shapes currently cached
    pub fn shape_count(&self) -> usize {
        self.tilings.len()
    }
}

/// Exhaustively enumerate every tiling of an empty rectangle
///
/// Anchors each new rectangle at the first empty cell in row-major order,
/// which visits every subdivision exactly once.
fn enumerate_tilings(extent: Extent) -> Result<Vec<String>> {
    let mut cells = Array2::<u32>::zeros((extent.height, extent.width));
    let active = Array2::from_elem((extent.height, extent.width), true);
    let mut found = Vec::new();
    subdivide(&mut cells, &active, extent, 1, &mut found)?;
    Ok(found)
}

fn subdivide(
    cells: &mut Array2<u32>,
    active: &Array2<bool>,
    extent: Extent,
    next_id: u32,
    found: &mut Vec<String>,
) -> Result<()> {
    let anchor = cells
        .indexed_iter()
        .find(|&(_, &id)| id == 0)
        .map(|(index, _)| index);
    let Some((row, col)) = anchor else {
        found.push(canonicalize(cells, active)?);
        return Ok(());
    };

    for height in 1..=extent.height - row {
        // The anchor column blocks this and every taller rectangle
        if cells.get((row + height - 1, col)) != Some(&0) {
            break;
        }
        for width in 1..=extent.width - col {
            let rect = Placement::new(Coord::new(row, col), Extent::new(height, width));
            // A blocked cell stays inside every wider rectangle
            if !region_is_empty(cells, &rect) {
                break;
            }
            fill(cells, &rect, next_id);
            subdivide(cells, active, extent, next_id + 1, found)?;
            fill(cells, &rect, 0);
        }
    }

    Ok(())
}

fn region_is_empty(cells: &Array2<u32>, rect: &Placement) -> bool {
    rect.cells()
        .all(|cell| cells.get((cell.row, cell.col)) == Some(&0))
}

fn fill(cells: &mut Array2<u32>, rect: &Placement, id: u32) {
    for cell in rect.cells() {
        if let Some(value) = cells.get_mut((cell.row, cell.col)) {
            *value = id;
        }
    }
}

/// Hands out blocks of rectangle identifiers for merged cache tilings
///
/// The counter starts strictly above every clue identifier and only moves
/// forward, so identifiers merged from different cache consultations of
/// one solve can never collide with each other or with committed clues.
#[derive(Debug)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Allocator whose identifiers start above the committed clue range
    pub const fn starting_after(clue_count: usize) -> Self {
        Self {
            next: clue_count as u64 + 1,
        }
    }

    /// Reserve a contiguous identifier block, returning its first value
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::IdentifierOverflow`] when the block would
    /// leave the representable identifier range.
    pub fn reserve(&mut self, count: usize) -> Result<u32> {
        let base = self.next;
        let end = base.saturating_add(count as u64);
        if end > u64::from(u32::MAX) {
            return Err(SolverError::IdentifierOverflow { needed: count });
        }
        self.next = end;
        u32::try_from(base).map_err(|_| SolverError::IdentifierOverflow { needed: count })
    }
}

#[cfg(test)]
mod tests {
    use super::TilingCache;
    use crate::board::geometry::Extent;

    #[test]
    fn single_cell_has_one_tiling() {
        let mut cache = TilingCache::new();
        let tilings = cache.tilings(Extent::new(1, 1)).map(<[String]>::to_vec);
        assert_eq!(tilings.ok(), Some(vec!["00".to_string()]));
    }

    #[test]
    fn strip_tilings_double_per_cell() {
        // A 1xN strip splits independently at each of its N-1 seams
        let mut cache = TilingCache::new();
        for (width, expected) in [(2_usize, 2_usize), (3, 4), (4, 8)] {
            let count = cache
                .tilings(Extent::new(1, width))
                .map(<[String]>::len)
                .unwrap_or(0);
            assert_eq!(count, expected);
        }
    }

    #[test]
    fn square_tiling_count_matches_enumeration() {
        let mut cache = TilingCache::new();
        let count = cache
            .tilings(Extent::new(2, 2))
            .map(<[String]>::len)
            .unwrap_or(0);
        assert_eq!(count, 8);
    }

    #[test]
    fn repeated_shapes_hit_the_cache() {
        let mut cache = TilingCache::new();
        let first = cache.tilings(Extent::new(2, 3)).map(<[String]>::to_vec);
        let second = cache.tilings(Extent::new(2, 3)).map(<[String]>::to_vec);
        assert_eq!(first.ok(), second.ok());
        assert_eq!(cache.stats.misses, 1);
        assert_eq!(cache.stats.hits, 1);
        assert_eq!(cache.shape_count(), 1);
    }
}
