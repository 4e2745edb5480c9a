//! Backtracking search engine and solver front end
//!
//! The driver alternates propagation and branching: each branch clones the
//! current state, commits one candidate placement of the selected clue,
//! propagates to fixpoint, and recurses. Completed boards canonicalize
//! into an ordered set, which deduplicates tilings reached through
//! different branch orders. When the unsolved remainder collapses to a
//! bare unclued rectangle, its tilings are replayed from the memoization
//! cache instead of searching further.

use std::collections::BTreeSet;

use ndarray::Array2;

use crate::algorithm::cache::{IdAllocator, TilingCache};
use crate::algorithm::canonical::{canonicalize, parse_labels};
use crate::algorithm::possibilities::PossibilitySpace;
use crate::algorithm::propagation::{
    BranchState, PropagationOutcome, propagate_to_fixpoint, uncoverable_contradiction,
};
use crate::algorithm::selection::select_branch_clue;
use crate::board::geometry::{Coord, Extent, Placement};
use crate::board::grid::Board;
use crate::io::error::Result;
use crate::io::visualization::SearchJournal;

/// Deduplicated canonical solution strings in lexicographic order
pub type SolutionSet = BTreeSet<String>;

/// Counters describing the most recent solve
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    /// Branching decisions taken
    pub branches: usize,
    /// Branches abandoned on contradiction
    pub contradictions: usize,
    /// Solutions recorded before deduplication
    pub raw_solutions: usize,
}

/// Shikaku solving engine
///
/// Owns the free-rectangle tiling cache, which lives as long as the solver
/// and is reused across every board passed to [`Solver::solve`]. The
/// engine is synchronous and single-threaded; recursion depth is bounded
/// by the clue count.
pub struct Solver {
    cache: TilingCache,
    stats: SearchStats,
}

impl Solver {
    /// Create a solver with an empty tiling cache
    pub fn new() -> Self {
        Self {
            cache: TilingCache::new(),
            stats: SearchStats::default(),
        }
    }

    /// Find every distinct solution of the board
    ///
    /// Returns `None` when the board is unsolvable, otherwise the
    /// non-empty set of canonical solution strings.
    ///
    /// # Errors
    ///
    /// Returns an error if the rectangle identifier or label space is
    /// exhausted mid-solve.
    pub fn solve(&mut self, board: &Board) -> Result<Option<SolutionSet>> {
        self.solve_with_journal(board, &mut None)
    }

    /// Solve while recording every commit and retraction into a journal
    ///
    /// The journal observes the search without influencing it; pass
    /// `&mut None` to skip recording entirely.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`Solver::solve`].
    pub fn solve_with_journal(
        &mut self,
        board: &Board,
        journal: &mut Option<SearchJournal>,
    ) -> Result<Option<SolutionSet>> {
        self.stats = SearchStats::default();

        let space = PossibilitySpace::generate(board);
        if space.infeasible_clue().is_some() {
            return Ok(None);
        }

        let mut state = BranchState::new(board, &space);
        let mut ids = IdAllocator::starting_after(board.clues().len());
        let mut solutions = SolutionSet::new();
        self.explore(board, &space, &mut state, &mut ids, &mut solutions, journal)?;

        Ok((!solutions.is_empty()).then_some(solutions))
    }

    /// Counters from the most recent solve
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    /// The process-lifetime tiling cache
    pub const fn cache(&self) -> &TilingCache {
        &self.cache
    }

    /// Every canonical tiling of an unclued, fully active rectangle
    ///
    /// Exposes the memoization layer directly: a board of this shape with
    /// no clues and no void cells has exactly these solutions.
    ///
    /// # Errors
    ///
    /// Returns an error if a tiling needs more rectangle labels than the
    /// canonical encoding supports.
    pub fn free_rectangle_tilings(&mut self, extent: Extent) -> Result<Vec<String>> {
        self.cache.tilings(extent).map(<[String]>::to_vec)
    }

    fn explore(
        &mut self,
        board: &Board,
        space: &PossibilitySpace,
        state: &mut BranchState,
        ids: &mut IdAllocator,
        solutions: &mut SolutionSet,
        journal: &mut Option<SearchJournal>,
    ) -> Result<()> {
        match propagate_to_fixpoint(space, state, journal) {
            PropagationOutcome::Contradiction => {
                self.stats.contradictions += 1;
                return Ok(());
            }
            PropagationOutcome::Solved => {
                solutions.insert(canonicalize(&state.cells, board.active())?);
                self.stats.raw_solutions += 1;
                return Ok(());
            }
            PropagationOutcome::Stalled => {}
        }

        if state.all_committed() {
            // Only an exact unclued rectangle remainder is still tileable
            if let Some(region) = free_rectangle_region(board, state) {
                self.merge_cached_tilings(board, state, region, ids, solutions)?;
            } else {
                self.stats.contradictions += 1;
            }
            return Ok(());
        }

        if uncoverable_contradiction(board, space, state) {
            self.stats.contradictions += 1;
            return Ok(());
        }

        let Some(clue) = select_branch_clue(space, state) else {
            return Ok(());
        };
        self.stats.branches += 1;

        let candidates: Vec<usize> = state.viable_indices(clue).collect();
        for index in candidates {
            let mark = journal.as_ref().map(SearchJournal::mark);
            let mut child = state.clone();
            if child.commit(space, clue, index, journal) {
                self.explore(board, space, &mut child, ids, solutions, journal)?;
            } else {
                self.stats.contradictions += 1;
            }
            if let (Some(journal), Some(mark)) = (journal.as_mut(), mark) {
                journal.retract_to(mark);
            }
        }

        Ok(())
    }

    /// Overlay every cached tiling of the free region onto the board
    ///
    /// Each tiling's labels are shifted through the identifier allocator
    /// so merged rectangles never collide with committed identifiers.
    fn merge_cached_tilings(
        &mut self,
        board: &Board,
        state: &BranchState,
        region: Placement,
        ids: &mut IdAllocator,
        solutions: &mut SolutionSet,
    ) -> Result<()> {
        let tilings = self.cache.tilings(region.extent)?.to_vec();

        for tiling in tilings {
            let labels = parse_labels(&tiling)?;
            let distinct = labels
                .iter()
                .flatten()
                .max()
                .map_or(0, |&label| label as usize + 1);
            let base = ids.reserve(distinct)?;

            let mut cells = state.cells.clone();
            overlay_labels(&mut cells, &region, &labels, base);
            solutions.insert(canonicalize(&cells, board.active())?);
            self.stats.raw_solutions += 1;
        }

        Ok(())
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

/// The unassigned active cells as an exact rectangle, if they form one
///
/// The bounding box of the unassigned cells qualifies exactly when its
/// area equals their count: the region then has no assigned cells, no
/// mask holes, and (with every clue committed) no pending clue inside.
fn free_rectangle_region(board: &Board, state: &BranchState) -> Option<Placement> {
    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    let mut count = 0_usize;

    for ((row, col), &active) in board.active().indexed_iter() {
        if !active || state.cells.get((row, col)) != Some(&0) {
            continue;
        }
        count += 1;
        bounds = Some(match bounds {
            None => (row, row, col, col),
            Some((min_row, max_row, min_col, max_col)) => (
                min_row.min(row),
                max_row.max(row),
                min_col.min(col),
                max_col.max(col),
            ),
        });
    }

    let (min_row, max_row, min_col, max_col) = bounds?;
    let extent = Extent::new(max_row - min_row + 1, max_col - min_col + 1);
    (extent.area() == count).then(|| Placement::new(Coord::new(min_row, min_col), extent))
}

/// Write shifted tiling labels into the region's cells
fn overlay_labels(cells: &mut Array2<u32>, region: &Placement, labels: &[Option<u32>], base: u32) {
    for (offset, label) in labels.iter().enumerate() {
        let Some(label) = label else { continue };
        let row = region.origin.row + offset / region.extent.width;
        let col = region.origin.col + offset % region.extent.width;
        if let Some(cell) = cells.get_mut((row, col)) {
            *cell = base + label;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Solver, free_rectangle_region};
    use crate::algorithm::possibilities::PossibilitySpace;
    use crate::algorithm::propagation::BranchState;
    use crate::board::geometry::{Coord, Extent};
    use crate::board::grid::Board;

    #[test]
    fn whole_board_clue_yields_one_solution() {
        let board = Board::fully_active(Extent::new(2, 2), vec![(Coord::new(0, 0), 4)]);
        let Ok(board) = board else {
            unreachable!();
        };
        let mut solver = Solver::new();
        let solutions = solver.solve(&board).ok().flatten();
        let Some(solutions) = solutions else {
            unreachable!();
        };
        assert_eq!(solutions.len(), 1);
        assert!(solutions.contains("00000000"));
    }

    #[test]
    fn remainder_rectangle_is_detected() {
        let board = Board::fully_active(Extent::new(2, 3), vec![(Coord::new(0, 0), 2)]);
        let Ok(board) = board else {
            unreachable!();
        };
        let space = PossibilitySpace::generate(&board);
        let mut state = BranchState::new(&board, &space);

        // Commit the vertical 2x1 placement, leaving a 2x2 remainder
        let vertical = space
            .placements(0)
            .iter()
            .position(|p| p.extent.height == 2);
        let Some(vertical) = vertical else {
            unreachable!();
        };
        assert!(state.commit(&space, 0, vertical, &mut None));

        let region = free_rectangle_region(&board, &state);
        let Some(region) = region else {
            unreachable!();
        };
        assert_eq!(region.origin, Coord::new(0, 1));
        assert_eq!(region.extent, Extent::new(2, 2));
    }

    #[test]
    fn l_shaped_remainder_is_rejected() {
        let board = Board::fully_active(Extent::new(2, 3), vec![(Coord::new(0, 0), 2)]);
        let Ok(board) = board else {
            unreachable!();
        };
        let space = PossibilitySpace::generate(&board);
        let mut state = BranchState::new(&board, &space);

        // The horizontal 1x2 placement leaves an L-shaped remainder
        let horizontal = space
            .placements(0)
            .iter()
            .position(|p| p.extent.width == 2);
        let Some(horizontal) = horizontal else {
            unreachable!();
        };
        assert!(state.commit(&space, 0, horizontal, &mut None));

        assert!(free_rectangle_region(&board, &state).is_none());
    }
}
