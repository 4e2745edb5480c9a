//! Constraint propagation and search-branch state
//!
//! A [`BranchState`] carries everything one search branch may mutate: the
//! cell-ownership matrix, per-clue viability flags over the generated
//! placement lists, and the committed-placement markers. Branching clones
//! the state, so no failed branch can leak mutations into a sibling.
//!
//! Propagation repeatedly commits clues that have exactly one viable
//! placement left and prunes every placement that now overlaps an occupied
//! cell. Committing cascades until the board is solved, a contradiction
//! appears, or a genuine branching decision is required.

use bitvec::vec::BitVec;
use ndarray::Array2;

use crate::algorithm::cache::clue_identifier;
use crate::algorithm::possibilities::PossibilitySpace;
use crate::board::geometry::Coord;
use crate::board::grid::Board;
use crate::io::visualization::SearchJournal;

/// Result of driving propagation to its fixpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropagationOutcome {
    /// Every active cell is assigned
    Solved,
    /// No forced placement remains; the search must branch
    Stalled,
    /// The branch is infeasible and must be abandoned
    Contradiction,
}

/// Mutable state of one search branch
#[derive(Clone, Debug)]
pub struct BranchState {
    /// Rectangle ownership per cell, `0` for unassigned
    pub cells: Array2<u32>,
    viable: Vec<BitVec>,
    committed: Vec<Option<usize>>,
    unassigned: usize,
}

impl BranchState {
    /// Fresh state with every generated placement viable and no cell assigned
    pub fn new(board: &Board, space: &PossibilitySpace) -> Self {
        let viable = (0..space.clue_count())
            .map(|clue| BitVec::repeat(true, space.placements(clue).len()))
            .collect();
        Self {
            cells: Array2::zeros((board.height(), board.width())),
            viable,
            committed: vec![None; space.clue_count()],
            unassigned: board.active_cell_count(),
        }
    }

    /// Whether every active cell is assigned
    pub const fn is_complete(&self) -> bool {
        self.unassigned == 0
    }

    /// Number of active cells still unassigned
    pub const fn unassigned_cells(&self) -> usize {
        self.unassigned
    }

    /// Whether the clue has a committed placement
    pub fn is_committed(&self, clue: usize) -> bool {
        self.committed.get(clue).is_some_and(Option::is_some)
    }

    /// Whether every clue has a committed placement
    pub fn all_committed(&self) -> bool {
        self.committed.iter().all(Option::is_some)
    }

    /// Number of placements still viable for the clue
    pub fn viable_count(&self, clue: usize) -> usize {
        self.viable.get(clue).map_or(0, |mask| mask.count_ones())
    }

    /// Indices of the clue's viable placements, in generation order
    pub fn viable_indices(&self, clue: usize) -> impl Iterator<Item = usize> + '_ {
        self.viable
            .get(clue)
            .into_iter()
            .flat_map(|mask| mask.iter_ones())
    }

    /// Commit one placement for a clue and prune everything it overlaps
    ///
    /// Marks the footprint with the clue's identifier, narrows the clue to
    /// the committed placement, and removes every other clue's placements
    /// that now cover an occupied cell. Returns `false` when the commit is
    /// impossible or empties another clue's viability mask; the state is
    /// not usable afterwards and the caller must discard the branch.
    pub fn commit(
        &mut self,
        space: &PossibilitySpace,
        clue: usize,
        placement_index: usize,
        journal: &mut Option<SearchJournal>,
    ) -> bool {
        let Some(&placement) = space.placements(clue).get(placement_index) else {
            return false;
        };

        for cell in placement.cells() {
            match self.cells.get_mut((cell.row, cell.col)) {
                Some(value) if *value == 0 => {
                    *value = clue_identifier(clue);
                    self.unassigned -= 1;
                }
                _ => return false,
            }
        }

        if let Some(mask) = self.viable.get_mut(clue) {
            mask.fill(false);
            mask.set(placement_index, true);
        }
        if let Some(slot) = self.committed.get_mut(clue) {
            *slot = Some(placement_index);
        }
        if let Some(journal) = journal {
            journal.record_placement(placement, clue_identifier(clue));
        }

        for other in 0..space.clue_count() {
            if other == clue || self.is_committed(other) {
                continue;
            }
            let overlapping: Vec<usize> = self
                .viable_indices(other)
                .filter(|&index| {
                    space
                        .placements(other)
                        .get(index)
                        .is_some_and(|candidate| candidate.overlaps(&placement))
                })
                .collect();
            if let Some(mask) = self.viable.get_mut(other) {
                for index in overlapping {
                    mask.set(index, false);
                }
                if mask.not_any() {
                    return false;
                }
            }
        }

        true
    }
}

/// Drive forced placements to their fixpoint
///
/// Whenever some uncommitted clue has exactly one viable placement left,
/// that placement is committed; commits prune further placements and may
/// force more clues in cascade.
pub fn propagate_to_fixpoint(
    space: &PossibilitySpace,
    state: &mut BranchState,
    journal: &mut Option<SearchJournal>,
) -> PropagationOutcome {
    loop {
        if state.is_complete() {
            return PropagationOutcome::Solved;
        }

        let forced = (0..space.clue_count())
            .find(|&clue| !state.is_committed(clue) && state.viable_count(clue) == 1);
        let Some(clue) = forced else {
            return PropagationOutcome::Stalled;
        };
        let Some(index) = state.viable_indices(clue).next() else {
            return PropagationOutcome::Contradiction;
        };
        if !state.commit(space, clue, index, journal) {
            return PropagationOutcome::Contradiction;
        }
    }
}

/// How many viable (clue, placement) pairs could cover each cell
///
/// Committed clues no longer contribute; their cells are assigned already.
pub fn coverage_map(
    board: &Board,
    space: &PossibilitySpace,
    state: &BranchState,
) -> Array2<u32> {
    let mut coverage = Array2::zeros((board.height(), board.width()));
    for clue in 0..space.clue_count() {
        if state.is_committed(clue) {
            continue;
        }
        for index in state.viable_indices(clue) {
            let Some(placement) = space.placements(clue).get(index) else {
                continue;
            };
            for cell in placement.cells() {
                if let Some(count) = coverage.get_mut((cell.row, cell.col)) {
                    *count += 1;
                }
            }
        }
    }
    coverage
}

/// Whether cells beyond any clue's reach can no longer be rescued
///
/// Cells no viable placement covers are not infeasible outright: the
/// search may still absorb them into a final unclued free rectangle. They
/// doom the branch only when that is provably impossible — every future
/// free rectangle must contain their bounding box, so a void, assigned,
/// or clue cell inside the box rules every one of them out.
pub fn uncoverable_contradiction(
    board: &Board,
    space: &PossibilitySpace,
    state: &BranchState,
) -> bool {
    let coverage = coverage_map(board, space, state);
    let mut bounds: Option<(usize, usize, usize, usize)> = None;

    for ((row, col), &active) in board.active().indexed_iter() {
        if !active
            || state.cells.get((row, col)) != Some(&0)
            || coverage.get((row, col)) != Some(&0)
        {
            continue;
        }
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

    let Some((min_row, max_row, min_col, max_col)) = bounds else {
        return false;
    };

    for row in min_row..=max_row {
        for col in min_col..=max_col {
            let cell = Coord::new(row, col);
            if !board.is_active(cell)
                || state.cells.get((row, col)) != Some(&0)
                || board.clue_at(cell).is_some()
            {
                return true;
            }
        }
    }

    false
}
