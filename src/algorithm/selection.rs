//! Branch clue selection heuristic
//!
//! When propagation stalls the search must guess, and the guess order
//! decides how much of the tree gets pruned. The heuristic is fully
//! deterministic so repeated runs explore identical trees.

use crate::algorithm::possibilities::PossibilitySpace;
use crate::algorithm::propagation::BranchState;
use crate::board::geometry::Placement;

/// Pick the clue to branch on, if any remains uncommitted
///
/// Selection order: fewest viable placements first (smallest branching
/// factor), ties broken by the larger maximal placement area (big shapes
/// resolve spatial conflicts early), remaining ties by clue input order.
pub fn select_branch_clue(space: &PossibilitySpace, state: &BranchState) -> Option<usize> {
    let mut best: Option<(usize, usize, usize)> = None;

    for clue in 0..space.clue_count() {
        if state.is_committed(clue) {
            continue;
        }
        let count = state.viable_count(clue);
        let largest = state
            .viable_indices(clue)
            .filter_map(|index| space.placements(clue).get(index))
            .map(Placement::area)
            .max()
            .unwrap_or(0);

        let better = match best {
            None => true,
            Some((best_count, best_largest, _)) => {
                count < best_count || (count == best_count && largest > best_largest)
            }
        };
        if better {
            best = Some((count, largest, clue));
        }
    }

    best.map(|(_, _, clue)| clue)
}
