//! Rectangle placement enumeration per clue
//!
//! For every clue this module enumerates each rectangle that could satisfy
//! it: every divisor pair of the clue value, both orientations of
//! non-square shapes, and every alignment of the clue cell inside the
//! rectangle. The resulting placement lists are immutable for the rest of
//! the solve; search branches only narrow viability flags over them.

use crate::board::geometry::{Coord, Extent, Placement};
use crate::board::grid::{Board, Clue};

/// All candidate placements for every clue, in generation order
///
/// Generation order is deterministic: divisor pairs ascending, base
/// orientation before its rotation, column alignment outer and row
/// alignment inner. The search iterates placements in exactly this order,
/// which keeps the first-found solution stable across runs.
#[derive(Debug)]
pub struct PossibilitySpace {
    per_clue: Vec<Vec<Placement>>,
}

impl PossibilitySpace {
    /// Enumerate every legal placement for each clue of the board
    pub fn generate(board: &Board) -> Self {
        let per_clue = board
            .clues()
            .iter()
            .map(|clue| placements_for(board, clue))
            .collect();
        Self { per_clue }
    }

    /// Number of clues covered by this space
    pub fn clue_count(&self) -> usize {
        self.per_clue.len()
    }

    /// Candidate placements of one clue, in generation order
    pub fn placements(&self, clue: usize) -> &[Placement] {
        self.per_clue.get(clue).map_or(&[], Vec::as_slice)
    }

    /// First clue with no legal placement at all, if any
    ///
    /// Such a clue proves the whole board unsolvable before any search.
    pub fn infeasible_clue(&self) -> Option<usize> {
        self.per_clue.iter().position(|placements| placements.is_empty())
    }
}

/// Integer divisor pairs `(d, n / d)` of the clue value, `d` ascending
fn divisor_pairs(area: u32) -> impl Iterator<Item = (u32, u32)> {
    (1..=area.isqrt()).filter_map(move |d| (area % d == 0).then_some((d, area / d)))
}

/// Every placement of one clue satisfying the placement invariant
fn placements_for(board: &Board, clue: &Clue) -> Vec<Placement> {
    let mut found = Vec::new();

    for (d, q) in divisor_pairs(clue.area) {
        let base = Extent::new(q as usize, d as usize);
        let orientations = if base.is_square() {
            // A square repeats under rotation, enumerate it once
            vec![base]
        } else {
            vec![base, base.rotated()]
        };

        for extent in orientations {
            // Slide the clue cell over every interior alignment
            for col_offset in 0..extent.width {
                for row_offset in 0..extent.height {
                    let Some(row) = clue.coord.row.checked_sub(row_offset) else {
                        continue;
                    };
                    let Some(col) = clue.coord.col.checked_sub(col_offset) else {
                        continue;
                    };
                    let placement = Placement::new(Coord::new(row, col), extent);
                    if board.fits(&placement)
                        && board.covers_only_active(&placement)
                        && !contains_other_clue(board, &placement, clue.coord)
                    {
                        found.push(placement);
                    }
                }
            }
        }
    }

    found
}

/// Whether the rectangle covers any clue cell other than its own
fn contains_other_clue(board: &Board, placement: &Placement, own: Coord) -> bool {
    board
        .clues()
        .iter()
        .any(|clue| clue.coord != own && placement.contains(clue.coord))
}

#[cfg(test)]
mod tests {
    use super::PossibilitySpace;
    use crate::board::geometry::{Coord, Extent};
    use crate::board::grid::Board;

    #[test]
    fn full_board_clue_has_single_placement() {
        let board = Board::fully_active(Extent::new(2, 2), vec![(Coord::new(0, 0), 4)]);
        let Ok(board) = board else {
            unreachable!();
        };
        let space = PossibilitySpace::generate(&board);
        assert_eq!(space.placements(0).len(), 1);
        assert_eq!(space.placements(0).first().map(|p| p.area()), Some(4));
    }

    #[test]
    fn oversized_clue_is_infeasible() {
        let board = Board::fully_active(Extent::new(2, 2), vec![(Coord::new(0, 0), 3)]);
        let Ok(board) = board else {
            unreachable!();
        };
        let space = PossibilitySpace::generate(&board);
        assert_eq!(space.infeasible_clue(), Some(0));
    }

    #[test]
    fn placements_exclude_other_clue_cells() {
        let board = Board::fully_active(
            Extent::new(1, 4),
            vec![(Coord::new(0, 0), 2), (Coord::new(0, 2), 2)],
        );
        let Ok(board) = board else {
            unreachable!();
        };
        let space = PossibilitySpace::generate(&board);
        // The left clue can only extend right; sliding left leaves the board
        assert_eq!(space.placements(0).len(), 1);
        // The right clue may start at its own cell or one to the left
        assert_eq!(space.placements(1).len(), 2);
    }

    #[test]
    fn rotated_orientation_is_generated_once() {
        let board = Board::fully_active(Extent::new(3, 3), vec![(Coord::new(1, 1), 9)]);
        let Ok(board) = board else {
            unreachable!();
        };
        let space = PossibilitySpace::generate(&board);
        // 9 = 1x9 / 9x1 (out of bounds) and 3x3 centered on the clue
        assert_eq!(space.placements(0).len(), 1);
    }
}
