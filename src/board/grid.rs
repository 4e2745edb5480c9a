//! Puzzle board construction and validation
//!
//! A [`Board`] is the immutable puzzle shape: dimensions, the area clues in
//! input order, and the active-cell mask. All structural invariants are
//! checked at construction; the solving pipeline can then assume a
//! well-formed board throughout.

use ndarray::Array2;

use crate::board::geometry::{Coord, Extent, Placement};
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, invalid_board, invalid_clue};

/// An area clue fixed to one board cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clue {
    /// Cell carrying the clue
    pub coord: Coord,
    /// Required area of the rectangle containing the cell
    pub area: u32,
}

/// Immutable puzzle description
///
/// Clues keep their input order; that order is the final tie-break of the
/// branch selection heuristic, so two loads of the same puzzle text explore
/// the search tree identically.
#[derive(Debug, Clone)]
pub struct Board {
    extent: Extent,
    clues: Vec<Clue>,
    active: Array2<bool>,
}

impl Board {
    /// Create a board from its dimensions, clues, and active-cell mask
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero or exceeds the grid dimension limit
    /// - The mask shape does not match the given extent
    /// - A clue lies out of bounds, on a void cell, or on another clue
    /// - A clue value is zero
    pub fn new(extent: Extent, clues: Vec<(Coord, u32)>, active: Array2<bool>) -> Result<Self> {
        if extent.height == 0 || extent.width == 0 {
            return Err(invalid_board(&"board dimensions must be positive"));
        }
        if extent.height > MAX_GRID_DIMENSION || extent.width > MAX_GRID_DIMENSION {
            return Err(invalid_board(&format!(
                "board dimensions exceed the {MAX_GRID_DIMENSION} cell limit"
            )));
        }
        if active.dim() != (extent.height, extent.width) {
            return Err(invalid_board(&"active mask shape does not match grid size"));
        }

        let mut seen = Array2::from_elem(active.dim(), false);
        let mut checked = Vec::with_capacity(clues.len());

        for (coord, area) in clues {
            let Coord { row, col } = coord;
            if row >= extent.height || col >= extent.width {
                return Err(invalid_clue(row, col, &"coordinate is out of bounds"));
            }
            if active.get((row, col)) != Some(&true) {
                return Err(invalid_clue(row, col, &"clue placed on a void cell"));
            }
            if area == 0 {
                return Err(invalid_clue(row, col, &"clue value must be positive"));
            }
            match seen.get_mut((row, col)) {
                Some(cell) if !*cell => *cell = true,
                _ => return Err(invalid_clue(row, col, &"cell already carries a clue")),
            }
            checked.push(Clue { coord, area });
        }

        Ok(Self {
            extent,
            clues: checked,
            active,
        })
    }

    /// Create a board with every cell active
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`Board::new`]
    pub fn fully_active(extent: Extent, clues: Vec<(Coord, u32)>) -> Result<Self> {
        let active = Array2::from_elem((extent.height, extent.width), true);
        Self::new(extent, clues, active)
    }

    /// Board dimensions
    pub const fn extent(&self) -> Extent {
        self.extent
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.extent.height
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.extent.width
    }

    /// Clues in input order
    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    /// Active-cell mask, `true` for solvable cells
    pub const fn active(&self) -> &Array2<bool> {
        &self.active
    }

    /// Whether the cell is active (in bounds and not void)
    pub fn is_active(&self, cell: Coord) -> bool {
        self.active.get((cell.row, cell.col)) == Some(&true)
    }

    /// Number of cells a solution must cover
    pub fn active_cell_count(&self) -> usize {
        self.active.iter().filter(|&&cell| cell).count()
    }

    /// The clue value at the given cell, if any
    pub fn clue_at(&self, cell: Coord) -> Option<u32> {
        self.clues
            .iter()
            .find(|clue| clue.coord == cell)
            .map(|clue| clue.area)
    }

    /// Whether the placement lies entirely within board bounds
    pub const fn fits(&self, placement: &Placement) -> bool {
        placement.end_row() <= self.extent.height && placement.end_col() <= self.extent.width
    }

    /// Whether the placement covers active cells only
    pub fn covers_only_active(&self, placement: &Placement) -> bool {
        placement.cells().all(|cell| self.is_active(cell))
    }
}

#[cfg(test)]
mod tests {
    use super::{Board, Coord, Extent};
    use ndarray::Array2;

    #[test]
    fn rejects_mismatched_mask_shape() {
        let mask = Array2::from_elem((2, 3), true);
        let board = Board::new(Extent::new(3, 2), vec![], mask);
        assert!(board.is_err());
    }

    #[test]
    fn rejects_clue_on_void_cell() {
        let mut mask = Array2::from_elem((2, 2), true);
        if let Some(cell) = mask.get_mut((0, 1)) {
            *cell = false;
        }
        let board = Board::new(Extent::new(2, 2), vec![(Coord::new(0, 1), 2)], mask);
        assert!(board.is_err());
    }

    #[test]
    fn rejects_zero_area_and_duplicate_clues() {
        let zero = Board::fully_active(Extent::new(2, 2), vec![(Coord::new(0, 0), 0)]);
        assert!(zero.is_err());

        let duplicate = Board::fully_active(
            Extent::new(2, 2),
            vec![(Coord::new(0, 0), 2), (Coord::new(0, 0), 2)],
        );
        assert!(duplicate.is_err());
    }

    #[test]
    fn counts_active_cells_under_mask() {
        let mut mask = Array2::from_elem((2, 3), true);
        if let Some(cell) = mask.get_mut((1, 2)) {
            *cell = false;
        }
        let board = Board::new(Extent::new(2, 3), vec![], mask).ok();
        assert!(board.is_some_and(|b| b.active_cell_count() == 5));
    }
}
