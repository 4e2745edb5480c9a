//! PNG export of solved boards
//!
//! Renders one canonical solution as filled cell blocks: rectangle colors
//! cycle a fixed palette keyed by rectangle identity, hairlines separate
//! distinct rectangles, and void cells stay gray. Clue-number overlays are
//! a text-output feature only.

use image::{ImageBuffer, Rgba};

use crate::algorithm::canonical::parse_labels;
use crate::board::grid::Board;
use crate::io::configuration::CELL_PIXELS;
use crate::io::error::{Result, SolverError};

/// Fill colors cycled by rectangle identity, shared with the search GIF
pub(crate) const RECT_PALETTE: [[u8; 4]; 20] = [
    [31, 119, 180, 255],
    [174, 199, 232, 255],
    [255, 127, 14, 255],
    [255, 187, 120, 255],
    [44, 160, 44, 255],
    [152, 223, 138, 255],
    [214, 39, 40, 255],
    [255, 152, 150, 255],
    [148, 103, 189, 255],
    [197, 176, 213, 255],
    [140, 86, 75, 255],
    [196, 156, 148, 255],
    [227, 119, 194, 255],
    [247, 182, 210, 255],
    [127, 127, 127, 255],
    [199, 199, 199, 255],
    [188, 189, 34, 255],
    [219, 219, 141, 255],
    [23, 190, 207, 255],
    [158, 218, 229, 255],
];

/// Fill color for cells no rectangle may cover
pub(crate) const VOID_COLOR: [u8; 4] = [217, 217, 217, 255];

const BORDER_COLOR: [u8; 4] = [255, 255, 255, 255];

/// Palette color for one rectangle label
pub(crate) fn rect_color(label: u32) -> [u8; 4] {
    RECT_PALETTE
        .get(label as usize % RECT_PALETTE.len())
        .copied()
        .unwrap_or(VOID_COLOR)
}

fn label_at(labels: &[Option<u32>], width: usize, row: usize, col: usize) -> Option<u32> {
    labels.get(row * width + col).copied().flatten()
}

/// Export one canonical solution as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The solution string does not decode to one token per board cell
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_solution_png(board: &Board, solution: &str, output_path: &str) -> Result<()> {
    let labels = parse_labels(solution)?;
    if labels.len() != board.height() * board.width() {
        return Err(SolverError::MalformedSolution {
            reason: format!(
                "expected {} tokens, found {}",
                board.height() * board.width(),
                labels.len()
            ),
        });
    }

    let width_px = board.width() as u32 * CELL_PIXELS;
    let height_px = board.height() as u32 * CELL_PIXELS;
    let mut img = ImageBuffer::new(width_px, height_px);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let row = (y / CELL_PIXELS) as usize;
        let col = (x / CELL_PIXELS) as usize;
        let label = label_at(&labels, board.width(), row, col);

        let mut color = label.map_or(VOID_COLOR, rect_color);
        // Hairline wherever the neighboring cell belongs to another rectangle
        if x % CELL_PIXELS == 0 && col > 0 && label_at(&labels, board.width(), row, col - 1) != label
        {
            color = BORDER_COLOR;
        }
        if y % CELL_PIXELS == 0 && row > 0 && label_at(&labels, board.width(), row - 1, col) != label
        {
            color = BORDER_COLOR;
        }

        *pixel = Rgba(color);
    }

    if let Some(parent) = std::path::Path::new(output_path).parent() {
        std::fs::create_dir_all(parent).map_err(|e| SolverError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path).map_err(|e| SolverError::ImageExport {
        path: output_path.into(),
        source: e,
    })?;

    Ok(())
}
