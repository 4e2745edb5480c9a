//! Search trace capture and GIF generation
//!
//! A [`SearchJournal`] records every placement the engine commits and
//! every retraction a backtrack implies, without influencing the search.
//! The recorded trace replays into an animated GIF showing rectangles
//! appearing and dissolving as the search explores and abandons branches.

use image::{Frame, Rgba, RgbaImage};

use crate::board::geometry::{Extent, Placement};
use crate::io::configuration::{GIF_CELL_PIXELS, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{Result, SolverError};
use crate::io::image::{VOID_COLOR, rect_color};

/// One commit or retraction observed during a solve
#[derive(Debug, Clone)]
pub struct SearchEvent {
    /// Rectangle the event concerns
    pub placement: Placement,
    /// Rectangle identifier (`None` for a retraction)
    pub rect_id: Option<u32>,
}

/// Records placements and retractions for visualization
pub struct SearchJournal {
    events: Vec<SearchEvent>,
    extent: Extent,
}

impl SearchJournal {
    /// Create an empty journal for a board of the given dimensions
    pub const fn new(extent: Extent) -> Self {
        Self {
            events: Vec::new(),
            extent,
        }
    }

    /// Record a committed placement
    pub fn record_placement(&mut self, placement: Placement, rect_id: u32) {
        self.events.push(SearchEvent {
            placement,
            rect_id: Some(rect_id),
        });
    }

    /// Position marker for a later [`SearchJournal::retract_to`]
    pub fn mark(&self) -> usize {
        self.events.len()
    }

    /// Retract every placement still live since the marked position
    ///
    /// Appends one retraction per net placement recorded after the mark,
    /// newest first, mirroring how the backtrack unwinds the board.
    pub fn retract_to(&mut self, mark: usize) {
        let mut live: Vec<Placement> = Vec::new();
        for event in self.events.get(mark..).unwrap_or(&[]) {
            match event.rect_id {
                Some(_) => live.push(event.placement),
                None => {
                    if let Some(position) =
                        live.iter().rposition(|placement| *placement == event.placement)
                    {
                        live.remove(position);
                    }
                }
            }
        }
        for placement in live.into_iter().rev() {
            self.events.push(SearchEvent {
                placement,
                rect_id: None,
            });
        }
    }

    /// All recorded events in order
    pub fn events(&self) -> &[SearchEvent] {
        &self.events
    }

    /// Total number of recorded events
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Export the trace as a GIF with automatic frame skipping
    ///
    /// Skips frames when the requested frame rate exceeds what viewers
    /// reliably support, keeping the apparent animation speed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No events were recorded
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &str, frame_delay_ms: u32) -> Result<()> {
        if self.events.is_empty() {
            return Err(SolverError::EmptySearchTrace);
        }

        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms).max(1)
        } else {
            1
        };

        let frames = self.generate_frames(effective_delay_ms, skip_factor as usize)?;

        if let Some(parent) = std::path::Path::new(output_path).parent() {
            std::fs::create_dir_all(parent).map_err(|e| SolverError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| SolverError::FileSystem {
            path: output_path.into(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| SolverError::ImageExport {
                path: output_path.into(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize) -> Result<Vec<Frame>> {
        let mut grid = vec![vec![0_u32; self.extent.width]; self.extent.height];
        let mut frames = Vec::new();

        frames.push(self.render_frame(&grid, delay_ms));

        for (count, event) in self.events.iter().enumerate() {
            let value = event.rect_id.unwrap_or(0);
            for cell in event.placement.cells() {
                if let Some(slot) = grid
                    .get_mut(cell.row)
                    .and_then(|row| row.get_mut(cell.col))
                {
                    *slot = value;
                }
            }
            if (count + 1) % skip_factor == 0 {
                frames.push(self.render_frame(&grid, delay_ms));
            }
        }

        if self.events.len() % skip_factor != 0 {
            frames.push(self.render_frame(&grid, delay_ms));
        }

        // Final frame displays longer for better visibility
        if let Some(last) = frames.last().map(|frame| frame.buffer().clone()) {
            frames.push(Frame::from_parts(
                last,
                0,
                0,
                image::Delay::from_numer_denom_ms(delay_ms * 25, 1),
            ));
        }

        Ok(frames)
    }

    fn render_frame(&self, grid: &[Vec<u32>], delay_ms: u32) -> Frame {
        let width_px = self.extent.width as u32 * GIF_CELL_PIXELS;
        let height_px = self.extent.height as u32 * GIF_CELL_PIXELS;
        let mut img = RgbaImage::new(width_px, height_px);

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let row = (y / GIF_CELL_PIXELS) as usize;
            let col = (x / GIF_CELL_PIXELS) as usize;
            let value = grid.get(row).and_then(|r| r.get(col)).copied().unwrap_or(0);
            let color = if value == 0 {
                VOID_COLOR
            } else {
                rect_color(value - 1)
            };
            *pixel = Rgba(color);
        }

        Frame::from_parts(img, 0, 0, image::Delay::from_numer_denom_ms(delay_ms, 1))
    }
}
