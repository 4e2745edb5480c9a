//! Batch progress display for directory processing

use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Puzzles: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

static FILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Coordinates progress display for batch solves
///
/// A batch bar tracks the file count while a spinner names the puzzle
/// currently being solved. Solves have no predictable iteration count, so
/// per-file progress stays indeterminate.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bar: None,
        }
    }

    /// Initialize the batch bar for the given file count
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > 1 {
            let bar = ProgressBar::new(file_count as u64);
            bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(bar));
        }
    }

    /// Show a spinner for the puzzle being solved
    pub fn start_file(&mut self, path: &Path) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(FILE_STYLE.clone());
        spinner.set_message(
            path.file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        );
        spinner.enable_steady_tick(Duration::from_millis(120));
        self.file_bar = Some(self.multi_progress.add(spinner));
    }

    /// Clear the file spinner and advance the batch bar
    pub fn complete_file(&mut self) {
        if let Some(spinner) = self.file_bar.take() {
            spinner.finish_and_clear();
        }
        if let Some(batch) = &self.batch_bar {
            batch.inc(1);
        }
    }

    /// Run output-producing work without corrupting the bars
    pub fn suspend<T>(&self, work: impl FnOnce() -> T) -> T {
        self.multi_progress.suspend(work)
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(batch) = &self.batch_bar {
            batch.finish_with_message("All puzzles processed");
        }
        let _ = self.multi_progress.clear();
    }
}
