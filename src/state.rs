use std::path::{Path, PathBuf};

use crate::export::save_report;
use crate::report::Report;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Everything the viewer shows, independent of rendering.
pub struct AppState {
    /// The figure.
    pub report: Report,

    /// Directory the files were harvested from.
    pub source_dir: PathBuf,

    /// Files stepped over while harvesting.
    pub skipped: usize,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(report: Report, source_dir: PathBuf, skipped: usize) -> Self {
        Self {
            report,
            source_dir,
            skipped,
            status_message: None,
        }
    }

    /// Write the figure to `path`, recording the outcome for the top bar.
    pub fn export(&mut self, path: &Path) {
        match save_report(&self.report, path) {
            Ok(()) => {
                self.status_message = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::error!("Failed to export figure: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn summary(&self) -> String {
        let mut text = format!(
            "{} RAW file(s) in {}",
            self.report.files,
            self.source_dir.display()
        );
        if self.skipped > 0 {
            text.push_str(&format!(", {} skipped", self.skipped));
        }
        text
    }
}
