use std::path::{Path, PathBuf};

use eframe::egui::{ColorImage, Rect};

use crate::chart::Chart;
use crate::data::loader::load_file;
use crate::error::{Error, Result};
use crate::species::CNO_SPECIES;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Chart currently on screen.
    pub chart: Option<Chart>,

    /// File the chart was built from, if any.
    pub source: Option<PathBuf>,

    /// Row count of the loaded table.
    pub n_rows: usize,

    /// Field delimiter for text tables opened from the menu.
    pub delimiter: char,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Snap the plot back to the default decades on the next frame.
    pub reset_view: bool,

    /// Destination of a requested screenshot, until it arrives.
    pub pending_export: Option<PathBuf>,

    /// Screen area of the title and plot, used to crop exports.
    pub chart_rect: Option<Rect>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            chart: None,
            source: None,
            n_rows: 0,
            delimiter: ' ',
            status_message: None,
            reset_view: true,
            pending_export: None,
            chart_rect: None,
        }
    }
}

impl AppState {
    /// State showing an already built chart.
    pub fn with_chart(chart: Chart, source: Option<PathBuf>, n_rows: usize) -> Self {
        Self {
            chart: Some(chart),
            source,
            n_rows,
            ..Self::default()
        }
    }

    /// Load a table and rebuild the chart. On failure the current chart stays
    /// and the error goes to the status line.
    pub fn open(&mut self, path: &Path) {
        match load_chart(path, self.delimiter) {
            Ok((chart, n_rows)) => {
                self.chart = Some(chart);
                self.source = Some(path.to_path_buf());
                self.n_rows = n_rows;
                self.status_message = None;
                self.reset_view = true;
            }
            Err(e) => {
                log::error!("Failed to open {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Write a captured screenshot to the pending export path, if any.
    pub fn finish_export(&mut self, image: &ColorImage, pixels_per_point: f32) {
        let Some(path) = self.pending_export.take() else {
            return;
        };
        let cropped = match self.chart_rect {
            Some(rect) => image.region(&rect, Some(pixels_per_point)),
            None => image.clone(),
        };
        match save_png(&path, &cropped) {
            Ok(()) => {
                log::info!("Exported chart to {}", path.display());
                self.status_message = Some(format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::error!("{e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

/// Load `path` and build the CNO chart from it; returns the row count too.
pub fn load_chart(path: &Path, delimiter: char) -> Result<(Chart, usize)> {
    let table = load_file(path, delimiter)?;
    let chart = Chart::build(&table, &CNO_SPECIES)?;
    Ok((chart, table.n_rows()))
}

/// Save an RGBA screenshot as PNG.
pub fn save_png(path: &Path, image: &ColorImage) -> Result<()> {
    let [width, height] = image.size;
    let bytes: Vec<u8> = image.pixels.iter().flat_map(|c| c.to_array()).collect();
    let buffer = image::RgbaImage::from_raw(width as u32, height as u32, bytes).ok_or_else(|| Error::Export {
        path: path.to_path_buf(),
        reason: "screenshot size does not match its pixel count".to_string(),
    })?;
    buffer.save(path).map_err(|e| Error::Export {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::Color32;

    #[test]
    fn open_missing_file_keeps_state_and_reports() {
        let mut state = AppState::default();
        state.open(Path::new("definitely/not/here.dat"));
        assert!(state.chart.is_none());
        assert!(state.source.is_none());
        let msg = state.status_message.unwrap();
        assert!(msg.contains("here.dat"), "{msg}");
    }

    #[test]
    fn save_png_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let image = ColorImage::new([4, 3], Color32::WHITE);
        save_png(&path, &image).unwrap();
        let loaded = image::open(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (4, 3));
    }

    #[test]
    fn finish_export_without_request_is_a_no_op() {
        let mut state = AppState::default();
        state.finish_export(&ColorImage::new([1, 1], Color32::BLACK), 1.0);
        assert!(state.status_message.is_none());
    }
}
