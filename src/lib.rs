//! Mass-fraction viewer for CNO-cycle burn results.
//!
//! The pipeline is two steps: [`data::load`] reads the simulation output into
//! a [`Table`], then [`render`] plots the thirteen tracked species on log-log
//! axes in an interactive window. The [`network`] module holds the burn
//! network that writes such tables in the first place.

pub mod app;
pub mod chart;
pub mod color;
pub mod data;
pub mod error;
pub mod network;
pub mod species;
pub mod state;
pub mod ui;

pub use chart::Chart;
pub use data::Table;
pub use error::{Error, Result};

use std::path::Path;

use species::SpeciesSpec;

/// Plot `species` against the time column and show the chart, blocking
/// until the window is closed.
///
/// `source` names the file the table came from for the status line, and
/// `delimiter` is used when another text table is opened from the menu.
/// Every species column is checked before the window opens, so a
/// [`Error::MissingColumn`] never leaves a partial chart on screen.
pub fn render(table: &Table, species: &[SpeciesSpec], source: Option<&Path>, delimiter: char) -> Result<()> {
    let chart = Chart::build(table, species)?;
    let mut state = state::AppState::with_chart(chart, source.map(Path::to_path_buf), table.n_rows());
    state.delimiter = delimiter;
    app::run(state)
}
