//! The fixed set of plotted species and the chart annotations.

use crate::color::SeriesStyle;

/// Name of the time column shared by every series.
pub const TIME_COLUMN: &str = "tnow";

pub const X_LABEL: &str = "time (sec)";
pub const Y_LABEL: &str = "mass fraction";
pub const TITLE: &str = "hydrostatic burn; T = 15 MK; rho = 150 g/cm^3";

/// Visible time range in seconds.
pub const X_RANGE: (f64, f64) = (1.0e2, 1.0e22);
/// Visible mass-fraction range.
pub const Y_RANGE: (f64, f64) = (1.0e-10, 1.0e1);

/// One plotted species: table column, legend label and line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesSpec {
    pub column: &'static str,
    pub label: &'static str,
    /// matplotlib-style format string, see [`SeriesStyle::parse`].
    pub format: &'static str,
}

impl SpeciesSpec {
    pub const fn new(column: &'static str, label: &'static str, format: &'static str) -> Self {
        SpeciesSpec { column, label, format }
    }

    pub fn style(&self) -> Option<SeriesStyle> {
        SeriesStyle::parse(self.format)
    }
}

/// The thirteen CNO species in plotting order. Solid lines for the first
/// seven, dashed for the rest.
pub const CNO_SPECIES: [SpeciesSpec; 13] = [
    SpeciesSpec::new("he4", "He4", "b-"),
    SpeciesSpec::new("c12", "C12", "g-"),
    SpeciesSpec::new("n13", "N13", "r-"),
    SpeciesSpec::new("c13", "C13", "c-"),
    SpeciesSpec::new("n14", "N14", "m-"),
    SpeciesSpec::new("o15", "O15", "y-"),
    SpeciesSpec::new("n15", "N15", "k-"),
    SpeciesSpec::new("o16", "O16", "b--"),
    SpeciesSpec::new("f17", "F17", "g--"),
    SpeciesSpec::new("o17", "O17", "r--"),
    SpeciesSpec::new("f18", "F18", "c--"),
    SpeciesSpec::new("o18", "O18", "m--"),
    SpeciesSpec::new("h1", "H1", "y--"),
];
