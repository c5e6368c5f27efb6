use crate::color::{LineColor, SeriesStyle, Stroke};
use crate::data::Table;
use crate::error::{Error, Result};
use crate::species::{self, SpeciesSpec};

// ---------------------------------------------------------------------------
// Chart model (backend independent)
// ---------------------------------------------------------------------------

/// Corner of the plot area holding the legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendCorner {
    RightTop,
    LeftTop,
    LeftBottom,
    RightBottom,
}

/// One plotted line. Points are stored as `[log10 x, log10 y]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub style: SeriesStyle,
    /// Runs of consecutive plottable points. A non-positive value cannot be
    /// placed on a log axis and splits the line.
    pub segments: Vec<Vec<[f64; 2]>>,
    /// Rows dropped because a coordinate was non-positive or not finite.
    pub dropped: usize,
}

impl Series {
    pub fn n_points(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }
}

/// Everything the viewer needs to draw: series, axes and annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Default view as decades, `(log10 min, log10 max)`.
    pub x_decades: (f64, f64),
    pub y_decades: (f64, f64),
    pub series: Vec<Series>,
    pub legend: LegendCorner,
}

const FALLBACK_STYLE: SeriesStyle = SeriesStyle {
    color: LineColor::Black,
    stroke: Stroke::Solid,
};

impl Chart {
    /// Pair the time column with every species column.
    ///
    /// Fails with [`Error::MissingColumn`] before building anything when the
    /// time column or any species column is absent. Extra columns are ignored.
    pub fn build(table: &Table, species: &[SpeciesSpec]) -> Result<Self> {
        let time = table
            .column(species::TIME_COLUMN)
            .ok_or_else(|| Error::MissingColumn {
                column: species::TIME_COLUMN.to_string(),
            })?;
        let columns = species
            .iter()
            .map(|spec| {
                table.column(spec.column).ok_or_else(|| Error::MissingColumn {
                    column: spec.column.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if table.is_non_decreasing(species::TIME_COLUMN) == Some(false) {
            log::warn!("time column '{}' is not monotonic; plotting rows in file order", species::TIME_COLUMN);
        }

        let series: Vec<Series> = species
            .iter()
            .zip(columns)
            .map(|(spec, values)| {
                let style = spec.style().unwrap_or_else(|| {
                    log::warn!("unknown line format '{}' for {}", spec.format, spec.label);
                    FALLBACK_STYLE
                });
                log_series(spec.label, style, time, values)
            })
            .collect();

        let dropped: usize = series.iter().map(|s| s.dropped).sum();
        if dropped > 0 {
            log::debug!("{dropped} non-positive points left off the log axes");
        }

        let x_decades = (species::X_RANGE.0.log10(), species::X_RANGE.1.log10());
        let y_decades = (species::Y_RANGE.0.log10(), species::Y_RANGE.1.log10());
        let legend = best_legend_corner(&series, x_decades, y_decades);
        log::info!("Built chart with {} series, legend at {legend:?}", series.len());

        Ok(Chart {
            title: species::TITLE.to_string(),
            x_label: species::X_LABEL.to_string(),
            y_label: species::Y_LABEL.to_string(),
            x_decades,
            y_decades,
            series,
            legend,
        })
    }
}

fn log_series(label: &str, style: SeriesStyle, x: &[f64], y: &[f64]) -> Series {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    let mut dropped = 0;

    for (&xi, &yi) in x.iter().zip(y) {
        if xi > 0.0 && yi > 0.0 && xi.is_finite() && yi.is_finite() {
            current.push([xi.log10(), yi.log10()]);
        } else {
            dropped += 1;
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }

    Series {
        label: label.to_string(),
        style,
        segments,
        dropped,
    }
}

/// Pick the corner whose quadrant of the default view holds the fewest
/// points. Ties resolve in the order upper right, upper left, lower left,
/// lower right.
pub fn best_legend_corner(series: &[Series], x: (f64, f64), y: (f64, f64)) -> LegendCorner {
    const ORDER: [LegendCorner; 4] = [
        LegendCorner::RightTop,
        LegendCorner::LeftTop,
        LegendCorner::LeftBottom,
        LegendCorner::RightBottom,
    ];
    let x_mid = 0.5 * (x.0 + x.1);
    let y_mid = 0.5 * (y.0 + y.1);
    let mut counts = [0usize; 4];

    let points = series.iter().flat_map(|s| s.segments.iter().flatten());
    for &[px, py] in points {
        if px < x.0 || px > x.1 || py < y.0 || py > y.1 {
            continue;
        }
        let corner = match (px >= x_mid, py >= y_mid) {
            (true, true) => LegendCorner::RightTop,
            (false, true) => LegendCorner::LeftTop,
            (false, false) => LegendCorner::LeftBottom,
            (true, false) => LegendCorner::RightBottom,
        };
        if let Some(i) = ORDER.iter().position(|&c| c == corner) {
            counts[i] += 1;
        }
    }

    let mut best = 0;
    for i in 1..ORDER.len() {
        if counts[i] < counts[best] {
            best = i;
        }
    }
    ORDER[best]
}
