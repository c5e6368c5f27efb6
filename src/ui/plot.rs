use std::ops::RangeInclusive;

use eframe::egui::{TextStyle, Ui};
use egui_plot::{
    log_grid_spacer, Corner, GridMark, Legend, Line, LineStyle, Plot, PlotBounds, PlotPoint, PlotPoints,
};

use crate::chart::{Chart, LegendCorner};
use crate::color::Stroke;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Mass-fraction plot (central panel)
// ---------------------------------------------------------------------------

/// Render the chart title and the log-log plot in the central panel.
pub fn mass_fraction_plot(ui: &mut Ui, state: &mut AppState) {
    let chart = match &state.chart {
        Some(chart) => chart,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a results file to plot  (File → Open…)");
            });
            return;
        }
    };

    let top = ui.cursor().min;
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&chart.title);
    });

    let reset_view = std::mem::take(&mut state.reset_view);
    let (x0, x1) = chart.x_decades;
    let (y0, y1) = chart.y_decades;

    let response = Plot::new("mass_fraction_plot")
        .legend(
            Legend::default()
                .position(legend_corner(chart.legend))
                .text_style(TextStyle::Small),
        )
        .x_axis_label(&chart.x_label)
        .y_axis_label(&chart.y_label)
        .x_axis_formatter(decade_label)
        .y_axis_formatter(decade_label)
        .x_grid_spacer(log_grid_spacer(10))
        .y_grid_spacer(log_grid_spacer(10))
        .label_formatter(hover_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if reset_view {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max([x0, y0], [x1, y1]));
            }
            for series in &chart.series {
                let color = series.style.color.to_color32();
                let style = match series.style.stroke {
                    Stroke::Solid => LineStyle::Solid,
                    Stroke::Dashed => LineStyle::dashed_dense(),
                };
                // Every segment carries the series label so the legend
                // merges them into one entry.
                for segment in &series.segments {
                    let points: PlotPoints = segment.iter().copied().collect();
                    let line = Line::new(points)
                        .name(&series.label)
                        .color(color)
                        .style(style)
                        .width(1.5);
                    plot_ui.line(line);
                }
            }
        });

    state.chart_rect = Some(response.response.rect.union(eframe::egui::Rect::from_min_max(top, top)));
}

fn legend_corner(corner: LegendCorner) -> Corner {
    match corner {
        LegendCorner::RightTop => Corner::RightTop,
        LegendCorner::LeftTop => Corner::LeftTop,
        LegendCorner::LeftBottom => Corner::LeftBottom,
        LegendCorner::RightBottom => Corner::RightBottom,
    }
}

/// Tick label for a log10 coordinate: decades only, as `1e-10`.
fn decade_label(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    let rounded = mark.value.round();
    if (mark.value - rounded).abs() < 1e-6 {
        format!("1e{}", rounded as i64)
    } else {
        String::new()
    }
}

fn hover_label(name: &str, value: &PlotPoint) -> String {
    let t = 10f64.powf(value.x);
    let x = 10f64.powf(value.y);
    if name.is_empty() {
        format!("t = {t:.3e} s\nX = {x:.3e}")
    } else {
        format!("{name}\nt = {t:.3e} s\nX = {x:.3e}")
    }
}
