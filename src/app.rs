use eframe::egui;

use crate::error::{Error, Result};
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ViewerApp {
    pub state: AppState,
}

impl ViewerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Screenshots requested by File → Save PNG… ----
        let screenshot = ctx.input(|i| {
            i.raw.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        if let Some(image) = screenshot {
            self.state.finish_export(&image, ctx.pixels_per_point());
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: title + plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::mass_fraction_plot(ui, &mut self.state);
        });
    }
}

/// Open the viewer window and block until the user closes it.
pub fn run(state: AppState) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    log::info!("Starting viewer");
    eframe::run_native(
        "CNO Viewer – Mass Fractions",
        options,
        Box::new(|cc| {
            // Dark lines (k, b) need a light background.
            cc.egui_ctx.set_theme(egui::Theme::Light);
            Ok(Box::new(ViewerApp::new(state)))
        }),
    )
    .map_err(|e| Error::DisplayUnavailable(e.to_string()))?;
    log::info!("Viewer closed");
    Ok(())
}
