use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.chart.is_some();
            if ui.add_enabled(can_export, egui::Button::new("Save PNG…")).clicked() {
                save_file_dialog(ui.ctx(), state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        if ui.button("Reset view").clicked() {
            state.reset_view = true;
        }

        ui.separator();

        if let Some(path) = &state.source {
            ui.label(format!("{}  ({} rows)", path.display(), state.n_rows));
        }

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open burn results")
        .add_filter("Supported files", &["dat", "txt", "csv", "json", "parquet", "pq"])
        .add_filter("Text table", &["dat", "txt"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

/// Ask for a destination and request a screenshot; the image arrives as an
/// input event on a later frame (see `app.rs`).
pub fn save_file_dialog(ctx: &egui::Context, state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save chart as PNG")
        .add_filter("PNG", &["png"])
        .set_file_name("mass_fractions.png")
        .save_file();

    if let Some(path) = file {
        state.pending_export = Some(path);
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
    }
}
