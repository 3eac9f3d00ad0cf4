use eframe::egui::{self, Color32, RichText, Ui};

use crate::export::OutputFormat;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(state.summary());

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export figure")
        .set_file_name("camera-settings.png")
        .add_filter("Supported files", &OutputFormat::EXTENSIONS)
        .add_filter("PNG image", &["png"])
        .add_filter("CSV counts", &["csv"])
        .add_filter("JSON report", &["json"])
        .save_file();

    if let Some(path) = file {
        state.export(&path);
    }
}
