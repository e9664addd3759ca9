// ShopGuide - ui/panels/cloud.rs
//
// Cloud hand-off dialog. The application never uploads anything itself:
// it opens the configured storage console and, optionally, the export
// prompt so the user can upload the written file.

use crate::app::state::EditorSession;

pub fn render(ctx: &egui::Context, state: &mut EditorSession) {
    if !state.show_cloud_dialog {
        return;
    }

    let mut open = true;
    let mut proceed = false;
    let mut cancelled = false;

    egui::Window::new("Save to Cloud")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(380.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("Layouts are shared by uploading an exported JSON file.");
            ui.label("Continue opens your storage console in the browser:");
            ui.add_space(4.0);
            ui.label(egui::RichText::new(&state.config.cloud_console_url).monospace());

            ui.add_space(8.0);
            ui.checkbox(
                &mut state.cloud_export_copy,
                "Also export the layout to a file now",
            );

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Continue").clicked() {
                    proceed = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });

    if !open || cancelled {
        state.show_cloud_dialog = false;
    } else if proceed {
        state.confirm_cloud_save();
    }
}
