// ShopGuide - ui/panels/export_dialog.rs
//
// Export prompt: asks for the shop name, then picks the destination file.
// Cancel (or closing the window) exports under the fallback name; the file
// dialog is where the export itself is abandoned.

use crate::app::state::EditorSession;
use chrono::Utc;

pub fn render(ctx: &egui::Context, state: &mut EditorSession) {
    if !state.show_export_dialog {
        return;
    }

    let mut open = true;
    let mut confirmed = false;
    let mut cancelled = false;

    egui::Window::new("Export Layout")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(340.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label("Shop name:");
            let edit = ui.add(
                egui::TextEdit::singleline(&mut state.shop_name)
                    .hint_text(crate::util::constants::FALLBACK_SHOP_NAME)
                    .desired_width(f32::INFINITY),
            );
            if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                confirmed = true;
            }

            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(format!(
                    "{} cells will be written.",
                    state.grid.stats().total_placed()
                ))
                .small()
                .weak(),
            );

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Export\u{2026}").clicked() {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });

    let input = if !open || cancelled {
        None
    } else if confirmed {
        Some(state.shop_name.clone())
    } else {
        return;
    };
    let Some(doc) = state.finish_export_prompt(input.as_deref(), Utc::now()) else {
        return;
    };
    let file_name = EditorSession::export_file_name(&doc);
    if let Some(dest) = rfd::FileDialog::new()
        .add_filter("JSON", &["json"])
        .set_file_name(&file_name)
        .save_file()
    {
        state.write_export(&doc, &dest);
    }
}
