// ShopGuide - ui/panels/import_summary.rs
//
// Import summary dialog: shown after an interactive import while
// `state.import_summary` is set.

use crate::app::state::EditorSession;
use chrono::Local;

pub fn render(ctx: &egui::Context, state: &mut EditorSession) {
    let Some(summary) = state.import_summary.as_ref() else {
        return;
    };

    let mut open = true;
    let mut dismissed = false;

    egui::Window::new("Layout Imported")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(300.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("import_summary_grid")
                .num_columns(2)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Shop:");
                    ui.strong(&summary.shop_name);
                    ui.end_row();

                    ui.label("Created:");
                    ui.label(match summary.created_at {
                        Some(t) => t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
                        None => "unknown".to_string(),
                    });
                    ui.end_row();

                    ui.label("Shelves:");
                    ui.label(summary.shelves.to_string());
                    ui.end_row();

                    ui.label("Elements:");
                    ui.label(summary.total.to_string());
                    ui.end_row();
                });

            if summary.ignored > 0 {
                ui.add_space(6.0);
                ui.label(
                    egui::RichText::new(format!(
                        "{} entr{} outside this grid were skipped.",
                        summary.ignored,
                        if summary.ignored == 1 { "y" } else { "ies" }
                    ))
                    .color(egui::Color32::from_rgb(217, 119, 6)), // Amber 600
                );
            }
            if summary.applied != summary.total {
                ui.label(
                    egui::RichText::new(format!("{} cells placed on the grid.", summary.applied))
                        .small()
                        .weak(),
                );
            }

            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if !open || dismissed {
        state.import_summary = None;
    }
}
