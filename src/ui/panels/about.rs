// ShopGuide - ui/panels/about.rs
//
// About dialog: shown from View > About.
// Rendered as a centred, non-resizable, non-collapsible window.

use crate::app::state::EditorSession;
use crate::util::constants::{APP_NAME, APP_VERSION};

/// Render the About dialog (if `state.show_about` is true).
pub fn render(ctx: &egui::Context, state: &mut EditorSession) {
    if !state.show_about {
        return;
    }

    let mut open = true;
    egui::Window::new(format!("About {APP_NAME}"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(360.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(8.0);

            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("\u{1f6d2}  ShopGuide").size(28.0).strong());
                ui.add_space(4.0);
                ui.label(egui::RichText::new(format!("v{APP_VERSION}")).size(14.0).weak());
            });

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(8.0);

            ui.vertical_centered(|ui| {
                ui.label("Sketch a shop floor on a 10\u{00d7}10 grid,");
                ui.label("then export it as JSON or keep it as a named layout.");
            });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(6.0);

            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "Tools: {} \u{00b7} Saved layouts: {}",
                        state.palette.registry().len(),
                        state.saved_layouts.len()
                    ))
                    .small()
                    .weak(),
                );
                ui.label(egui::RichText::new("Built with Rust & egui").small().weak());
            });

            ui.add_space(8.0);
        });

    if !open {
        state.show_about = false;
    }
}
