// ShopGuide - ui/panels/saved_layouts.rs
//
// Saved layouts dialog: save the grid under a name, and load or delete
// layouts saved earlier.

use crate::app::state::EditorSession;
use crate::util::constants::MAX_LAYOUT_NAME_CHARS;
use chrono::{Local, Utc};

enum Action {
    Load(String),
    Delete(String),
}

pub fn render(ctx: &egui::Context, state: &mut EditorSession) {
    if !state.show_saved_layouts {
        return;
    }

    let mut open = true;
    let mut save_clicked = false;
    let mut action: Option<Action> = None;

    egui::Window::new("Saved Layouts")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_width(380.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Name:");
                let edit = ui.add(
                    egui::TextEdit::singleline(&mut state.layout_name_input)
                        .char_limit(MAX_LAYOUT_NAME_CHARS)
                        .desired_width(200.0),
                );
                let enter = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let can_save = !state.layout_name_input.trim().is_empty();
                if ui
                    .add_enabled(can_save, egui::Button::new("\u{1f4be} Save"))
                    .on_hover_text("Save the current grid; an existing name is overwritten.")
                    .clicked()
                    || (enter && can_save)
                {
                    save_clicked = true;
                }
            });

            ui.add_space(6.0);
            ui.separator();

            if state.saved_layouts.is_empty() {
                ui.label(egui::RichText::new("No saved layouts yet.").weak());
                return;
            }

            egui::ScrollArea::vertical()
                .max_height(260.0)
                .show(ui, |ui| {
                    egui::Grid::new("saved_layouts_grid")
                        .num_columns(3)
                        .striped(true)
                        .spacing([12.0, 4.0])
                        .show(ui, |ui| {
                            for (name, saved) in &state.saved_layouts {
                                ui.label(name);
                                ui.label(
                                    egui::RichText::new(
                                        saved
                                            .with_timezone(&Local)
                                            .format("%Y-%m-%d %H:%M")
                                            .to_string(),
                                    )
                                    .weak(),
                                );
                                ui.horizontal(|ui| {
                                    if ui.small_button("Load").clicked() {
                                        action = Some(Action::Load(name.clone()));
                                    }
                                    if ui.small_button("Delete").clicked() {
                                        action = Some(Action::Delete(name.clone()));
                                    }
                                });
                                ui.end_row();
                            }
                        });
                });
        });

    if !open {
        state.show_saved_layouts = false;
        return;
    }

    if save_clicked {
        let name = state.layout_name_input.clone();
        state.save_named(&name, Utc::now());
    }
    match action {
        Some(Action::Load(name)) => {
            if state.load_named(&name) {
                state.layout_name_input = name;
                state.show_saved_layouts = false;
            }
        }
        Some(Action::Delete(name)) => state.remove_named(&name),
        None => {}
    }
}
