// ShopGuide - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the menu bar, sidebar, canvas, status bar and dialogs.

use crate::app::state::EditorSession;
use crate::core::presets::PRESETS;
use crate::ui;

/// The ShopGuide application.
pub struct ShopGuideApp {
    pub state: EditorSession,
}

impl ShopGuideApp {
    /// Create a new application instance with the given state.
    pub fn new(state: EditorSession) -> Self {
        Self { state }
    }
}

impl eframe::App for ShopGuideApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply(ctx, self.state.dark_mode, self.state.config.font_size);

        let has_cells = !self.state.grid.is_empty();

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Import\u{2026}").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("JSON", &["json"])
                            .pick_file()
                        {
                            self.state.import_from_path(&path);
                        }
                        ui.close_menu();
                    }
                    ui.add_enabled_ui(has_cells, |ui| {
                        if ui.button("Export\u{2026}").clicked() {
                            self.state.begin_export();
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    ui.add_enabled_ui(has_cells, |ui| {
                        if ui.button("Save As Named\u{2026}").clicked() {
                            self.state.open_saved_layouts();
                            ui.close_menu();
                        }
                    });
                    if ui.button("Saved Layouts\u{2026}").clicked() {
                        self.state.open_saved_layouts();
                        ui.close_menu();
                    }
                    ui.add_enabled_ui(has_cells, |ui| {
                        if ui.button("Save to Cloud\u{2026}").clicked() {
                            self.state.begin_cloud_save();
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Layout", |ui| {
                    ui.menu_button("Load Sample", |ui| {
                        for preset in PRESETS {
                            if ui.button(preset.title).clicked() {
                                self.state.load_sample(preset.name);
                                ui.close_menu();
                            }
                        }
                    });
                    ui.add_enabled_ui(has_cells, |ui| {
                        if ui.button("Clear All").clicked() {
                            self.state.clear_all();
                            ui.close_menu();
                        }
                    });
                });
                ui.menu_button("View", |ui| {
                    let mut dark = self.state.dark_mode;
                    if ui.checkbox(&mut dark, "Dark Mode").changed() {
                        self.state.toggle_dark_mode();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Copy Plan as Text").clicked() {
                        ctx.copy_text(self.state.text_plan());
                        self.state.plan_copied();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut text = egui::RichText::new(&self.state.status_message);
                if let Some(colour) = ui::theme::status_colour(self.state.status_level) {
                    text = text.color(colour);
                }
                ui.label(text);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let stats = self.state.grid.stats();
                    ui.label(format!("Area used: {}%", stats.area_used_percent()));
                    ui.separator();
                    let hover = self
                        .state
                        .tracker
                        .hover()
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "--".to_string());
                    ui.label(egui::RichText::new(hover).monospace());
                    if !self.state.warnings.is_empty() {
                        ui.separator();
                        ui.label(
                            egui::RichText::new(format!(
                                "\u{26a0} {} startup warning(s)",
                                self.state.warnings.len()
                            ))
                            .color(egui::Color32::from_rgb(217, 119, 6)), // Amber 600
                        )
                        .on_hover_text(self.state.warnings.join("\n"));
                    }
                });
            });
        });

        // Left sidebar: palette above, statistics below.
        egui::SidePanel::left("sidebar")
            .default_width(ui::theme::SIDEBAR_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("sidebar_scroll")
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui::panels::palette::render(ui, &mut self.state);
                        ui.add_space(8.0);
                        ui.separator();
                        ui::panels::stats::render(ui, &self.state);
                    });
            });

        // Central panel (grid)
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::canvas::render(ui, &mut self.state);
        });

        // Dialogs
        ui::panels::export_dialog::render(ctx, &mut self.state);
        ui::panels::saved_layouts::render(ctx, &mut self.state);
        ui::panels::cloud::render(ctx, &mut self.state);
        ui::panels::import_summary::render(ctx, &mut self.state);
        ui::panels::about::render(ctx, &mut self.state);
    }

    /// Called by eframe when the application window is about to close.
    ///
    /// Saves the current session so the next launch can restore it.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.save_session();
    }
}
