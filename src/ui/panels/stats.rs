// ShopGuide - ui/panels/stats.rs
//
// Live statistics (left sidebar, below the palette).

use crate::app::state::EditorSession;

pub fn render(ui: &mut egui::Ui, state: &EditorSession) {
    let stats = state.grid.stats();

    ui.strong("Statistics");
    ui.add_space(4.0);
    egui::Grid::new("stats_overview")
        .num_columns(2)
        .spacing([16.0, 4.0])
        .show(ui, |ui| {
            ui.label("Shelves:");
            ui.label(stats.shelf_count().to_string());
            ui.end_row();

            ui.label("Checkouts:");
            ui.label(stats.cash_count().to_string());
            ui.end_row();

            ui.label("Elements:");
            ui.label(stats.total_placed().to_string());
            ui.end_row();

            ui.label("Area used:");
            ui.label(format!("{}%", stats.area_used_percent()));
            ui.end_row();
        });

    if stats.is_empty() {
        return;
    }

    ui.add_space(6.0);
    egui::CollapsingHeader::new("By element")
        .default_open(false)
        .show(ui, |ui| {
            egui::Grid::new("stats_by_kind")
                .num_columns(2)
                .striped(true)
                .spacing([16.0, 2.0])
                .show(ui, |ui| {
                    for (kind, count) in stats.counts() {
                        let caption = state
                            .palette
                            .registry()
                            .for_kind(kind)
                            .map(|t| t.caption())
                            .unwrap_or_else(|| kind.id().to_string());
                        ui.label(caption);
                        ui.label(count.to_string());
                        ui.end_row();
                    }
                });
        });
}
