// ShopGuide - ui/panels/palette.rs
//
// Tool palette (left sidebar, top): one selectable button per tool, the
// active tool, and the Clear All action.

use crate::app::state::EditorSession;

/// Render the tool palette.
pub fn render(ui: &mut egui::Ui, state: &mut EditorSession) {
    ui.strong("Tools");
    ui.add_space(4.0);

    // Collected first: selecting mutably borrows the palette.
    let mut clicked: Option<String> = None;
    for tool in state.palette.registry().tools() {
        let selected = state.palette.is_active(&tool.id);
        let button = ui
            .add_sized(
                [ui.available_width(), 28.0],
                egui::SelectableLabel::new(selected, tool.caption()),
            )
            .on_hover_text(if tool.is_builtin {
                tool.label.clone()
            } else {
                format!("{} (user tool '{}')", tool.label, tool.id)
            });
        if button.clicked() && !selected {
            clicked = Some(tool.id.clone());
        }
    }
    if let Some(id) = clicked {
        state.select_tool(&id);
    }

    ui.add_space(6.0);
    ui.label(
        egui::RichText::new(format!("Current: {}", state.palette.active().caption())).small(),
    );

    ui.add_space(6.0);
    let has_cells = !state.grid.is_empty();
    if ui
        .add_enabled(has_cells, egui::Button::new("\u{1f5d1} Clear All"))
        .on_hover_text("Remove every element from the grid. The active tool stays selected.")
        .clicked()
    {
        state.clear_all();
    }
}
