// ShopGuide - ui/panels/canvas.rs
//
// The layout grid (central panel): row letters, column numbers and the
// 10x10 cells. Pointer input is reduced to cell coordinates and handed to
// the editor state; painting policy lives in core::interaction.

use crate::app::state::EditorSession;
use crate::core::interaction::PointerInput;
use crate::core::model::Coordinate;
use crate::ui::theme;
use crate::util::constants::{GRID_COLS, GRID_ROWS};

/// Render the grid and feed pointer input into `state`.
pub fn render(ui: &mut egui::Ui, state: &mut EditorSession) {
    let cell = state.config.cell_size;
    let header = cell * theme::HEADER_RATIO;
    let size = egui::vec2(
        header + cell * GRID_COLS as f32,
        header + cell * GRID_ROWS as f32,
    );

    egui::ScrollArea::both()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
            let cells_origin = response.rect.min + egui::vec2(header, header);

            handle_pointer(ui, &response, state, cells_origin, cell);

            let dark = state.dark_mode;
            let text_colour = ui.visuals().text_color();
            let header_font = egui::FontId::proportional(header * 0.5);
            let glyph_font = egui::FontId::proportional(cell * theme::GLYPH_RATIO);

            for col in 1..=GRID_COLS {
                let centre = egui::pos2(
                    cells_origin.x + (col as f32 - 0.5) * cell,
                    response.rect.min.y + header * 0.5,
                );
                painter.text(
                    centre,
                    egui::Align2::CENTER_CENTER,
                    col.to_string(),
                    header_font.clone(),
                    text_colour,
                );
            }

            for (coord, placement) in state.grid.cells() {
                let rect = cell_rect(cells_origin, cell, coord);
                if coord.column() == 1 {
                    painter.text(
                        egui::pos2(response.rect.min.x + header * 0.5, rect.center().y),
                        egui::Align2::CENTER_CENTER,
                        coord.row_letter().to_string(),
                        header_font.clone(),
                        text_colour,
                    );
                }

                let fill = match placement {
                    Some(p) => theme::kind_fill(&p.kind, dark),
                    None => theme::empty_fill(dark),
                };
                painter.rect_filled(rect, 2.0, fill);
                painter.rect_stroke(
                    rect,
                    2.0,
                    egui::Stroke::new(1.0, theme::grid_line(dark)),
                    egui::StrokeKind::Inside,
                );
                if let Some(p) = placement {
                    painter.text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        &p.glyph,
                        glyph_font.clone(),
                        text_colour,
                    );
                }
            }

            if let Some(hover) = state.tracker.hover() {
                painter.rect_stroke(
                    cell_rect(cells_origin, cell, hover),
                    2.0,
                    egui::Stroke::new(2.0, theme::HOVER_STROKE),
                    egui::StrokeKind::Inside,
                );
            }

            response.on_hover_cursor(egui::CursorIcon::Crosshair);
        });
}

fn handle_pointer(
    ui: &egui::Ui,
    response: &egui::Response,
    state: &mut EditorSession,
    cells_origin: egui::Pos2,
    cell: f32,
) {
    let (pos, pressed, down) = ui.input(|i| {
        (
            i.pointer.hover_pos(),
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
        )
    });
    let over = pos
        .filter(|_| response.hovered() || response.dragged())
        .and_then(|p| cell_at(cells_origin, cell, p));

    let input = match over {
        Some(coord) if pressed && response.hovered() => PointerInput::Pressed(coord),
        _ => PointerInput::Moved {
            over,
            primary_down: down,
        },
    };
    if state.pointer(input) {
        ui.ctx().request_repaint();
    }
}

/// Screen rectangle of `coord`.
fn cell_rect(cells_origin: egui::Pos2, cell: f32, coord: Coordinate) -> egui::Rect {
    let min = cells_origin
        + egui::vec2(
            (coord.column() - 1) as f32 * cell,
            coord.row_index() as f32 * cell,
        );
    egui::Rect::from_min_size(min, egui::vec2(cell, cell))
}

/// Cell under `pos`, or `None` outside the grid (headers included).
fn cell_at(cells_origin: egui::Pos2, cell: f32, pos: egui::Pos2) -> Option<Coordinate> {
    let rel = pos - cells_origin;
    if rel.x < 0.0 || rel.y < 0.0 || cell <= 0.0 {
        return None;
    }
    let col = (rel.x / cell) as usize;
    let row = (rel.y / cell) as usize;
    Coordinate::new(row, col + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_at_maps_positions_to_coordinates() {
        let origin = egui::pos2(30.0, 30.0);
        let at = |x: f32, y: f32| cell_at(origin, 48.0, egui::pos2(x, y)).map(|c| c.to_string());

        assert_eq!(at(31.0, 31.0).as_deref(), Some("A-01"));
        assert_eq!(at(30.0 + 48.0 * 9.5, 30.0 + 48.0 * 9.5).as_deref(), Some("J-10"));
        assert_eq!(at(30.0 + 48.0 * 2.5, 30.0 + 48.0 * 1.5).as_deref(), Some("B-03"));
        // Header strip and beyond the last column.
        assert_eq!(at(10.0, 60.0), None);
        assert_eq!(at(30.0 + 48.0 * 10.0 + 1.0, 60.0), None);
    }

    #[test]
    fn test_cell_rect_inverts_cell_at() {
        let origin = egui::pos2(0.0, 0.0);
        for coord in Coordinate::all() {
            let rect = cell_rect(origin, 40.0, coord);
            assert_eq!(cell_at(origin, 40.0, rect.center()), Some(coord));
        }
    }
}
