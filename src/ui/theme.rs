// ShopGuide - ui/theme.rs
//
// Colour scheme, tool kind colour mapping, and layout constants.
// Reads only enums from app and core; no business logic.

use crate::app::state::StatusLevel;
use crate::core::model::ToolKind;
use egui::Color32;

/// Apply the light/dark visuals and the body font size.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
    ctx.style_mut(|style| {
        if let Some(body) = style.text_styles.get_mut(&egui::TextStyle::Body) {
            body.size = font_size;
        }
        if let Some(button) = style.text_styles.get_mut(&egui::TextStyle::Button) {
            button.size = font_size;
        }
    });
}

/// Fill colour of a cell holding `kind`.
pub fn kind_fill(kind: &ToolKind, dark_mode: bool) -> Color32 {
    match (kind, dark_mode) {
        (ToolKind::Wall, false) => Color32::from_rgb(156, 163, 175), // Gray 400
        (ToolKind::Wall, true) => Color32::from_rgb(75, 85, 99),     // Gray 600
        (ToolKind::Shelf, false) => Color32::from_rgb(253, 230, 138), // Amber 200
        (ToolKind::Shelf, true) => Color32::from_rgb(146, 64, 14),   // Amber 800
        (ToolKind::Cooling, false) => Color32::from_rgb(186, 230, 253), // Sky 200
        (ToolKind::Cooling, true) => Color32::from_rgb(7, 89, 133),  // Sky 800
        (ToolKind::Entrance, false) => Color32::from_rgb(187, 247, 208), // Green 200
        (ToolKind::Entrance, true) => Color32::from_rgb(22, 101, 52), // Green 800
        (ToolKind::Cash, false) => Color32::from_rgb(254, 215, 170), // Orange 200
        (ToolKind::Cash, true) => Color32::from_rgb(154, 52, 18),    // Orange 800
        (ToolKind::Custom(_), false) => Color32::from_rgb(221, 214, 254), // Violet 200
        (ToolKind::Custom(_), true) => Color32::from_rgb(91, 33, 182), // Violet 800
    }
}

/// Fill colour of an empty cell.
pub fn empty_fill(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(31, 41, 55) // Gray 800
    } else {
        Color32::from_rgb(249, 250, 251) // Gray 50
    }
}

/// Grid line colour.
pub fn grid_line(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(55, 65, 81) // Gray 700
    } else {
        Color32::from_rgb(209, 213, 219) // Gray 300
    }
}

/// Outline of the hovered cell.
pub const HOVER_STROKE: Color32 = Color32::from_rgb(59, 130, 246); // Blue 500

/// Status line text colour for a level, or `None` for the default.
pub fn status_colour(level: StatusLevel) -> Option<Color32> {
    match level {
        StatusLevel::Info => None,
        StatusLevel::Warning => Some(Color32::from_rgb(217, 119, 6)), // Amber 600
        StatusLevel::Error => Some(Color32::from_rgb(220, 38, 38)),   // Red 600
    }
}

/// Layout constants.
pub const SIDEBAR_WIDTH: f32 = 220.0;
/// Width of the row-letter column and height of the column-number row,
/// as a fraction of the cell size.
pub const HEADER_RATIO: f32 = 0.6;
/// Glyph size as a fraction of the cell size.
pub const GLYPH_RATIO: f32 = 0.55;
