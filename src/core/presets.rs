// ShopGuide - core/presets.rs
//
// Built-in sample layouts. Each preset is built from row/column ranges
// rather than a literal cell table, so later fills in a builder
// deliberately overwrite earlier ones (the cooling wall over the top wall).

use crate::core::grid::Grid;
use crate::core::model::{Coordinate, LayoutMap, Placement, ToolKind};
use crate::util::constants::{GRID_COLS, GRID_ROWS};
use crate::util::error::LayoutError;
use std::ops::RangeInclusive;

/// A named sample layout.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    /// Stable name used on the command line and in the session.
    pub name: &'static str,
    /// Menu caption.
    pub title: &'static str,
    build: fn() -> LayoutMap,
}

impl Preset {
    /// The preset's cells.
    pub fn layout(&self) -> LayoutMap {
        (self.build)()
    }
}

/// Every built-in preset in menu order.
pub const PRESETS: &[Preset] = &[
    Preset {
        name: "supermarket-basic",
        title: "Basic supermarket",
        build: supermarket_basic,
    },
    Preset {
        name: "convenience-store",
        title: "Convenience store",
        build: convenience_store,
    },
];

/// Look up a preset by name.
pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name == name)
}

/// Replace the grid with the named preset.
///
/// An unknown name is rejected and the grid is left untouched.
pub fn load_sample(grid: &mut Grid, name: &str) -> Result<&'static Preset, LayoutError> {
    let preset = find(name).ok_or_else(|| LayoutError::UnknownPreset {
        name: name.to_string(),
    })?;
    grid.replace_all(&preset.layout());
    tracing::info!(
        preset = preset.name,
        cells = grid.stats().total_placed(),
        "Sample layout loaded"
    );
    Ok(preset)
}

// =============================================================================
// Builders
// =============================================================================

/// Glyph used by the samples for each built-in kind.
fn glyph(kind: &ToolKind) -> &'static str {
    match kind {
        ToolKind::Wall => "🧱",
        ToolKind::Shelf => "📦",
        ToolKind::Cooling => "❄️",
        ToolKind::Entrance => "🚪",
        ToolKind::Cash => "💰",
        ToolKind::Custom(_) => "?",
    }
}

/// Set every cell in `rows` x `columns` to `kind`. Rows are zero-based,
/// columns one-based.
fn fill(
    map: &mut LayoutMap,
    kind: ToolKind,
    rows: RangeInclusive<usize>,
    columns: RangeInclusive<usize>,
) {
    for row in rows {
        for column in columns.clone() {
            if let Some(coord) = Coordinate::new(row, column) {
                map.insert(coord.to_string(), Placement::new(kind.clone(), glyph(&kind)));
            }
        }
    }
}

/// Walls around the whole grid.
fn perimeter(map: &mut LayoutMap) {
    let last_row = GRID_ROWS - 1;
    fill(map, ToolKind::Wall, 0..=0, 1..=GRID_COLS);
    fill(map, ToolKind::Wall, last_row..=last_row, 1..=GRID_COLS);
    fill(map, ToolKind::Wall, 1..=last_row - 1, 1..=1);
    fill(map, ToolKind::Wall, 1..=last_row - 1, GRID_COLS..=GRID_COLS);
}

/// Perimeter walls, a cooling wall along the top, four shelving aisles
/// (rows B, D, F, H) and a front with two checkouts around a double entrance.
fn supermarket_basic() -> LayoutMap {
    let mut map = LayoutMap::new();
    perimeter(&mut map);
    fill(&mut map, ToolKind::Cooling, 0..=0, 2..=9);
    for row in [1, 3, 5, 7] {
        fill(&mut map, ToolKind::Shelf, row..=row, 3..=8);
    }
    fill(&mut map, ToolKind::Cash, 9..=9, 4..=4);
    fill(&mut map, ToolKind::Entrance, 9..=9, 5..=6);
    fill(&mut map, ToolKind::Cash, 9..=9, 7..=7);
    map
}

/// Smaller shop: short cooling strip, three short aisles (rows C, E, G)
/// and a single checkout beside the entrance.
fn convenience_store() -> LayoutMap {
    let mut map = LayoutMap::new();
    perimeter(&mut map);
    fill(&mut map, ToolKind::Cooling, 0..=0, 3..=8);
    for row in [2, 4, 6] {
        fill(&mut map, ToolKind::Shelf, row..=row, 4..=7);
    }
    fill(&mut map, ToolKind::Entrance, 9..=9, 5..=6);
    fill(&mut map, ToolKind::Cash, 9..=9, 7..=7);
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::constants::DEFAULT_PRESET;

    fn kind_at(grid: &Grid, coord: &str) -> Option<ToolKind> {
        grid.placement(Coordinate::parse(coord).unwrap())
            .map(|p| p.kind.clone())
    }

    #[test]
    fn test_default_preset_exists() {
        assert!(find(DEFAULT_PRESET).is_some());
    }

    #[test]
    fn test_supermarket_basic_contents() {
        let mut grid = Grid::new();
        load_sample(&mut grid, "supermarket-basic").unwrap();
        let stats = grid.stats();

        assert_eq!(stats.total_placed(), 60);
        assert_eq!(stats.shelf_count(), 24);
        assert_eq!(stats.cash_count(), 2);
        assert_eq!(stats.count(&ToolKind::Cooling), 8);
        assert_eq!(stats.count(&ToolKind::Entrance), 2);
        assert_eq!(stats.count(&ToolKind::Wall), 24);

        assert_eq!(kind_at(&grid, "A-01"), Some(ToolKind::Wall));
        assert_eq!(kind_at(&grid, "A-05"), Some(ToolKind::Cooling));
        assert_eq!(kind_at(&grid, "J-05"), Some(ToolKind::Entrance));
        assert_eq!(kind_at(&grid, "J-07"), Some(ToolKind::Cash));
        assert_eq!(kind_at(&grid, "D-03"), Some(ToolKind::Shelf));
        assert_eq!(kind_at(&grid, "C-05"), None);
    }

    #[test]
    fn test_convenience_store_contents() {
        let mut grid = Grid::new();
        load_sample(&mut grid, "convenience-store").unwrap();
        let stats = grid.stats();
        assert_eq!(stats.shelf_count(), 12);
        assert_eq!(stats.cash_count(), 1);
        assert_eq!(stats.count(&ToolKind::Entrance), 2);
        assert_eq!(stats.count(&ToolKind::Cooling), 6);
        assert_eq!(stats.total_placed(), 48);
    }

    #[test]
    fn test_load_sample_replaces_previous_content() {
        let mut grid = Grid::new();
        load_sample(&mut grid, "supermarket-basic").unwrap();
        load_sample(&mut grid, "convenience-store").unwrap();
        assert_eq!(kind_at(&grid, "B-03"), None);
    }

    #[test]
    fn test_unknown_preset_leaves_grid() {
        let mut grid = Grid::new();
        load_sample(&mut grid, "convenience-store").unwrap();
        let before = grid.clone();
        let err = load_sample(&mut grid, "hypermarket").unwrap_err();
        assert_eq!(
            err,
            LayoutError::UnknownPreset {
                name: "hypermarket".to_string()
            }
        );
        assert_eq!(grid, before);
    }
}
