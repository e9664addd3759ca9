// ShopGuide - core/report.rs
//
// Plain-text rendering of the plan for the clipboard / printing.

use crate::core::grid::Grid;
use crate::core::model::Coordinate;
use crate::util::constants::{GRID_COLS, GRID_ROWS};
use std::fmt::Write;

/// Marker printed for empty cells.
const EMPTY_CELL: &str = "·";

/// Render `grid` as a titled text plan with a column header, one line per
/// row and a statistics footer.
pub fn text_plan(grid: &Grid, title: &str) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out);

    out.push_str("   ");
    for column in 1..=GRID_COLS {
        let _ = write!(out, " {column:02}");
    }
    out.push('\n');

    for row in 0..GRID_ROWS {
        let mut line = String::new();
        for column in 1..=GRID_COLS {
            let cell = Coordinate::new(row, column)
                .and_then(|c| grid.placement(c))
                .map_or(EMPTY_CELL, |p| p.glyph.as_str());
            let _ = write!(line, " {cell:>2}");
        }
        let letter = Coordinate::new(row, 1).map_or('?', |c| c.row_letter());
        let _ = writeln!(out, "{letter}  {line}");
    }

    let stats = grid.stats();
    let _ = writeln!(out);
    let _ = writeln!(out, "Shelves:  {}", stats.shelf_count());
    let _ = writeln!(out, "Checkouts: {}", stats.cash_count());
    let _ = writeln!(
        out,
        "Area used: {}% ({} cells)",
        stats.area_used_percent(),
        stats.total_placed()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ToolDefinition;

    #[test]
    fn test_text_plan_shape() {
        let mut grid = Grid::new();
        let shelf = ToolDefinition::new("shelf", "📦", "Shelf", true);
        grid.apply_tool(Coordinate::parse("B-03").unwrap(), &shelf);

        let plan = text_plan(&grid, "Corner Shop");
        let lines: Vec<&str> = plan.lines().collect();
        assert_eq!(lines[0], "Corner Shop");
        assert!(lines[2].ends_with("09 10"));
        assert!(lines[3].starts_with("A "));
        assert!(lines[4].starts_with("B "));
        assert!(lines[4].contains("📦"));
        assert_eq!(lines[4].matches(EMPTY_CELL).count(), 9);
        assert!(plan.contains("Shelves:  1"));
        assert!(plan.contains("Area used: 1% (1 cells)"));
    }
}
