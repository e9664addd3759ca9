// ShopGuide - core/grid.rs
//
// The 10x10 layout grid. Every coordinate A-01..J-10 has exactly one cell
// for the lifetime of the grid; cells hold at most one placement.
//
// All operations are total. Unknown coordinates in bulk input are ignored so
// documents from newer tool sets still load.

use crate::core::model::{Coordinate, LayoutMap, Placement, ToolDefinition};
use crate::core::stats::GridStats;
use crate::util::constants::GRID_CELLS;

/// Fixed-size placement grid with eagerly maintained statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Option<Placement>>,
    stats: GridStats,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self {
            cells: vec![None; GRID_CELLS],
            stats: GridStats::default(),
        }
    }

    /// Apply `tool` to the cell at `coord`.
    ///
    /// The eraser clears the cell; any other tool overwrites whatever the
    /// cell held (last write wins).
    pub fn apply_tool(&mut self, coord: Coordinate, tool: &ToolDefinition) {
        self.cells[coord.index()] = tool.placement();
        self.recompute();
    }

    /// Clear every cell.
    pub fn clear_all(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
        self.recompute();
    }

    /// Replace the whole grid with `layout`.
    ///
    /// Keys that are not canonical in-range coordinates are skipped.
    /// Returns how many keys were skipped.
    pub fn replace_all(&mut self, layout: &LayoutMap) -> usize {
        self.cells.iter_mut().for_each(|c| *c = None);

        let mut ignored = 0;
        for (key, placement) in layout {
            match Coordinate::parse(key) {
                Some(coord) => self.cells[coord.index()] = Some(placement.clone()),
                None => {
                    tracing::debug!(coord = %key, "Ignoring unknown coordinate");
                    ignored += 1;
                }
            }
        }

        self.recompute();
        ignored
    }

    /// Non-empty cells keyed by coordinate string, in grid order.
    pub fn collect(&self) -> LayoutMap {
        self.cells()
            .filter_map(|(coord, placement)| Some((coord.to_string(), placement?.clone())))
            .collect()
    }

    /// Placement at `coord`, if any.
    pub fn placement(&self, coord: Coordinate) -> Option<&Placement> {
        self.cells[coord.index()].as_ref()
    }

    /// Every cell in grid order.
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, Option<&Placement>)> + '_ {
        Coordinate::all().map(move |c| (c, self.cells[c.index()].as_ref()))
    }

    /// Current statistics.
    pub fn stats(&self) -> &GridStats {
        &self.stats
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    fn recompute(&mut self) {
        self.stats = GridStats::compute(self.cells.iter().map(Option::as_ref));
    }
}
