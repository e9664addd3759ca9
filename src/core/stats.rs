// ShopGuide - core/stats.rs
//
// Read-only aggregation over the grid. Recomputed in full after every
// mutation; at 100 cells a rescan is cheaper than any bookkeeping.

use crate::core::model::{Placement, ToolKind};
use crate::util::constants::GRID_CELLS;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Live statistics for the current grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridStats {
    counts: BTreeMap<ToolKind, usize>,
    total_placed: usize,
}

impl GridStats {
    /// Count placements over any sequence of cells.
    pub fn compute<'a>(cells: impl IntoIterator<Item = Option<&'a Placement>>) -> Self {
        let mut stats = Self::default();
        for placement in cells.into_iter().flatten() {
            *stats.counts.entry(placement.kind.clone()).or_insert(0) += 1;
            stats.total_placed += 1;
        }
        stats
    }

    /// Number of cells holding `kind`.
    pub fn count(&self, kind: &ToolKind) -> usize {
        self.counts.get(kind).copied().unwrap_or(0)
    }

    pub fn shelf_count(&self) -> usize {
        self.count(&ToolKind::Shelf)
    }

    pub fn cash_count(&self) -> usize {
        self.count(&ToolKind::Cash)
    }

    /// Number of non-empty cells. Checkout cells count like any other.
    pub fn total_placed(&self) -> usize {
        self.total_placed
    }

    /// Share of the grid in use, in whole percent.
    pub fn area_used_percent(&self) -> usize {
        self.total_placed * 100 / GRID_CELLS
    }

    pub fn is_empty(&self) -> bool {
        self.total_placed == 0
    }

    /// Per-kind counts, kinds with zero cells omitted.
    pub fn counts(&self) -> impl Iterator<Item = (&ToolKind, usize)> + '_ {
        self.counts.iter().map(|(k, n)| (k, *n))
    }

    /// Snapshot in the document's statistics shape.
    pub fn snapshot(&self) -> Statistics {
        let custom = self
            .counts
            .iter()
            .filter(|(kind, _)| kind.is_custom())
            .map(|(kind, n)| (kind.id().to_string(), *n))
            .collect();

        Statistics {
            shelves: self.shelf_count(),
            cash: self.cash_count(),
            cooling: self.count(&ToolKind::Cooling),
            walls: self.count(&ToolKind::Wall),
            entrance: self.count(&ToolKind::Entrance),
            total: self.total_placed,
            custom,
        }
    }
}

/// Statistics block of a layout document.
///
/// All fields default to zero so documents from older exporters that omit
/// some counts still import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub shelves: usize,
    pub cash: usize,
    pub cooling: usize,
    pub walls: usize,
    pub entrance: usize,
    pub total: usize,

    /// Counts for kinds outside the built-in set.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(kind: ToolKind) -> Placement {
        Placement::new(kind, "x")
    }

    #[test]
    fn test_empty_grid_stats() {
        let cells: Vec<Option<Placement>> = vec![None; GRID_CELLS];
        let stats = GridStats::compute(cells.iter().map(Option::as_ref));
        assert!(stats.is_empty());
        assert_eq!(stats.area_used_percent(), 0);
        assert_eq!(stats.snapshot(), Statistics::default());
    }

    #[test]
    fn test_counts_per_kind_and_custom_snapshot() {
        let cells = vec![
            Some(p(ToolKind::Shelf)),
            Some(p(ToolKind::Shelf)),
            None,
            Some(p(ToolKind::Cash)),
            Some(p(ToolKind::Custom("bakery".to_string()))),
        ];
        let stats = GridStats::compute(cells.iter().map(Option::as_ref));

        assert_eq!(stats.shelf_count(), 2);
        assert_eq!(stats.cash_count(), 1);
        // Checkout cells count towards the total and the area used.
        assert_eq!(stats.total_placed(), 4);
        assert_eq!(stats.area_used_percent(), 4);

        let snap = stats.snapshot();
        assert_eq!(snap.total, 4);
        assert_eq!(snap.walls, 0);
        assert_eq!(snap.custom.get("bakery"), Some(&1));
    }

    #[test]
    fn test_statistics_json_omits_empty_custom() {
        let json = serde_json::to_value(Statistics::default()).unwrap();
        assert!(json.get("custom").is_none());
        assert_eq!(json["shelves"], 0);

        let partial: Statistics = serde_json::from_str(r#"{"shelves":3,"total":5}"#).unwrap();
        assert_eq!(partial.shelves, 3);
        assert_eq!(partial.cash, 0);
    }
}
