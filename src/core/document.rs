// ShopGuide - core/document.rs
//
// Layout document export and import.
// Core layer: writes to any Write trait object and parses from text; file
// handling lives in platform::fs and app::state.
//
// Import is tolerant: unknown top-level fields, unknown per-cell fields,
// unknown coordinates and cells of any other shape are ignored, and an
// unreadable statistics block reads as zeros. Only `layout` is required.

use crate::core::grid::Grid;
use crate::core::model::{Coordinate, LayoutMap, Placement};
use crate::core::stats::Statistics;
use crate::util::constants;
use crate::util::error::DocumentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Write;

/// Serialised form of a grid: metadata plus the non-empty cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDocument {
    pub version: String,
    pub shop_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub statistics: Statistics,
    pub layout: LayoutMap,
}

/// Shape accepted on import. Everything is optional so that the presence
/// check for `layout` can report its own error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    shop_name: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    statistics: Option<Value>,
    #[serde(default)]
    layout: Option<BTreeMap<String, Value>>,
}

/// What the user is told after a successful import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub shop_name: String,
    pub created_at: Option<DateTime<Utc>>,
    /// Shelf count as stated by the document.
    pub shelves: usize,
    /// Total placed cells as stated by the document.
    pub total: usize,
    /// Cells actually placed on the grid.
    pub applied: usize,
    /// Layout keys that were not grid coordinates and were skipped.
    pub ignored: usize,
}

/// Shop name for an export: the trimmed input, or the fallback when the
/// prompt was left empty or cancelled (`None`).
pub fn resolve_shop_name(input: Option<&str>) -> String {
    match input.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => constants::FALLBACK_SHOP_NAME.to_string(),
    }
}

/// Build a layout document from `grid`.
///
/// Fails with `NothingToExport` when no cell is placed.
pub fn export_document(
    grid: &Grid,
    shop_name_input: Option<&str>,
    now: DateTime<Utc>,
) -> Result<LayoutDocument, DocumentError> {
    if grid.is_empty() {
        return Err(DocumentError::NothingToExport);
    }

    let doc = LayoutDocument {
        version: constants::DOCUMENT_VERSION.to_string(),
        shop_name: resolve_shop_name(shop_name_input),
        created_at: Some(now),
        statistics: grid.stats().snapshot(),
        layout: grid.collect(),
    };

    tracing::info!(
        cells = doc.layout.len(),
        shelves = doc.statistics.shelves,
        "Layout document built"
    );
    Ok(doc)
}

/// Parse document text.
///
/// Invalid JSON yields `Parse`; a document without `layout` yields
/// `MissingLayout`. An unreadable `createdAt` is dropped rather than
/// rejecting the whole document. Cells that are not a grid coordinate
/// holding a `{tool, emoji}` object are left out of the layout.
pub fn parse_document(text: &str) -> Result<LayoutDocument, DocumentError> {
    parse_lenient(text).map(|(doc, _)| doc)
}

/// Parse document text; also returns how many layout entries were skipped.
fn parse_lenient(text: &str) -> Result<(LayoutDocument, usize), DocumentError> {
    let raw: RawDocument =
        serde_json::from_str(text).map_err(|e| DocumentError::Parse { source: e })?;

    let raw_layout = raw.layout.ok_or(DocumentError::MissingLayout)?;
    let mut layout = LayoutMap::new();
    let mut skipped = 0;
    for (key, value) in raw_layout {
        if Coordinate::parse(&key).is_none() {
            tracing::debug!(coord = %key, "Ignoring unknown coordinate");
            skipped += 1;
            continue;
        }
        match serde_json::from_value::<Placement>(value) {
            Ok(placement) => {
                layout.insert(key, placement);
            }
            Err(e) => {
                tracing::debug!(coord = %key, error = %e, "Ignoring unreadable cell");
                skipped += 1;
            }
        }
    }

    let statistics = raw
        .statistics
        .and_then(|v| {
            serde_json::from_value::<Statistics>(v)
                .map_err(|e| {
                    tracing::debug!(error = %e, "Ignoring unreadable statistics block");
                })
                .ok()
        })
        .unwrap_or_default();

    let created_at = raw.created_at.as_deref().and_then(|s| {
        DateTime::parse_from_rfc3339(s)
            .map(|d| d.with_timezone(&Utc))
            .map_err(|e| {
                tracing::debug!(value = s, error = %e, "Ignoring unreadable createdAt");
            })
            .ok()
    });

    let doc = LayoutDocument {
        version: raw.version.unwrap_or_default(),
        shop_name: resolve_shop_name(raw.shop_name.as_deref()),
        created_at,
        statistics,
        layout,
    };
    Ok((doc, skipped))
}

/// Parse `text` and replace the grid with its layout.
///
/// The grid is only touched once the document has been fully validated.
pub fn import_document(grid: &mut Grid, text: &str) -> Result<ImportSummary, DocumentError> {
    let (doc, skipped) = parse_lenient(text)?;
    let ignored = skipped + grid.replace_all(&doc.layout);

    let summary = ImportSummary {
        shop_name: doc.shop_name,
        created_at: doc.created_at,
        shelves: doc.statistics.shelves,
        total: doc.statistics.total,
        applied: grid.stats().total_placed(),
        ignored,
    };

    tracing::info!(
        cells = summary.applied,
        ignored = summary.ignored,
        version = %doc.version,
        "Layout document imported"
    );
    Ok(summary)
}

/// Write `doc` as pretty-printed JSON.
pub fn write_document<W: Write>(doc: &LayoutDocument, writer: W) -> Result<(), DocumentError> {
    serde_json::to_writer_pretty(writer, doc).map_err(|e| DocumentError::Serialize { source: e })
}

/// Pretty-printed JSON text of `doc`.
pub fn to_json_pretty(doc: &LayoutDocument) -> Result<String, DocumentError> {
    serde_json::to_string_pretty(doc).map_err(|e| DocumentError::Serialize { source: e })
}

/// Suggested export file name:
/// `shopguide-layout-<shop-name>-<unix-millis>.json`.
///
/// Whitespace runs become a single dash; path separators and characters
/// that are invalid in Windows file names become underscores.
pub fn export_file_name(shop_name: &str, now: DateTime<Utc>) -> String {
    let slug: String = shop_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect();

    format!(
        "{}-{}-{}.json",
        constants::EXPORT_FILE_PREFIX,
        slug,
        now.timestamp_millis()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Coordinate, Placement, ToolDefinition, ToolKind};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap()
    }

    fn sample_grid() -> Grid {
        let mut grid = Grid::new();
        let shelf = ToolDefinition::new("shelf", "📦", "Shelf", true);
        let cash = ToolDefinition::new("cash", "💰", "Checkout", true);
        grid.apply_tool(Coordinate::parse("B-03").unwrap(), &shelf);
        grid.apply_tool(Coordinate::parse("B-04").unwrap(), &shelf);
        grid.apply_tool(Coordinate::parse("J-04").unwrap(), &cash);
        grid
    }

    #[test]
    fn test_export_empty_grid_fails() {
        let err = export_document(&Grid::new(), Some("Shop"), now()).unwrap_err();
        assert!(matches!(err, DocumentError::NothingToExport));
    }

    #[test]
    fn test_export_fields() {
        let doc = export_document(&sample_grid(), Some("  Corner Shop "), now()).unwrap();
        assert_eq!(doc.version, "1.0");
        assert_eq!(doc.shop_name, "Corner Shop");
        assert_eq!(doc.statistics.shelves, 2);
        assert_eq!(doc.statistics.cash, 1);
        assert_eq!(doc.statistics.total, 3);
        assert_eq!(doc.layout.len(), 3);

        let json: serde_json::Value = serde_json::from_str(&to_json_pretty(&doc).unwrap()).unwrap();
        assert_eq!(json["shopName"], "Corner Shop");
        assert_eq!(json["createdAt"], "2025-03-14T09:30:00Z");
        assert_eq!(json["layout"]["B-03"]["tool"], "shelf");
        assert_eq!(json["layout"]["B-03"]["emoji"], "📦");
    }

    #[test]
    fn test_shop_name_fallback() {
        assert_eq!(resolve_shop_name(None), "Untitled");
        assert_eq!(resolve_shop_name(Some("   ")), "Untitled");
        assert_eq!(resolve_shop_name(Some("Mart")), "Mart");
    }

    #[test]
    fn test_export_import_round_trip() {
        let source = sample_grid();
        let doc = export_document(&source, Some("Mart"), now()).unwrap();
        let text = to_json_pretty(&doc).unwrap();

        let mut target = Grid::new();
        let summary = import_document(&mut target, &text).unwrap();
        assert_eq!(target.collect(), source.collect());
        assert_eq!(summary.shop_name, "Mart");
        assert_eq!(summary.created_at, Some(now()));
        assert_eq!(summary.shelves, 2);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.applied, 3);
        assert_eq!(summary.ignored, 0);
    }

    #[test]
    fn test_import_missing_layout_leaves_grid() {
        let mut grid = sample_grid();
        let before = grid.clone();
        let err = import_document(&mut grid, r#"{"version":"1.0","shopName":"X"}"#).unwrap_err();
        assert!(matches!(err, DocumentError::MissingLayout));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_import_unparsable_leaves_grid() {
        let mut grid = sample_grid();
        let before = grid.clone();
        let err = import_document(&mut grid, "{ not json").unwrap_err();
        assert!(matches!(err, DocumentError::Parse { .. }));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_import_tolerates_unknown_data() {
        let text = r#"{
            "version": "2.3",
            "shopName": "Future Mart",
            "createdAt": "2024-05-01T10:00:00.000Z",
            "floors": 2,
            "layout": {
                "A-01": {"tool": "wall", "emoji": "🧱", "height": 3},
                "K-01": {"tool": "wall", "emoji": "🧱"},
                "C-05": {"tool": "escalator", "emoji": "🛗"}
            }
        }"#;
        let mut grid = Grid::new();
        let summary = import_document(&mut grid, text).unwrap();
        // No statistics block: the stated counts default to zero.
        assert_eq!(summary.total, 0);
        assert_eq!(summary.applied, 2);
        assert_eq!(summary.ignored, 1);
        assert!(summary.created_at.is_some());
        assert_eq!(
            grid.placement(Coordinate::parse("C-05").unwrap()),
            Some(&Placement::new(ToolKind::Custom("escalator".to_string()), "🛗"))
        );
    }

    #[test]
    fn test_import_skips_cells_of_other_shapes() {
        let text = r#"{"layout":{
            "B-02": {"tool": "shelf", "emoji": "📦"},
            "K-01": {"floor": 2},
            "meta": "v2",
            "C-03": [1, 2, 3],
            "D-04": {"emoji": "🧱"}
        }}"#;
        let mut grid = sample_grid();
        let summary = import_document(&mut grid, text).unwrap();
        assert_eq!(summary.applied, 1);
        assert_eq!(summary.ignored, 4);
        assert_eq!(grid.stats().shelf_count(), 1);
        assert!(grid.placement(Coordinate::parse("D-04").unwrap()).is_none());
    }

    #[test]
    fn test_import_unreadable_statistics_reads_as_zero() {
        let text = r#"{
            "statistics": {"shelves": "many", "total": 5.0},
            "layout": {"B-02": {"tool": "shelf", "emoji": "📦"}}
        }"#;
        let mut grid = Grid::new();
        let summary = import_document(&mut grid, text).unwrap();
        assert_eq!(summary.shelves, 0);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.applied, 1);

        let err = import_document(&mut grid, r#"{"layout":["B-02"]}"#).unwrap_err();
        assert!(matches!(err, DocumentError::Parse { .. }));
        assert_eq!(grid.stats().total_placed(), 1);
    }

    #[test]
    fn test_import_minimal_document_defaults() {
        let mut grid = Grid::new();
        let summary =
            import_document(&mut grid, r#"{"layout":{},"createdAt":"yesterday"}"#).unwrap();
        assert_eq!(summary.shop_name, "Untitled");
        assert_eq!(summary.created_at, None);
        assert_eq!(summary.applied, 0);
    }

    #[test]
    fn test_export_file_name() {
        let name = export_file_name("My  Corner/Shop", now());
        assert_eq!(
            name,
            format!("shopguide-layout-My-Corner_Shop-{}.json", now().timestamp_millis())
        );
    }

    #[test]
    fn test_write_document_to_buffer() {
        let doc = export_document(&sample_grid(), None, now()).unwrap();
        let mut buf = Vec::new();
        write_document(&doc, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("\"shopName\": \"Untitled\""));
    }
}
