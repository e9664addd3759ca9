// ShopGuide - app/store.rs
//
// Named layout store: every saved layout lives in one JSON object keyed by
// the user-chosen name, `{ "<name>": { "data": {...}, "timestamp": "..." } }`.
//
// The file is re-read on every operation and written atomically. There is
// no locking: when two windows save at once, the last write wins.
//
// Entries are decoded one at a time. An entry that does not decode is kept
// in the file untouched, left out of the listing and reported as corrupt
// only when loaded by name.

use crate::core::grid::Grid;
use crate::core::model::LayoutMap;
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One saved layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredLayout {
    pub data: LayoutMap,
    pub timestamp: DateTime<Utc>,
}

type StoreFile = BTreeMap<String, Value>;

/// Handle on the store file. Cheap to construct; the file need not exist.
#[derive(Debug, Clone)]
pub struct LayoutStore {
    path: PathBuf,
}

impl LayoutStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save the grid under `name`, replacing any layout with that name.
    ///
    /// The name is trimmed. Blank names and empty grids are rejected.
    pub fn save_named(&self, name: &str, grid: &Grid, now: DateTime<Utc>) -> Result<(), StoreError> {
        let name = validate_name(name)?;
        if grid.is_empty() {
            return Err(StoreError::NothingToSave);
        }

        let mut all = self.read_all()?;
        let entry = StoredLayout {
            data: grid.collect(),
            timestamp: now,
        };
        let cells = entry.data.len();
        let value = serde_json::to_value(&entry).map_err(|e| self.corrupt(e))?;
        let replaced = all.insert(name.to_string(), value).is_some();
        self.write_all(&all)?;

        tracing::info!(name, cells, replaced, "Layout saved");
        Ok(())
    }

    /// Stored layout under `name`.
    pub fn load_named(&self, name: &str) -> Result<StoredLayout, StoreError> {
        let name = name.trim();
        let value = self
            .read_all()?
            .remove(name)
            .ok_or_else(|| StoreError::NotFound {
                name: name.to_string(),
            })?;
        serde_json::from_value(value).map_err(|e| {
            tracing::warn!(name, error = %e, "Stored layout is unreadable");
            self.corrupt(e)
        })
    }

    /// Names with their save time, alphabetically. Unreadable entries are
    /// skipped.
    pub fn names(&self) -> Result<Vec<(String, DateTime<Utc>)>, StoreError> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter_map(|(name, value)| match serde_json::from_value::<StoredLayout>(value) {
                Ok(entry) => Some((name, entry.timestamp)),
                Err(e) => {
                    tracing::warn!(name = %name, error = %e, "Skipping unreadable stored layout");
                    None
                }
            })
            .collect())
    }

    /// Delete the layout under `name`.
    pub fn remove(&self, name: &str) -> Result<(), StoreError> {
        let name = name.trim();
        let mut all = self.read_all()?;
        if all.remove(name).is_none() {
            return Err(StoreError::NotFound {
                name: name.to_string(),
            });
        }
        self.write_all(&all)?;
        tracing::info!(name, "Layout removed");
        Ok(())
    }

    fn read_all(&self) -> Result<StoreFile, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(StoreFile::new()),
            Err(e) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        serde_json::from_str(&content).map_err(|e| self.corrupt(e))
    }

    fn write_all(&self, all: &StoreFile) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(all).map_err(|e| self.corrupt(e))?;
        fs::write_atomic(&self.path, json.as_bytes()).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e,
        })
    }

    fn corrupt(&self, source: serde_json::Error) -> StoreError {
        StoreError::Corrupt {
            path: self.path.clone(),
            source,
        }
    }
}

fn validate_name(name: &str) -> Result<&str, StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidName {
            name: name.to_string(),
            reason: "name is empty",
        });
    }
    if trimmed.chars().count() > constants::MAX_LAYOUT_NAME_CHARS {
        return Err(StoreError::InvalidName {
            name: name.to_string(),
            reason: "name is too long",
        });
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Coordinate, ToolDefinition};
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn grid_with(coords: &[&str]) -> Grid {
        let shelf = ToolDefinition::new("shelf", "📦", "Shelf", true);
        let mut grid = Grid::new();
        for c in coords {
            grid.apply_tool(Coordinate::parse(c).unwrap(), &shelf);
        }
        grid
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, hour, 0, 0).unwrap()
    }

    fn store(dir: &TempDir) -> LayoutStore {
        LayoutStore::open(dir.path().join("data").join(constants::LAYOUT_STORE_FILE_NAME))
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).names().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let grid = grid_with(&["B-03", "B-04"]);
        store.save_named("  Main Store ", &grid, at(9)).unwrap();

        let loaded = store.load_named("Main Store").unwrap();
        assert_eq!(loaded.data, grid.collect());
        assert_eq!(loaded.timestamp, at(9));
        assert_eq!(store.names().unwrap(), vec![("Main Store".to_string(), at(9))]);
    }

    #[test]
    fn test_save_overwrites_same_name() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save_named("a", &grid_with(&["A-01"]), at(1)).unwrap();
        store.save_named("b", &grid_with(&["B-01"]), at(2)).unwrap();
        store.save_named("a", &grid_with(&["C-01", "C-02"]), at(3)).unwrap();

        let a = store.load_named("a").unwrap();
        assert_eq!(a.data.len(), 2);
        assert_eq!(a.timestamp, at(3));
        assert_eq!(store.names().unwrap().len(), 2);
    }

    #[test]
    fn test_not_found() {
        let dir = TempDir::new().unwrap();
        let err = store(&dir).load_named("ghost").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { ref name } if name == "ghost"));
        assert_eq!(err.to_string(), "Layout 'ghost' not found");
    }

    #[test]
    fn test_rejects_empty_grid_and_blank_name() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(matches!(
            store.save_named("x", &Grid::new(), at(1)),
            Err(StoreError::NothingToSave)
        ));
        assert!(matches!(
            store.save_named("   ", &grid_with(&["A-01"]), at(1)),
            Err(StoreError::InvalidName { .. })
        ));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save_named("a", &grid_with(&["A-01"]), at(1)).unwrap();
        store.remove("a").unwrap();
        assert!(store.names().unwrap().is_empty());
        assert!(matches!(store.remove("a"), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_corrupt_file_reported() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{ broken").unwrap();
        assert!(matches!(store.names(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_reads_browser_style_timestamps() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(
            store.path(),
            r#"{"Old":{"data":{"A-01":{"tool":"wall","emoji":"🧱"}},"timestamp":"2024-05-01T10:00:00.000Z"}}"#,
        )
        .unwrap();
        let old = store.load_named("Old").unwrap();
        assert_eq!(old.data.len(), 1);
    }

    #[test]
    fn test_unreadable_entry_is_skipped_and_kept() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(
            store.path(),
            r#"{
                "Bad": {"data": {}, "timestamp": "last tuesday"},
                "Good": {"data": {"A-01": {"tool": "wall", "emoji": "🧱"}}, "timestamp": "2024-05-01T10:00:00Z"}
            }"#,
        )
        .unwrap();

        let names: Vec<String> = store.names().unwrap().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Good".to_string()]);
        assert!(matches!(store.load_named("Bad"), Err(StoreError::Corrupt { .. })));
        assert_eq!(store.load_named("Good").unwrap().data.len(), 1);

        // Saving and deleting still work and leave the bad entry in place.
        store.save_named("New", &grid_with(&["B-02"]), at(4)).unwrap();
        store.remove("Good").unwrap();
        assert_eq!(store.names().unwrap(), vec![("New".to_string(), at(4))]);
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["Bad"]["timestamp"], "last tuesday");

        store.remove("Bad").unwrap();
        assert!(matches!(store.load_named("Bad"), Err(StoreError::NotFound { .. })));
    }
}
