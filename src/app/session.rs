// ShopGuide - app/session.rs
//
// Session persistence: save and restore the theme preference, the last
// active tool and the last shop name between application restarts.
//
// - Session is saved atomically (write temp, rename) so a crash during save
//   never corrupts the previous good session.
// - Load errors are silently discarded (corrupt or incompatible sessions just
//   start the app fresh rather than surfacing errors to the user).
// - The grid itself is NOT persisted here; named layouts cover that.

use crate::platform::fs;
use crate::util::constants::SESSION_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version stamp for forward-compatibility checks.
///
/// Increment whenever `SessionData` changes in a breaking way. Version
/// mismatches silently discard the session.
pub const SESSION_VERSION: u32 = 1;

/// Complete persistent session snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    /// Schema version; must equal `SESSION_VERSION` to be accepted.
    pub version: u32,

    /// Dark (true) or light (false) theme as last chosen in the View menu.
    #[serde(default)]
    pub dark_mode: bool,

    /// Id of the active tool. Restored only if the tool still exists.
    #[serde(default)]
    pub active_tool: Option<String>,

    /// Shop name last entered in the export prompt.
    #[serde(default)]
    pub shop_name: Option<String>,
}

impl Default for SessionData {
    fn default() -> Self {
        Self {
            version: SESSION_VERSION,
            dark_mode: false,
            active_tool: None,
            shop_name: None,
        }
    }
}

/// Resolve the session file path from the platform data directory.
pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}

/// Save `data` to `path` atomically.
///
/// Returns a descriptive error string suitable for a tracing warn! call; the
/// caller typically logs and ignores it.
pub fn save(data: &SessionData, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| format!("failed to serialise session: {e}"))?;

    fs::write_atomic(path, json.as_bytes())
        .map_err(|e| format!("failed to write session file '{}': {e}", path.display()))?;

    tracing::debug!(path = %path.display(), "Session saved");
    Ok(())
}

/// Load and validate a `SessionData` from `path`.
///
/// Returns `None` on any error (file not found, JSON parse failure,
/// version mismatch). The caller should treat `None` as "start fresh".
pub fn load(path: &Path) -> Option<SessionData> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            // "Not found" is the normal first run.
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, "Cannot read session file");
            }
        })
        .ok()?;

    let data: SessionData = serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Session file is malformed, starting fresh"
            );
        })
        .ok()?;

    if data.version != SESSION_VERSION {
        tracing::warn!(
            found = data.version,
            expected = SESSION_VERSION,
            "Session file version mismatch, starting fresh"
        );
        return None;
    }

    tracing::info!(path = %path.display(), "Session file loaded");
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_data() -> SessionData {
        SessionData {
            version: SESSION_VERSION,
            dark_mode: true,
            active_tool: Some("shelf".to_string()),
            shop_name: Some("Corner Shop".to_string()),
        }
    }

    #[test]
    fn test_session_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = session_path(dir.path());
        save(&sample_data(), &path).expect("save should succeed");
        assert_eq!(load(&path), Some(sample_data()));
    }

    #[test]
    fn test_session_load_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        assert!(load(&dir.path().join("nonexistent.json")).is_none());
    }

    #[test]
    fn test_session_load_malformed_json_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = session_path(dir.path());
        std::fs::write(&path, b"not valid json {{{{").unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn test_session_load_wrong_version_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = session_path(dir.path());
        let mut data = sample_data();
        data.version = 99;
        // save() writes whatever version it is given; validation is in load().
        save(&data, &path).unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn test_session_missing_optional_fields_default() {
        let dir = TempDir::new().unwrap();
        let path = session_path(dir.path());
        std::fs::write(&path, br#"{"version":1}"#).unwrap();
        assert_eq!(load(&path), Some(SessionData::default()));
    }
}
