// ShopGuide - platform/fs.rs
//
// Filesystem and desktop helpers: atomic writes, size-limited reads, and
// handing a URL to the system browser.

use std::io;
use std::path::{Path, PathBuf};

/// Write `bytes` to `path` atomically (write temp, then rename).
///
/// Parent directories are created as needed. A crash between write and
/// rename leaves the previous file intact.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp = temp_path(path);
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path).map_err(|e| {
        // Clean up the temp file on failure; ignore any secondary error.
        let _ = std::fs::remove_file(&tmp);
        e
    })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "File written");
    Ok(())
}

/// Sibling temp file: `layouts.json` -> `layouts.json.tmp`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Outcome of a size-limited read.
#[derive(Debug)]
pub enum LimitedRead {
    Text(String),
    TooLarge { size: u64 },
}

/// Read `path` as UTF-8 text unless it is larger than `max_size` bytes.
pub fn read_limited(path: &Path, max_size: u64) -> io::Result<LimitedRead> {
    let size = std::fs::metadata(path)?.len();
    if size > max_size {
        return Ok(LimitedRead::TooLarge { size });
    }
    std::fs::read_to_string(path).map(LimitedRead::Text)
}

/// Open `url` in the system browser.
///
/// Platform behaviour:
/// - **Windows**: `explorer "<url>"`
/// - **macOS**: `open "<url>"`
/// - **Linux**: `xdg-open "<url>"`
///
/// The subprocess is spawned detached. A launch failure is returned so the
/// caller can show the URL to the user instead.
pub fn open_url(url: &str) -> io::Result<()> {
    #[cfg(target_os = "windows")]
    let program = "explorer";
    #[cfg(target_os = "macos")]
    let program = "open";
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let program = "xdg-open";

    std::process::Command::new(program)
        .arg(url)
        .spawn()
        .map(|_| ())
        .map_err(|e| {
            tracing::warn!(url, error = %e, "Failed to open browser");
            e
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_parents_and_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("layouts.json");

        write_atomic(&path, b"first").unwrap();
        // A leftover temp file from an earlier crash must not get in the way.
        std::fs::write(temp_path(&path), b"garbage").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_read_limited() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "0123456789").unwrap();

        match read_limited(&path, 10).unwrap() {
            LimitedRead::Text(t) => assert_eq!(t, "0123456789"),
            other => panic!("expected text, got {other:?}"),
        }
        assert!(matches!(
            read_limited(&path, 9).unwrap(),
            LimitedRead::TooLarge { size: 10 }
        ));
        assert!(read_limited(&dir.path().join("missing.json"), 10).is_err());
    }
}
