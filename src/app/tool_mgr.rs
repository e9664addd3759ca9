// ShopGuide - app/tool_mgr.rs
//
// Builds the tool registry from the built-in tools and user-defined TOML
// files on disk. User tools override built-in tools with the same id.

use crate::core::model::ToolDefinition;
use crate::core::tools::{self, ToolRegistry};
use crate::util::constants;
use crate::util::error::ToolError;
use std::path::{Path, PathBuf};

/// Load all available tools: built-in first, then user-defined overrides.
///
/// Invalid tool files are logged and skipped (non-fatal).
///
/// Returns the merged registry and any non-fatal errors encountered.
pub fn load_all_tools(user_tool_dir: Option<&Path>) -> (ToolRegistry, Vec<ToolError>) {
    let mut registry = ToolRegistry::builtin();
    let mut errors = Vec::new();

    tracing::info!(builtin_count = registry.len(), "Loaded built-in tools");

    if let Some(dir) = user_tool_dir {
        if dir.is_dir() {
            let (user_tools, user_errors) = load_user_tools(dir);
            errors.extend(user_errors);

            for tool in user_tools {
                if registry.len() >= constants::MAX_TOOLS && registry.get(&tool.id).is_none() {
                    tracing::warn!(
                        tool = %tool.id,
                        max = constants::MAX_TOOLS,
                        "Too many tools, skipping"
                    );
                    errors.push(ToolError::TooManyTools {
                        count: registry.len() + 1,
                        max: constants::MAX_TOOLS,
                    });
                    continue;
                }

                let id = tool.id.clone();
                if registry.upsert(tool) {
                    tracing::info!(tool = %id, "User tool overrides built-in");
                } else {
                    tracing::info!(tool = %id, "Loaded user-defined tool");
                }
            }
        } else {
            tracing::debug!(
                dir = %dir.display(),
                "User tool directory does not exist (skipping)"
            );
        }
    }

    tracing::info!(total = registry.len(), "Tool loading complete");

    (registry, errors)
}

/// Load user-defined tools from a directory, in file name order.
fn load_user_tools(dir: &Path) -> (Vec<ToolDefinition>, Vec<ToolError>) {
    let mut found = Vec::new();
    let mut errors = Vec::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            errors.push(ToolError::Io {
                path: dir.to_path_buf(),
                source: e,
            });
            return (found, errors);
        }
    };

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry_result in entries {
        match entry_result {
            Ok(entry) => {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) == Some("toml") {
                    paths.push(path);
                }
            }
            Err(e) => errors.push(ToolError::Io {
                path: dir.to_path_buf(),
                source: e,
            }),
        }
    }
    // read_dir order is platform dependent; later files win on duplicate ids.
    paths.sort();

    for path in paths {
        match load_tool_file(&path) {
            Ok(tool) => found.push(tool),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping invalid tool file");
                errors.push(e);
            }
        }
    }

    (found, errors)
}

fn load_tool_file(path: &Path) -> Result<ToolDefinition, ToolError> {
    let metadata = std::fs::metadata(path).map_err(|e| ToolError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    if metadata.len() > constants::MAX_TOOL_FILE_SIZE {
        return Err(ToolError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: constants::MAX_TOOL_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ToolError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    tools::parse_tool_toml(&content, path).and_then(tools::validate_tool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_tool(dir: &Path, file: &str, id: &str, glyph: &str, label: &str) {
        std::fs::write(
            dir.join(file),
            format!("[tool]\nid = \"{id}\"\nglyph = \"{glyph}\"\nlabel = \"{label}\"\n"),
        )
        .unwrap();
    }

    #[test]
    fn test_no_directory_gives_builtins() {
        let (registry, errors) = load_all_tools(None);
        assert_eq!(registry, ToolRegistry::builtin());
        assert!(errors.is_empty());

        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent");
        let (registry, errors) = load_all_tools(Some(&missing));
        assert_eq!(registry.len(), ToolRegistry::builtin().len());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_user_tools_added_and_override() {
        let dir = TempDir::new().unwrap();
        write_tool(dir.path(), "bakery.toml", "bakery", "🥖", "Bakery");
        write_tool(dir.path(), "shelf.toml", "shelf", "🗄️", "Rack");
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let (registry, errors) = load_all_tools(Some(dir.path()));
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(registry.len(), 7);
        assert_eq!(registry.get("shelf").unwrap().label, "Rack");
        assert!(!registry.get("bakery").unwrap().is_builtin);
        assert!(registry.tools().last().unwrap().is_eraser());
    }

    #[test]
    fn test_invalid_files_reported_and_skipped() {
        let dir = TempDir::new().unwrap();
        write_tool(dir.path(), "a.toml", "delete", "x", "Nope");
        std::fs::write(dir.path().join("b.toml"), "[tool\nbroken").unwrap();
        std::fs::write(
            dir.path().join("c.toml"),
            "x".repeat(constants::MAX_TOOL_FILE_SIZE as usize + 1),
        )
        .unwrap();
        write_tool(dir.path(), "d.toml", "deli", "🧀", "Deli");

        let (registry, errors) = load_all_tools(Some(dir.path()));
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], ToolError::ReservedId { .. }));
        assert!(matches!(errors[1], ToolError::TomlParse { .. }));
        assert!(matches!(errors[2], ToolError::FileTooLarge { .. }));
        assert!(registry.get("deli").is_some());
    }

    #[test]
    fn test_tool_cap_enforced() {
        let dir = TempDir::new().unwrap();
        let extra = constants::MAX_TOOLS - ToolRegistry::builtin().len() + 2;
        for i in 0..extra {
            write_tool(dir.path(), &format!("t{i:03}.toml"), &format!("t{i:03}"), "*", "T");
        }
        let (registry, errors) = load_all_tools(Some(dir.path()));
        assert_eq!(registry.len(), constants::MAX_TOOLS);
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| matches!(e, ToolError::TooManyTools { .. })));
    }
}
