// ShopGuide - core/tools.rs
//
// Tool registry, user tool validation, and the palette that tracks the
// single active tool.
// Core layer: accepts TOML strings, never touches the filesystem.
// I/O is handled by app::tool_mgr which feeds content here.

use crate::core::model::{ToolDefinition, ToolKind};
use crate::util::constants;
use crate::util::error::{LayoutError, ToolError};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

// =============================================================================
// Built-in tools
// =============================================================================

/// (id, glyph, label) of every built-in tool in palette order.
/// The eraser stays last.
const BUILTIN_TOOLS: &[(&str, &str, &str)] = &[
    ("wall", "🧱", "Wall"),
    ("shelf", "📦", "Shelf"),
    ("cooling", "❄️", "Cooling"),
    ("entrance", "🚪", "Entrance"),
    ("cash", "💰", "Checkout"),
    (constants::DELETE_TOOL_ID, "🗑️", "Delete"),
];

// =============================================================================
// Registry
// =============================================================================

/// Ordered set of tools keyed by id. Always contains the built-in tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ToolRegistry {
    /// Registry holding only the built-in tools.
    pub fn builtin() -> Self {
        Self {
            tools: BUILTIN_TOOLS
                .iter()
                .map(|(id, glyph, label)| ToolDefinition::new(id, glyph, label, true))
                .collect(),
        }
    }

    /// Add `tool`, or replace the tool with the same id.
    ///
    /// New tools are inserted before the eraser so it stays last in the
    /// palette. Returns true if an existing tool was replaced.
    pub fn upsert(&mut self, tool: ToolDefinition) -> bool {
        if let Some(pos) = self.tools.iter().position(|t| t.id == tool.id) {
            self.tools[pos] = tool;
            return true;
        }
        let at = self
            .tools
            .iter()
            .position(ToolDefinition::is_eraser)
            .unwrap_or(self.tools.len());
        self.tools.insert(at, tool);
        false
    }

    pub fn get(&self, id: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.id == id)
    }

    /// Tool painting `kind`, if registered.
    pub fn for_kind(&self, kind: &ToolKind) -> Option<&ToolDefinition> {
        self.get(kind.id())
    }

    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tools.iter().position(|t| t.id == id)
    }
}

// =============================================================================
// Palette
// =============================================================================

/// Tool palette: exactly one tool is active at any time.
#[derive(Debug, Clone)]
pub struct Palette {
    registry: ToolRegistry,
    active: usize,
}

impl Palette {
    /// Create a palette with the default tool (wall) active.
    pub fn new(registry: ToolRegistry) -> Self {
        let active = registry.position(constants::DEFAULT_TOOL_ID).unwrap_or(0);
        Self { registry, active }
    }

    /// Make `id` the active tool, deactivating the previous one.
    ///
    /// An unknown id leaves the active tool unchanged.
    pub fn select(&mut self, id: &str) -> Result<&ToolDefinition, LayoutError> {
        let pos = self
            .registry
            .position(id)
            .ok_or_else(|| LayoutError::UnknownTool { id: id.to_string() })?;
        self.active = pos;
        tracing::debug!(tool = id, "Tool selected");
        Ok(&self.registry.tools[pos])
    }

    /// The active tool.
    pub fn active(&self) -> &ToolDefinition {
        &self.registry.tools[self.active]
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active().id == id
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}

// =============================================================================
// User tool definitions (TOML)
// =============================================================================

/// Raw TOML tool file:
///
/// ```toml
/// [tool]
/// id = "bakery"
/// glyph = "🥖"
/// label = "Bakery"
/// ```
#[derive(Debug, Deserialize)]
pub struct ToolFile {
    pub tool: ToolFileEntry,
}

#[derive(Debug, Deserialize)]
pub struct ToolFileEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub glyph: String,
    #[serde(default)]
    pub label: String,
}

fn tool_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(constants::TOOL_ID_PATTERN).expect("TOOL_ID_PATTERN is valid"))
}

/// Parse a TOML string into a `ToolFile`.
///
/// `source_path` is used for error messages only (not for I/O).
pub fn parse_tool_toml(toml_content: &str, source_path: &Path) -> Result<ToolFile, ToolError> {
    toml::from_str(toml_content).map_err(|e| ToolError::TomlParse {
        path: source_path.to_path_buf(),
        source: e,
    })
}

/// Validate a parsed tool file into a user `ToolDefinition`.
pub fn validate_tool(file: ToolFile) -> Result<ToolDefinition, ToolError> {
    let ToolFileEntry { id, glyph, label } = file.tool;
    let id = id.trim().to_string();
    let glyph = glyph.trim().to_string();
    let label = label.trim().to_string();

    if id.is_empty() {
        return Err(ToolError::MissingField {
            tool_id: "(empty)".to_string(),
            field: "tool.id",
        });
    }
    if !tool_id_regex().is_match(&id) {
        return Err(ToolError::InvalidId {
            id,
            pattern: constants::TOOL_ID_PATTERN,
        });
    }
    if id == constants::DELETE_TOOL_ID {
        return Err(ToolError::ReservedId { id });
    }
    if glyph.is_empty() {
        return Err(ToolError::MissingField {
            tool_id: id,
            field: "tool.glyph",
        });
    }
    let glyph_chars = glyph.chars().count();
    if glyph_chars > constants::MAX_GLYPH_CHARS {
        return Err(ToolError::InvalidField {
            tool_id: id,
            field: "tool.glyph",
            reason: format!(
                "{glyph_chars} characters, maximum is {}",
                constants::MAX_GLYPH_CHARS
            ),
        });
    }
    if label.is_empty() {
        return Err(ToolError::MissingField {
            tool_id: id,
            field: "tool.label",
        });
    }
    let label_chars = label.chars().count();
    if label_chars > constants::MAX_LABEL_CHARS {
        return Err(ToolError::InvalidField {
            tool_id: id,
            field: "tool.label",
            reason: format!(
                "{label_chars} characters, maximum is {}",
                constants::MAX_LABEL_CHARS
            ),
        });
    }

    Ok(ToolDefinition {
        id,
        glyph,
        label,
        is_builtin: false,
    })
}
