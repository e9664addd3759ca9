// ShopGuide - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every error is recovered at the action boundary that produced it; none is
// fatal to the editor session.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all ShopGuide operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum PlannerError {
    /// An editor action referenced something that does not exist.
    Layout(LayoutError),

    /// Layout document export or import failed.
    Document(DocumentError),

    /// Named layout store operation failed.
    Store(StoreError),

    /// Tool definition loading or validation failed.
    Tool(ToolError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl PlannerError {
    /// True when the action had nothing to work on (shown as a warning,
    /// not a failure).
    pub fn is_empty_state(&self) -> bool {
        match self {
            Self::Document(e) => e.is_empty_state(),
            Self::Store(e) => e.is_empty_state(),
            _ => false,
        }
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(e) => write!(f, "Layout error: {e}"),
            Self::Document(e) => write!(f, "Document error: {e}"),
            Self::Store(e) => write!(f, "Layout store error: {e}"),
            Self::Tool(e) => write!(f, "Tool error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(e) => Some(e),
            Self::Document(e) => Some(e),
            Self::Store(e) => Some(e),
            Self::Tool(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Layout errors
// ---------------------------------------------------------------------------

/// Errors raised by editor actions that name a preset or tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// No built-in sample layout has this name.
    UnknownPreset { name: String },

    /// No registered tool has this id.
    UnknownTool { id: String },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPreset { name } => write!(f, "No sample layout named '{name}'"),
            Self::UnknownTool { id } => write!(f, "No tool with id '{id}'"),
        }
    }
}

impl std::error::Error for LayoutError {}

impl From<LayoutError> for PlannerError {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

// ---------------------------------------------------------------------------
// Document errors
// ---------------------------------------------------------------------------

/// Errors related to layout document export and import.
#[derive(Debug)]
pub enum DocumentError {
    /// Export attempted with zero placed cells.
    NothingToExport,

    /// The document text is not valid JSON or has the wrong shape.
    Parse { source: serde_json::Error },

    /// The document parsed but has no `layout` field.
    MissingLayout,

    /// The document is larger than the import limit.
    TooLarge { size: u64, max_size: u64 },

    /// Serialising the document failed.
    Serialize { source: serde_json::Error },

    /// I/O error reading or writing a document file.
    Io { path: PathBuf, source: io::Error },
}

impl DocumentError {
    /// True for the empty-state condition (warning rather than failure).
    pub fn is_empty_state(&self) -> bool {
        matches!(self, Self::NothingToExport)
    }
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingToExport => write!(
                f,
                "There is no layout to export. Place some elements on the grid first."
            ),
            Self::Parse { source } => write!(f, "Malformed layout document: {source}"),
            Self::MissingLayout => {
                write!(f, "Malformed layout document: missing required field 'layout'")
            }
            Self::TooLarge { size, max_size } => write!(
                f,
                "Layout document is {size} bytes, exceeds maximum of {max_size} bytes"
            ),
            Self::Serialize { source } => write!(f, "Failed to serialise layout: {source}"),
            Self::Io { path, source } => {
                write!(f, "Layout file I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse { source } => Some(source),
            Self::Serialize { source } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DocumentError> for PlannerError {
    fn from(e: DocumentError) -> Self {
        Self::Document(e)
    }
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Errors related to the named layout store.
#[derive(Debug)]
pub enum StoreError {
    /// Save attempted with zero placed cells.
    NothingToSave,

    /// No layout is stored under the requested name.
    NotFound { name: String },

    /// The layout name is blank or too long.
    InvalidName { name: String, reason: &'static str },

    /// The store file exists but cannot be parsed.
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// I/O error reading or writing the store file.
    Io { path: PathBuf, source: io::Error },
}

impl StoreError {
    /// True for the empty-state condition (warning rather than failure).
    pub fn is_empty_state(&self) -> bool {
        matches!(self, Self::NothingToSave)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingToSave => write!(
                f,
                "There is no layout to save. Place some elements on the grid first."
            ),
            Self::NotFound { name } => write!(f, "Layout '{name}' not found"),
            Self::InvalidName { name, reason } => {
                write!(f, "Invalid layout name '{name}': {reason}")
            }
            Self::Corrupt { path, source } => write!(
                f,
                "Layout store '{}' is corrupt: {source}",
                path.display()
            ),
            Self::Io { path, source } => {
                write!(f, "Layout store I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Corrupt { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<StoreError> for PlannerError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ---------------------------------------------------------------------------
// Tool errors
// ---------------------------------------------------------------------------

/// Errors related to user tool definition loading and validation.
#[derive(Debug)]
pub enum ToolError {
    /// TOML file could not be parsed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Tool file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A required field is missing or empty.
    MissingField { tool_id: String, field: &'static str },

    /// A field is present but unusable.
    InvalidField {
        tool_id: String,
        field: &'static str,
        reason: String,
    },

    /// The tool id does not match the allowed pattern.
    InvalidId { id: String, pattern: &'static str },

    /// The tool id is reserved for a built-in action.
    ReservedId { id: String },

    /// Maximum number of tools exceeded.
    TooManyTools { count: usize, max: usize },

    /// I/O error reading a tool file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Failed to parse TOML '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Tool file '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::MissingField { tool_id, field } => {
                write!(f, "Tool '{tool_id}': missing required field '{field}'")
            }
            Self::InvalidField {
                tool_id,
                field,
                reason,
            } => write!(f, "Tool '{tool_id}': invalid '{field}': {reason}"),
            Self::InvalidId { id, pattern } => {
                write!(f, "Tool id '{id}' does not match '{pattern}'")
            }
            Self::ReservedId { id } => {
                write!(f, "Tool id '{id}' is reserved and cannot be redefined")
            }
            Self::TooManyTools { count, max } => {
                write!(f, "Too many tools loaded ({count}), maximum is {max}")
            }
            Self::Io { path, source } => {
                write!(f, "I/O error reading tool '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ToolError> for PlannerError {
    fn from(e: ToolError) -> Self {
        Self::Tool(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for PlannerError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for ShopGuide results.
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_empty_state_classification() {
        assert!(DocumentError::NothingToExport.is_empty_state());
        assert!(!DocumentError::MissingLayout.is_empty_state());
        assert!(StoreError::NothingToSave.is_empty_state());
        assert!(!StoreError::NotFound {
            name: "x".to_string()
        }
        .is_empty_state());

        let top: PlannerError = DocumentError::NothingToExport.into();
        assert!(top.is_empty_state());
        let top: PlannerError = LayoutError::UnknownPreset {
            name: "x".to_string(),
        }
        .into();
        assert!(!top.is_empty_state());
    }

    #[test]
    fn test_parse_error_keeps_source_chain() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: PlannerError = DocumentError::Parse { source: json_err }.into();
        let doc = err.source().expect("top level wraps document error");
        assert!(doc.source().is_some(), "parse error must expose serde_json cause");
        assert!(err.to_string().starts_with("Document error: Malformed layout document"));
    }

    #[test]
    fn test_not_found_message_names_layout() {
        let err = StoreError::NotFound {
            name: "Branch 7".to_string(),
        };
        assert_eq!(err.to_string(), "Layout 'Branch 7' not found");
    }
}
