// ShopGuide - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "ShopGuide Layout Planner";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "ShopGuide";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Grid geometry
// =============================================================================

/// Number of rows (lettered A..J).
pub const GRID_ROWS: usize = 10;

/// Number of columns (numbered 1..10).
pub const GRID_COLS: usize = 10;

/// Total number of cells. The grid is never resized.
pub const GRID_CELLS: usize = GRID_ROWS * GRID_COLS;

/// Letter of the first row.
pub const FIRST_ROW_LETTER: u8 = b'A';

// =============================================================================
// Tools
// =============================================================================

/// Tool active when the editor starts.
pub const DEFAULT_TOOL_ID: &str = "wall";

/// Reserved id of the eraser pseudo-tool.
pub const DELETE_TOOL_ID: &str = "delete";

/// Maximum number of tools in the registry (built-in + user).
pub const MAX_TOOLS: usize = 32;

/// Maximum size of a user tool TOML file in bytes.
pub const MAX_TOOL_FILE_SIZE: u64 = 8 * 1024; // 8 KB

/// Maximum glyph length in characters. Glyphs are short display symbols.
pub const MAX_GLYPH_CHARS: usize = 8;

/// Maximum tool label length in characters.
pub const MAX_LABEL_CHARS: usize = 32;

/// Pattern every tool id must match.
pub const TOOL_ID_PATTERN: &str = r"^[a-z][a-z0-9_-]{0,31}$";

// =============================================================================
// Layout documents
// =============================================================================

/// Version stamp written into exported layout documents.
pub const DOCUMENT_VERSION: &str = "1.0";

/// Shop name offered in the export prompt.
pub const DEFAULT_SHOP_NAME: &str = "My Supermarket";

/// Shop name used when the export prompt is left empty or cancelled.
pub const FALLBACK_SHOP_NAME: &str = "Untitled";

/// Prefix of exported layout file names.
pub const EXPORT_FILE_PREFIX: &str = "shopguide-layout";

/// Maximum accepted size of an imported layout document in bytes.
pub const MAX_DOCUMENT_SIZE: u64 = 1024 * 1024; // 1 MB

/// Preset loaded when `--sample` is given without a name.
pub const DEFAULT_PRESET: &str = "supermarket-basic";

// =============================================================================
// Named layout store
// =============================================================================

/// File holding every named layout (stored in the platform data directory).
pub const LAYOUT_STORE_FILE_NAME: &str = "layouts.json";

/// Maximum length of a layout name in characters.
pub const MAX_LAYOUT_NAME_CHARS: usize = 64;

// =============================================================================
// Cloud hand-off
// =============================================================================

/// Storage console opened by "Save to Cloud". The application never uploads
/// anything itself.
pub const DEFAULT_CLOUD_CONSOLE_URL: &str = "https://console.cloud.google.com/storage";

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Default edge length of one grid cell in points.
pub const DEFAULT_CELL_SIZE: f32 = 48.0;

/// Minimum configurable cell size (points).
pub const MIN_CELL_SIZE: f32 = 24.0;

/// Maximum configurable cell size (points).
pub const MAX_CELL_SIZE: f32 = 96.0;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Session persistence file name (stored in the platform data directory).
pub const SESSION_FILE_NAME: &str = "session.json";

/// User tool definitions subdirectory name.
pub const TOOLS_DIR_NAME: &str = "tools";
