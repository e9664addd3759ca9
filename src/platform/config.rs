// ShopGuide - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for ShopGuide data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/shopguide/ or %APPDATA%\ShopGuide\config\)
    pub config_dir: PathBuf,

    /// User tool directory (e.g. ~/.config/shopguide/tools/ or %APPDATA%\ShopGuide\tools\)
    pub user_tools_dir: PathBuf,

    /// Data directory for the session and the named layout store.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let user_tools_dir = app_root(&config_dir).join(constants::TOOLS_DIR_NAME);
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                tools = %user_tools_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                user_tools_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                user_tools_dir: fallback.join(constants::TOOLS_DIR_NAME),
                data_dir: fallback,
            }
        }
    }

    /// Path of the named layout store file.
    pub fn layout_store_path(&self) -> PathBuf {
        self.data_dir.join(constants::LAYOUT_STORE_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub ui: UiSection,
    pub export: ExportSection,
    pub cloud: CloudSection,
    pub tools: ToolsSection,
    pub logging: LoggingSection,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
    /// Grid cell edge length in points.
    pub cell_size: Option<f32>,
}

/// `[export]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Shop name pre-filled in the export prompt.
    pub default_shop_name: Option<String>,
}

/// `[cloud]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct CloudSection {
    /// Storage console opened by "Save to Cloud".
    pub console_url: Option<String>,
}

/// `[tools]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ToolsSection {
    /// Additional tool directory.
    pub user_tool_directory: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- UI --
    /// Dark mode (true) or light mode (false). A saved session overrides it.
    pub dark_mode: bool,
    /// Body font size in points.
    pub font_size: f32,
    /// Grid cell edge length in points.
    pub cell_size: f32,

    // -- Export --
    pub default_shop_name: String,

    // -- Cloud --
    pub cloud_console_url: String,

    // -- Tools --
    /// Tool directory overriding the platform default.
    pub user_tool_dir: Option<PathBuf>,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            font_size: constants::DEFAULT_FONT_SIZE,
            cell_size: constants::DEFAULT_CELL_SIZE,
            default_shop_name: constants::DEFAULT_SHOP_NAME.to_string(),
            cloud_console_url: constants::DEFAULT_CLOUD_CONSOLE_URL.to_string(),
            user_tool_dir: None,
            log_level: None,
        }
    }
}

/// Directory holding config.toml and tools/.
///
/// On Windows the platform config dir is `%APPDATA%\ShopGuide\config`; the
/// user-visible files live one level up so the path stays short. Elsewhere
/// the config dir itself is used.
fn app_root(config_dir: &Path) -> &Path {
    match (config_dir.file_name(), config_dir.parent()) {
        (Some(name), Some(parent)) if name == "config" => parent,
        _ => config_dir,
    }
}

/// Path of config.toml for the given config directory.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    app_root(config_dir).join(constants::CONFIG_FILE_NAME)
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal problems.
/// If the file does not exist, returns defaults with no warnings (first run).
/// If the file is unreadable or unparseable, returns defaults with one error;
/// the application still starts and the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<ConfigError>) {
    let config_path = config_file_path(config_dir);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path,
                source: e,
            };
            tracing::warn!("{err}. Using defaults.");
            return (AppConfig::default(), vec![err]);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: config_path,
                source: e,
            };
            tracing::warn!("{err}. Using defaults.");
            return (AppConfig::default(), vec![err]);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");
    validate(raw)
}

/// Validate every field against named constants, accumulating all problems.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<ConfigError>) {
    let mut config = AppConfig::default();
    let mut warnings = Vec::new();

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => warnings.push(ConfigError::ValueOutOfRange {
                field: "[ui] theme".to_string(),
                value: other.to_string(),
                expected: "\"dark\" or \"light\"; using light".to_string(),
            }),
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[ui] font_size".to_string(),
                value: size.to_string(),
                expected: format!(
                    "{}-{}; using {}",
                    constants::MIN_FONT_SIZE,
                    constants::MAX_FONT_SIZE,
                    constants::DEFAULT_FONT_SIZE
                ),
            });
        }
    }

    // -- UI: cell_size --
    if let Some(size) = raw.ui.cell_size {
        if (constants::MIN_CELL_SIZE..=constants::MAX_CELL_SIZE).contains(&size) {
            config.cell_size = size;
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[ui] cell_size".to_string(),
                value: size.to_string(),
                expected: format!(
                    "{}-{}; using {}",
                    constants::MIN_CELL_SIZE,
                    constants::MAX_CELL_SIZE,
                    constants::DEFAULT_CELL_SIZE
                ),
            });
        }
    }

    // -- Export: default_shop_name --
    if let Some(name) = raw.export.default_shop_name {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > constants::MAX_LAYOUT_NAME_CHARS {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[export] default_shop_name".to_string(),
                value: name.to_string(),
                expected: format!(
                    "1-{} characters; using \"{}\"",
                    constants::MAX_LAYOUT_NAME_CHARS,
                    constants::DEFAULT_SHOP_NAME
                ),
            });
        } else {
            config.default_shop_name = name.to_string();
        }
    }

    // -- Cloud: console_url --
    if let Some(url) = raw.cloud.console_url {
        if url.starts_with("https://") && url.len() > "https://".len() {
            config.cloud_console_url = url;
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[cloud] console_url".to_string(),
                value: url,
                expected: format!(
                    "an https:// URL; using {}",
                    constants::DEFAULT_CLOUD_CONSOLE_URL
                ),
            });
        }
    }

    // -- Tools: user_tool_directory --
    if let Some(dir) = raw.tools.user_tool_directory {
        if !dir.trim().is_empty() {
            config.user_tool_dir = Some(PathBuf::from(dir));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[logging] level".to_string(),
                value: level.clone(),
                expected: format!(
                    "error, warn, info, debug or trace; using {}",
                    constants::DEFAULT_LOG_LEVEL
                ),
            });
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}
