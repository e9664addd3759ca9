// ShopGuide - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading and logging initialisation
// 3. Tool loading (built-in + user-defined), session restore
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use shopguide::app;

pub use shopguide::core;
pub use shopguide::platform;
pub use shopguide::ui;
pub use shopguide::util;

use clap::Parser;
use std::path::PathBuf;

/// Configure fonts for the egui context.
///
/// On Windows, loads Segoe UI, Segoe UI Emoji, and Segoe UI Symbol from the
/// system font directory and sets them as the primary proportional fonts.
/// These fonts have much broader Unicode coverage than the egui built-ins,
/// so the palette glyphs render instead of squares.
/// The built-in egui fonts are kept as final fallbacks so no glyph is ever lost.
///
/// On non-Windows platforms the egui defaults are used unchanged.
fn configure_fonts(ctx: &egui::Context) {
    #[cfg(target_os = "windows")]
    {
        let mut fonts = egui::FontDefinitions::default();

        // Load Windows system fonts in priority order.
        // Segoe UI covers most Latin and common UI symbols.
        // Segoe UI Emoji adds Unicode emoji and many pictographic symbols.
        // Segoe UI Symbol covers Mathematical, Braille, and other specialist blocks.
        let candidates: &[(&str, &str)] = &[
            ("Segoe UI", r"C:\Windows\Fonts\segoeui.ttf"),
            ("Segoe UI Emoji", r"C:\Windows\Fonts\seguiemj.ttf"),
            ("Segoe UI Symbol", r"C:\Windows\Fonts\seguisym.ttf"),
        ];

        let mut loaded_names: Vec<&str> = Vec::new();
        for (name, path) in candidates {
            match std::fs::read(path) {
                Ok(data) => {
                    fonts
                        .font_data
                        .insert((*name).to_owned(), egui::FontData::from_owned(data).into());
                    loaded_names.push(name);
                    tracing::debug!(font = name, "Loaded Windows system font");
                }
                Err(e) => {
                    tracing::warn!(
                        font = name,
                        error = %e,
                        "Failed to load Windows system font; some symbols may render as squares"
                    );
                }
            }
        }

        if !loaded_names.is_empty() {
            // Proportional: place Windows fonts first so they take priority over
            // the egui default (NotoSans), while keeping it as a final fallback.
            if let Some(proportional) = fonts.families.get_mut(&egui::FontFamily::Proportional) {
                for (i, name) in loaded_names.iter().enumerate() {
                    proportional.insert(i, (*name).to_owned());
                }
            }

            // Monospace: append Windows fonts as symbol fallbacks after the primary
            // monospace font (Hack) so the text plan keeps its column alignment.
            if let Some(monospace) = fonts.families.get_mut(&egui::FontFamily::Monospace) {
                for name in &loaded_names {
                    monospace.push((*name).to_owned());
                }
            }

            ctx.set_fonts(fonts);
            tracing::info!(fonts = ?loaded_names, "Windows system fonts configured");
        }
    }

    // On non-Windows platforms the egui built-in fonts are used unchanged.
    #[cfg(not(target_os = "windows"))]
    let _ = ctx;
}

/// ShopGuide - Shop floor layout planner.
///
/// Paint walls, shelves, cooling, entrances and checkouts on a 10x10 grid,
/// then export the layout as JSON or keep it under a name.
#[derive(Parser, Debug)]
#[command(name = "ShopGuide", version, about)]
struct Cli {
    /// Layout JSON file to import on startup.
    layout_file: Option<PathBuf>,

    /// Additional directory containing user-defined tool files.
    #[arg(short = 't', long = "tool-dir")]
    tool_dir: Option<PathBuf>,

    /// Sample layout to load on startup (ignored when a file is given).
    /// Without a name the default sample is loaded.
    #[arg(
        short = 's',
        long = "sample",
        num_args = 0..=1,
        default_missing_value = util::constants::DEFAULT_PRESET
    )]
    sample: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and load config before logging so the config
    // level can take part in filter selection.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_errors) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "ShopGuide starting"
    );

    let mut warnings: Vec<String> = Vec::new();
    for err in &config_errors {
        tracing::warn!(error = %err, "Config warning");
        warnings.push(err.to_string());
    }

    // Tool directory: CLI override > config > platform default
    let user_tool_dir = cli
        .tool_dir
        .as_deref()
        .or(config.user_tool_dir.as_deref())
        .unwrap_or(&platform_paths.user_tools_dir);

    let (tools, tool_errors) = app::tool_mgr::load_all_tools(Some(user_tool_dir));
    for err in &tool_errors {
        tracing::warn!(error = %err, "Tool loading warning");
        warnings.push(err.to_string());
    }

    tracing::info!(tools = tools.len(), "Ready to launch GUI");

    let store = app::store::LayoutStore::open(platform_paths.layout_store_path());
    let session_path = app::session::session_path(&platform_paths.data_dir);
    let restored = app::session::load(&session_path);

    let mut state = app::state::EditorSession::new(tools, config, store, Some(session_path));
    state.warnings = warnings;
    if let Some(data) = restored {
        state.restore_session(data);
    }
    state.apply_startup(cli.layout_file.as_deref(), cli.sample.as_deref());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1000.0, 720.0])
            .with_min_inner_size([700.0, 520.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            Ok(Box::new(gui::ShopGuideApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch ShopGuide GUI: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_flag_without_name_uses_default_preset() {
        let cli = Cli::try_parse_from(["shopguide", "--sample"]).unwrap();
        assert_eq!(cli.sample.as_deref(), Some(util::constants::DEFAULT_PRESET));

        let cli = Cli::try_parse_from(["shopguide", "-s", "convenience-store"]).unwrap();
        assert_eq!(cli.sample.as_deref(), Some("convenience-store"));

        let cli = Cli::try_parse_from(["shopguide", "plan.json"]).unwrap();
        assert_eq!(cli.sample, None);
        assert_eq!(cli.layout_file, Some(PathBuf::from("plan.json")));
    }
}
