// ShopGuide - app/state.rs
//
// Editor session state. Holds the grid, the tool palette, the pointer
// tracker, the status line and the dialog flags.
// Owned by the eframe::App implementation.
//
// Every user action resolves its own errors into the status line; nothing
// here returns an error to the GUI.

use crate::app::session::{self, SessionData, SESSION_VERSION};
use crate::app::store::LayoutStore;
use crate::core::document::{self, ImportSummary, LayoutDocument};
use crate::core::grid::Grid;
use crate::core::interaction::{PointerInput, PointerTracker};
use crate::core::presets;
use crate::core::report;
use crate::core::tools::{Palette, ToolRegistry};
use crate::platform::config::AppConfig;
use crate::platform::fs::{self, LimitedRead};
use crate::util::constants;
use crate::util::error::{DocumentError, PlannerError, Result};
use chrono::{DateTime, Local, Utc};
use std::path::{Path, PathBuf};

/// Severity of the current status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Top-level editor state.
#[derive(Debug)]
pub struct EditorSession {
    pub grid: Grid,
    pub palette: Palette,
    pub tracker: PointerTracker,

    /// Validated configuration.
    pub config: AppConfig,

    /// Status message for the status bar.
    pub status_message: String,
    pub status_level: StatusLevel,

    /// Non-fatal problems from startup (config, tool files).
    pub warnings: Vec<String>,

    pub dark_mode: bool,

    /// Shop name entered in the export prompt (pre-filled next time).
    pub shop_name: String,

    /// Name field of the saved layouts dialog.
    pub layout_name_input: String,

    /// Saved layout names and save times, refreshed when the dialog opens.
    pub saved_layouts: Vec<(String, DateTime<Utc>)>,

    /// Summary of the last import; the summary dialog is shown while set.
    pub import_summary: Option<ImportSummary>,

    pub show_export_dialog: bool,
    pub show_saved_layouts: bool,
    pub show_cloud_dialog: bool,
    pub show_about: bool,

    /// Cloud dialog checkbox: also open the export prompt on continue.
    pub cloud_export_copy: bool,

    store: LayoutStore,
    session_path: Option<PathBuf>,
}

impl EditorSession {
    /// Create an editor with an empty grid and the default tool active.
    pub fn new(
        registry: ToolRegistry,
        config: AppConfig,
        store: LayoutStore,
        session_path: Option<PathBuf>,
    ) -> Self {
        Self {
            grid: Grid::new(),
            palette: Palette::new(registry),
            tracker: PointerTracker::new(),
            status_message: "Ready. Pick a tool and paint the grid.".to_string(),
            status_level: StatusLevel::Info,
            warnings: Vec::new(),
            dark_mode: config.dark_mode,
            shop_name: config.default_shop_name.clone(),
            layout_name_input: String::new(),
            saved_layouts: Vec::new(),
            import_summary: None,
            show_export_dialog: false,
            show_saved_layouts: false,
            show_cloud_dialog: false,
            show_about: false,
            cloud_export_copy: true,
            config,
            store,
            session_path,
        }
    }

    // -------------------------------------------------------------------------
    // Status helpers
    // -------------------------------------------------------------------------

    fn info(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_level = StatusLevel::Info;
    }

    /// Resolve a failed action into the status line.
    fn fail(&mut self, action: &str, err: impl Into<PlannerError>) {
        let err = err.into();
        if err.is_empty_state() {
            tracing::warn!(action, error = %err, "Nothing to act on");
            self.status_level = StatusLevel::Warning;
        } else {
            tracing::error!(action, error = %err, "Action failed");
            self.status_level = StatusLevel::Error;
        }
        self.status_message = format!("{action} failed: {err}");
    }

    // -------------------------------------------------------------------------
    // Session persistence
    // -------------------------------------------------------------------------

    /// Apply a restored session. Unknown tools are ignored.
    pub fn restore_session(&mut self, data: SessionData) {
        self.dark_mode = data.dark_mode;
        if let Some(tool) = data.active_tool {
            if self.palette.select(&tool).is_err() {
                tracing::debug!(tool = %tool, "Saved tool no longer exists");
            }
        }
        if let Some(name) = data.shop_name {
            self.shop_name = name;
        }
    }

    pub fn session_snapshot(&self) -> SessionData {
        SessionData {
            version: SESSION_VERSION,
            dark_mode: self.dark_mode,
            active_tool: Some(self.palette.active().id.clone()),
            shop_name: Some(self.shop_name.clone()),
        }
    }

    /// Save the session if a session path is configured. Failures are logged.
    pub fn save_session(&self) {
        if let Some(ref path) = self.session_path {
            if let Err(e) = session::save(&self.session_snapshot(), path) {
                tracing::warn!(error = %e, "Failed to save session");
            }
        }
    }

    // -------------------------------------------------------------------------
    // Palette and painting
    // -------------------------------------------------------------------------

    pub fn select_tool(&mut self, id: &str) {
        match self.palette.select(id) {
            Ok(tool) => {
                let caption = tool.caption();
                self.info(format!("Tool: {caption}"));
            }
            Err(e) => self.fail("Select tool", e),
        }
    }

    /// Feed pointer input; paints when the tracker says so.
    /// Returns true if the grid changed.
    pub fn pointer(&mut self, input: PointerInput) -> bool {
        let Some(coord) = self.tracker.handle(input) else {
            return false;
        };
        let tool = self.palette.active();
        self.grid.apply_tool(coord, tool);
        tracing::debug!(tool = %tool.id, coord = %coord, "Cell painted");
        true
    }

    /// Clear every cell. The active tool is unchanged.
    pub fn clear_all(&mut self) {
        self.grid.clear_all();
        tracing::info!("Grid cleared");
        self.info("Grid cleared.");
    }

    pub fn load_sample(&mut self, name: &str) {
        match presets::load_sample(&mut self.grid, name) {
            Ok(preset) => {
                let total = self.grid.stats().total_placed();
                self.info(format!("Sample layout loaded: {} ({total} cells).", preset.title));
            }
            Err(e) => self.fail("Load sample", e),
        }
    }

    // -------------------------------------------------------------------------
    // Export / import
    // -------------------------------------------------------------------------

    /// Open the export prompt, or warn when there is nothing to export.
    pub fn begin_export(&mut self) {
        if self.grid.is_empty() {
            self.fail("Export", DocumentError::NothingToExport);
        } else {
            self.show_export_dialog = true;
        }
    }

    /// Close the export prompt and build the document. `input` is `None`
    /// when the prompt was cancelled; the fallback name is used then.
    pub fn finish_export_prompt(
        &mut self,
        input: Option<&str>,
        now: DateTime<Utc>,
    ) -> Option<LayoutDocument> {
        self.show_export_dialog = false;
        self.export_document(input, now)
    }

    /// Build the document for the current grid. `None` after a failure.
    /// A name typed by the user is remembered for the next prompt.
    pub fn export_document(
        &mut self,
        shop_name_input: Option<&str>,
        now: DateTime<Utc>,
    ) -> Option<LayoutDocument> {
        match document::export_document(&self.grid, shop_name_input, now) {
            Ok(doc) => {
                if shop_name_input.is_some() {
                    self.shop_name = doc.shop_name.clone();
                }
                Some(doc)
            }
            Err(e) => {
                self.fail("Export", e);
                None
            }
        }
    }

    /// Write `doc` to `path`. Returns true on success.
    pub fn write_export(&mut self, doc: &LayoutDocument, path: &Path) -> bool {
        match write_document_file(doc, path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), cells = doc.layout.len(), "Layout exported");
                self.info(format!(
                    "Exported '{}' ({} cells) to {}. Upload this file to cloud storage to share it.",
                    doc.shop_name,
                    doc.layout.len(),
                    path.display()
                ));
                true
            }
            Err(e) => {
                self.fail("Export", e);
                false
            }
        }
    }

    /// Suggested file name for `doc`.
    pub fn export_file_name(doc: &LayoutDocument) -> String {
        let now = doc.created_at.unwrap_or_else(Utc::now);
        document::export_file_name(&doc.shop_name, now)
    }

    /// Import document text. Returns true when the grid was replaced.
    pub fn import_document(&mut self, text: &str) -> bool {
        match document::import_document(&mut self.grid, text) {
            Ok(summary) => {
                self.info(format!(
                    "Imported '{}' ({} cells).",
                    summary.shop_name, summary.applied
                ));
                self.import_summary = Some(summary);
                true
            }
            Err(e) => {
                self.fail("Import", e);
                false
            }
        }
    }

    /// Read and import a document file.
    pub fn import_from_path(&mut self, path: &Path) -> bool {
        match read_document_file(path) {
            Ok(text) => {
                tracing::info!(path = %path.display(), "Importing layout file");
                self.import_document(&text)
            }
            Err(e) => {
                self.fail("Import", e);
                false
            }
        }
    }

    // -------------------------------------------------------------------------
    // Named layouts
    // -------------------------------------------------------------------------

    pub fn open_saved_layouts(&mut self) {
        self.refresh_saved_layouts();
        self.show_saved_layouts = true;
    }

    pub fn refresh_saved_layouts(&mut self) {
        match self.store.names() {
            Ok(names) => self.saved_layouts = names,
            Err(e) => {
                self.saved_layouts.clear();
                self.fail("List saved layouts", e);
            }
        }
    }

    pub fn save_named(&mut self, name: &str, now: DateTime<Utc>) -> bool {
        let result = self.store.save_named(name, &self.grid, now);
        match result {
            Ok(()) => {
                self.info(format!("Layout '{}' saved.", name.trim()));
                self.refresh_saved_layouts();
                true
            }
            Err(e) => {
                self.fail("Save layout", e);
                false
            }
        }
    }

    pub fn load_named(&mut self, name: &str) -> bool {
        match self.store.load_named(name) {
            Ok(stored) => {
                let ignored = self.grid.replace_all(&stored.data);
                let saved = stored.timestamp.with_timezone(&Local);
                tracing::info!(
                    name = name.trim(),
                    cells = self.grid.stats().total_placed(),
                    ignored,
                    "Layout loaded"
                );
                self.info(format!(
                    "Layout '{}' loaded (saved {}).",
                    name.trim(),
                    saved.format("%Y-%m-%d %H:%M")
                ));
                true
            }
            Err(e) => {
                self.fail("Load layout", e);
                false
            }
        }
    }

    pub fn remove_named(&mut self, name: &str) {
        match self.store.remove(name) {
            Ok(()) => {
                self.info(format!("Layout '{}' deleted.", name.trim()));
                self.refresh_saved_layouts();
            }
            Err(e) => self.fail("Delete layout", e),
        }
    }

    // -------------------------------------------------------------------------
    // Cloud hand-off, text plan, view
    // -------------------------------------------------------------------------

    /// Show the cloud hand-off dialog, or warn when there is nothing to save.
    pub fn begin_cloud_save(&mut self) {
        if self.grid.is_empty() {
            self.fail("Save to cloud", crate::util::error::StoreError::NothingToSave);
        } else {
            self.show_cloud_dialog = true;
        }
    }

    /// Continue the cloud hand-off: open the console, then the export
    /// prompt when the checkbox is ticked.
    pub fn confirm_cloud_save(&mut self) {
        self.show_cloud_dialog = false;
        self.open_cloud_console();
        if self.cloud_export_copy {
            self.begin_export();
        }
    }

    /// Open the configured storage console in the browser.
    pub fn open_cloud_console(&mut self) {
        let url = self.config.cloud_console_url.clone();
        match fs::open_url(&url) {
            Ok(()) => {
                tracing::info!(url = %url, "Opened cloud console");
                self.info(format!("Opened {url} in your browser."));
            }
            Err(e) => {
                self.status_level = StatusLevel::Warning;
                self.status_message = format!("Could not open a browser ({e}). Visit {url} manually.");
            }
        }
    }

    /// Text plan of the grid titled with the current shop name.
    pub fn text_plan(&self) -> String {
        report::text_plan(&self.grid, &self.shop_name)
    }

    /// Note that the plan was copied (the GUI owns the clipboard).
    pub fn plan_copied(&mut self) {
        self.info(format!(
            "Copied plan ({} cells) to clipboard.",
            self.grid.stats().total_placed()
        ));
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
        tracing::debug!(dark_mode = self.dark_mode, "Theme toggled");
    }

    /// Initial layout named on the command line.
    pub fn apply_startup(&mut self, layout_file: Option<&Path>, sample: Option<&str>) {
        if let Some(path) = layout_file {
            self.import_from_path(path);
            // The summary dialog is for interactive imports only.
            self.import_summary = None;
        } else if let Some(name) = sample {
            self.load_sample(name);
        }
    }
}

fn read_document_file(path: &Path) -> Result<String> {
    let read = fs::read_limited(path, constants::MAX_DOCUMENT_SIZE).map_err(|e| {
        DocumentError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    })?;
    match read {
        LimitedRead::Text(text) => Ok(text),
        LimitedRead::TooLarge { size } => Err(DocumentError::TooLarge {
            size,
            max_size: constants::MAX_DOCUMENT_SIZE,
        }
        .into()),
    }
}

fn write_document_file(doc: &LayoutDocument, path: &Path) -> Result<()> {
    let json = document::to_json_pretty(doc)?;
    fs::write_atomic(path, json.as_bytes()).map_err(|e| {
        DocumentError::Io {
            path: path.to_path_buf(),
            source: e,
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Coordinate;
    use tempfile::TempDir;

    fn editor(dir: &TempDir) -> EditorSession {
        EditorSession::new(
            ToolRegistry::builtin(),
            AppConfig::default(),
            LayoutStore::open(dir.path().join(constants::LAYOUT_STORE_FILE_NAME)),
            Some(session::session_path(dir.path())),
        )
    }

    fn c(s: &str) -> Coordinate {
        Coordinate::parse(s).unwrap()
    }

    #[test]
    fn test_paint_and_drag() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        ed.select_tool("shelf");
        assert!(ed.pointer(PointerInput::Pressed(c("B-03"))));
        assert!(ed.pointer(PointerInput::Moved {
            over: Some(c("B-04")),
            primary_down: true
        }));
        assert!(!ed.pointer(PointerInput::Moved {
            over: Some(c("B-05")),
            primary_down: false
        }));
        assert_eq!(ed.grid.stats().shelf_count(), 2);
    }

    #[test]
    fn test_unknown_tool_reports_error() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        ed.select_tool("escalator");
        assert_eq!(ed.status_level, StatusLevel::Error);
        assert!(ed.palette.is_active("wall"));
    }

    #[test]
    fn test_clear_all_keeps_tool() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        ed.select_tool("cash");
        ed.load_sample("supermarket-basic");
        ed.clear_all();
        assert!(ed.grid.is_empty());
        assert!(ed.palette.is_active("cash"));
    }

    #[test]
    fn test_export_on_empty_grid_warns() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        ed.begin_export();
        assert!(!ed.show_export_dialog);
        assert_eq!(ed.status_level, StatusLevel::Warning);

        ed.begin_cloud_save();
        assert!(!ed.show_cloud_dialog);
        assert_eq!(ed.status_level, StatusLevel::Warning);
    }

    #[test]
    fn test_export_then_import_file() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        ed.load_sample("supermarket-basic");
        ed.begin_export();
        assert!(ed.show_export_dialog);

        let doc = ed.export_document(Some("Main Street"), Utc::now()).unwrap();
        let name = EditorSession::export_file_name(&doc);
        assert!(name.starts_with("shopguide-layout-Main-Street-"));
        let path = dir.path().join(name);
        assert!(ed.write_export(&doc, &path));

        let before = ed.grid.clone();
        ed.clear_all();
        assert!(ed.import_from_path(&path));
        assert_eq!(ed.grid, before);
        let summary = ed.import_summary.as_ref().unwrap();
        assert_eq!(summary.shop_name, "Main Street");
        assert_eq!(summary.total, 60);
        assert_eq!(ed.shop_name, "Main Street");
    }

    #[test]
    fn test_cancelled_export_prompt_uses_fallback_name() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        ed.load_sample("convenience-store");
        ed.shop_name = "Deli".to_string();
        ed.begin_export();

        let doc = ed.finish_export_prompt(None, Utc::now()).unwrap();
        assert!(!ed.show_export_dialog);
        assert_eq!(doc.shop_name, constants::FALLBACK_SHOP_NAME);
        assert_eq!(doc.layout.len(), 48);
        assert!(EditorSession::export_file_name(&doc).starts_with("shopguide-layout-Untitled-"));
        // The remembered name is kept for the next prompt.
        assert_eq!(ed.shop_name, "Deli");

        ed.begin_export();
        let doc = ed.finish_export_prompt(Some("  "), Utc::now()).unwrap();
        assert_eq!(doc.shop_name, constants::FALLBACK_SHOP_NAME);
    }

    #[test]
    fn test_import_failure_leaves_grid() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        ed.load_sample("convenience-store");
        let before = ed.grid.clone();

        assert!(!ed.import_document(r#"{"shopName":"No layout"}"#));
        assert_eq!(ed.status_level, StatusLevel::Error);
        assert!(ed.status_message.contains("layout"));
        assert_eq!(ed.grid, before);

        assert!(!ed.import_from_path(&dir.path().join("missing.json")));
        assert_eq!(ed.grid, before);
    }

    #[test]
    fn test_import_rejects_oversized_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("huge.json");
        std::fs::write(&path, " ".repeat(constants::MAX_DOCUMENT_SIZE as usize + 1)).unwrap();
        let mut ed = editor(&dir);
        assert!(!ed.import_from_path(&path));
        assert!(ed.status_message.contains("exceeds maximum"));
    }

    #[test]
    fn test_named_layouts() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);

        assert!(!ed.save_named("Empty", Utc::now()));
        assert_eq!(ed.status_level, StatusLevel::Warning);

        ed.load_sample("supermarket-basic");
        assert!(ed.save_named("Flagship", Utc::now()));
        assert_eq!(ed.saved_layouts.len(), 1);

        ed.clear_all();
        assert!(ed.load_named("Flagship"));
        assert_eq!(ed.grid.stats().total_placed(), 60);

        let before = ed.grid.clone();
        assert!(!ed.load_named("Branch"));
        assert!(ed.status_message.contains("Layout 'Branch' not found"));
        assert_eq!(ed.grid, before);

        ed.remove_named("Flagship");
        assert!(ed.saved_layouts.is_empty());
    }

    #[test]
    fn test_session_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        ed.select_tool("cooling");
        ed.toggle_dark_mode();
        ed.shop_name = "Deli".to_string();
        ed.save_session();

        let mut restored = editor(&dir);
        let data = session::load(&session::session_path(dir.path())).unwrap();
        restored.restore_session(data);
        assert!(restored.palette.is_active("cooling"));
        assert!(restored.dark_mode);
        assert_eq!(restored.shop_name, "Deli");
    }

    #[test]
    fn test_startup_sample_and_unknown_sample() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        ed.apply_startup(None, Some("convenience-store"));
        assert_eq!(ed.grid.stats().cash_count(), 1);

        ed.apply_startup(None, Some("mall"));
        assert_eq!(ed.status_level, StatusLevel::Error);
        assert_eq!(ed.grid.stats().cash_count(), 1);
    }

    #[test]
    fn test_text_plan_uses_shop_name() {
        let dir = TempDir::new().unwrap();
        let mut ed = editor(&dir);
        ed.shop_name = "Corner".to_string();
        assert!(ed.text_plan().starts_with("Corner\n"));
    }
}
