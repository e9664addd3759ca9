// ShopGuide - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants::{
    DELETE_TOOL_ID, FIRST_ROW_LETTER, GRID_CELLS, GRID_COLS, GRID_ROWS,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Coordinate
// =============================================================================

/// Address of one grid cell: row letter A..J and column number 1..10.
///
/// The derived ordering is row-major, which is also the grid order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    /// Zero-based row index (0 = 'A').
    row: u8,
    /// One-based column number.
    column: u8,
}

impl Coordinate {
    /// Build a coordinate from a zero-based row index and a one-based column.
    /// Returns `None` outside the grid.
    pub fn new(row_index: usize, column: usize) -> Option<Self> {
        if row_index < GRID_ROWS && (1..=GRID_COLS).contains(&column) {
            Some(Self {
                row: row_index as u8,
                column: column as u8,
            })
        } else {
            None
        }
    }

    /// Coordinate of the cell at `index` in grid order (0 = A-01, 99 = J-10).
    pub fn from_index(index: usize) -> Option<Self> {
        if index < GRID_CELLS {
            Self::new(index / GRID_COLS, index % GRID_COLS + 1)
        } else {
            None
        }
    }

    /// Position of this coordinate in grid order.
    pub fn index(self) -> usize {
        self.row as usize * GRID_COLS + (self.column as usize - 1)
    }

    /// Zero-based row index.
    pub fn row_index(self) -> usize {
        self.row as usize
    }

    /// Row letter ('A'..'J').
    pub fn row_letter(self) -> char {
        (FIRST_ROW_LETTER + self.row) as char
    }

    /// One-based column number.
    pub fn column(self) -> usize {
        self.column as usize
    }

    /// Parse the canonical form `"<Letter>-<02d>"`.
    ///
    /// Anything else (lowercase letters, missing zero padding, out-of-range
    /// rows or columns) is not a coordinate.
    pub fn parse(s: &str) -> Option<Self> {
        let (row, column) = s.split_once('-')?;

        let mut letters = row.chars();
        let letter = letters.next()?;
        if letters.next().is_some() || !letter.is_ascii_uppercase() {
            return None;
        }
        let row_index = (letter as u8).checked_sub(FIRST_ROW_LETTER)? as usize;

        if column.len() != 2 || !column.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let column: usize = column.parse().ok()?;

        Self::new(row_index, column)
    }

    /// Every coordinate in grid order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..GRID_CELLS).filter_map(Coordinate::from_index)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.row_letter(), self.column)
    }
}

// =============================================================================
// Tool kind
// =============================================================================

/// Kind of element occupying a cell.
///
/// The built-in kinds have fixed ids. Any other id, whether from a user tool
/// definition or from a document written by a newer tool set, is kept
/// verbatim as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ToolKind {
    Wall,
    Shelf,
    Cooling,
    Entrance,
    Cash,
    Custom(String),
}

impl ToolKind {
    /// The built-in kinds in palette order.
    pub fn builtin() -> &'static [ToolKind] {
        &[
            ToolKind::Wall,
            ToolKind::Shelf,
            ToolKind::Cooling,
            ToolKind::Entrance,
            ToolKind::Cash,
        ]
    }

    /// Map an id string to its kind.
    pub fn from_id(id: &str) -> Self {
        match id {
            "wall" => ToolKind::Wall,
            "shelf" => ToolKind::Shelf,
            "cooling" => ToolKind::Cooling,
            "entrance" => ToolKind::Entrance,
            "cash" => ToolKind::Cash,
            other => ToolKind::Custom(other.to_string()),
        }
    }

    /// Stable id string (used in documents and tool definitions).
    pub fn id(&self) -> &str {
        match self {
            ToolKind::Wall => "wall",
            ToolKind::Shelf => "shelf",
            ToolKind::Cooling => "cooling",
            ToolKind::Entrance => "entrance",
            ToolKind::Cash => "cash",
            ToolKind::Custom(id) => id,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ToolKind::Custom(_))
    }
}

impl From<String> for ToolKind {
    fn from(id: String) -> Self {
        ToolKind::from_id(&id)
    }
}

impl From<ToolKind> for String {
    fn from(kind: ToolKind) -> Self {
        kind.id().to_string()
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// =============================================================================
// Placement
// =============================================================================

/// The element occupying one cell.
///
/// The glyph is copied from the tool at placement time, so later changes to
/// a tool's glyph never alter cells that are already placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(rename = "tool")]
    pub kind: ToolKind,

    #[serde(rename = "emoji")]
    pub glyph: String,
}

impl Placement {
    pub fn new(kind: ToolKind, glyph: impl Into<String>) -> Self {
        Self {
            kind,
            glyph: glyph.into(),
        }
    }
}

/// Mapping of coordinate strings to placements.
///
/// Keys are strings rather than `Coordinate` so that documents from other
/// tool sets can carry coordinates this grid does not know; those are
/// ignored when applied. Canonical keys sort in grid order.
pub type LayoutMap = BTreeMap<String, Placement>;

// =============================================================================
// Tool definition
// =============================================================================

/// A paint tool offered in the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDefinition {
    /// Unique tool id (also the kind id of the cells it paints).
    pub id: String,

    /// Display symbol copied into placed cells.
    pub glyph: String,

    /// Human-readable label.
    pub label: String,

    /// Whether this tool ships with the application (true) or comes from a
    /// user tool file (false).
    pub is_builtin: bool,
}

impl ToolDefinition {
    pub fn new(id: &str, glyph: &str, label: &str, is_builtin: bool) -> Self {
        Self {
            id: id.to_string(),
            glyph: glyph.to_string(),
            label: label.to_string(),
            is_builtin,
        }
    }

    /// True for the eraser pseudo-tool.
    pub fn is_eraser(&self) -> bool {
        self.id == DELETE_TOOL_ID
    }

    /// Kind of the cells this tool paints.
    pub fn kind(&self) -> ToolKind {
        ToolKind::from_id(&self.id)
    }

    /// The placement this tool writes, or `None` for the eraser.
    pub fn placement(&self) -> Option<Placement> {
        if self.is_eraser() {
            None
        } else {
            Some(Placement::new(self.kind(), self.glyph.clone()))
        }
    }

    /// Palette caption, e.g. "📦 Shelf".
    pub fn caption(&self) -> String {
        format!("{} {}", self.glyph, self.label)
    }
}
