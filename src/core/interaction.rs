// ShopGuide - core/interaction.rs
//
// Pointer policy for the grid: a press paints the cell under the pointer,
// and entering a new cell with the primary button held paints that cell
// too (click-and-drag line painting). Hover alone only moves the readout.

use crate::core::model::Coordinate;

/// Pointer input relevant to the grid, reduced to cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerInput {
    /// Primary button pressed over a cell.
    Pressed(Coordinate),

    /// Pointer moved. `over` is the cell under the pointer (`None` when
    /// outside the grid); `primary_down` is the primary button state.
    Moved {
        over: Option<Coordinate>,
        primary_down: bool,
    },
}

/// Tracks the hovered cell and decides which cell, if any, to paint.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    hover: Option<Coordinate>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one pointer input; returns the cell to paint.
    pub fn handle(&mut self, input: PointerInput) -> Option<Coordinate> {
        match input {
            PointerInput::Pressed(coord) => {
                self.hover = Some(coord);
                Some(coord)
            }
            PointerInput::Moved { over, primary_down } => {
                let entered = over.filter(|c| self.hover != Some(*c));
                self.hover = over;
                entered.filter(|_| primary_down)
            }
        }
    }

    /// Cell under the pointer, for the coordinate readout.
    pub fn hover(&self) -> Option<Coordinate> {
        self.hover
    }
}
