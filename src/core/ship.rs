//! A placed tetromino ship.

use crate::core::common::Cell;
use crate::core::config::CELLS_PER_SHIP;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    cells: [Cell; CELLS_PER_SHIP],
    sunk: bool,
}

impl Ship {
    pub fn new(cells: [Cell; CELLS_PER_SHIP]) -> Self {
        Self { cells, sunk: false }
    }

    /// Absolute cells covered by the ship.
    pub fn cells(&self) -> &[Cell; CELLS_PER_SHIP] {
        &self.cells
    }

    /// Whether the shot resolver has already declared this ship sunk.
    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    pub(crate) fn mark_sunk(&mut self) {
        self.sunk = true;
    }
}
