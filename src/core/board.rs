//! Per-player grid: a flat row-major buffer of cell states plus the ships
//! placed on it.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::core::common::{Cell, CellState, PlayerId, ShotMark, ShotOutcome};
use crate::core::config::{CELLS_PER_SHIP, NUM_SHIPS, TOTAL_SHIP_CELLS};
use crate::core::ship::Ship;

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
    ships: Vec<Ship>,
}

impl Board {
    /// Create a `width` x `height` board with every cell empty.
    pub fn new(width: usize, height: usize) -> Self {
        Board {
            width,
            height,
            cells: vec![CellState::Empty; width * height],
            ships: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Convert signed coordinates into a cell, if they land on the board.
    pub fn cell_at(&self, row: i64, col: i64) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row < self.height && col < self.width {
            Some(Cell::new(row, col))
        } else {
            None
        }
    }

    fn index(&self, cell: Cell) -> usize {
        debug_assert!(cell.row < self.height && cell.col < self.width);
        cell.row * self.width + cell.col
    }

    /// State of `cell`, or `None` when it is off the board.
    pub fn cell(&self, cell: Cell) -> Option<CellState> {
        if cell.row < self.height && cell.col < self.width {
            Some(self.cells[self.index(cell)])
        } else {
            None
        }
    }

    /// Mark `cells` as one new ship owned by `owner` and return its index.
    ///
    /// The caller guarantees that every cell is on the board and empty.
    pub fn occupy(&mut self, cells: [Cell; CELLS_PER_SHIP], owner: PlayerId) -> usize {
        for cell in cells {
            let idx = self.index(cell);
            debug_assert_eq!(self.cells[idx], CellState::Empty);
            self.cells[idx] = CellState::Occupied(owner);
        }
        self.ships.push(Ship::new(cells));
        self.ships.len() - 1
    }

    /// Record a shot at an on-board `cell`.
    ///
    /// Empty becomes Miss and Occupied becomes Hit. Cells already Hit or Miss
    /// are left untouched and reported as `AlreadyGuessed`.
    ///
    /// # Panics
    /// Panics if `cell` is off the board.
    pub fn record_shot(&mut self, cell: Cell) -> ShotMark {
        let idx = self.index(cell);
        match self.cells[idx] {
            CellState::Hit | CellState::Miss => ShotMark::AlreadyGuessed,
            CellState::Empty => {
                self.cells[idx] = CellState::Miss;
                ShotMark::Miss
            }
            CellState::Occupied(_) => {
                self.cells[idx] = CellState::Hit;
                ShotMark::Hit
            }
        }
    }

    /// True iff every cell of ship `ship_index` is Hit.
    pub fn is_ship_sunk(&self, ship_index: usize) -> bool {
        self.ships.get(ship_index).is_some_and(|ship| {
            ship.cells()
                .iter()
                .all(|&cell| self.cells[self.index(cell)] == CellState::Hit)
        })
    }

    pub(crate) fn mark_sunk(&mut self, ship_index: usize) {
        if let Some(ship) = self.ships.get_mut(ship_index) {
            ship.mark_sunk();
        }
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Ships not yet declared sunk.
    pub fn ships_remaining(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

    /// Every Hit/Miss cell in row-major order.
    pub fn guesses(&self) -> impl Iterator<Item = (ShotOutcome, Cell)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(idx, state)| {
            let cell = Cell::new(idx / self.width, idx % self.width);
            match state {
                CellState::Hit => Some((ShotOutcome::Hit, cell)),
                CellState::Miss => Some((ShotOutcome::Miss, cell)),
                _ => None,
            }
        })
    }

    /// Number of cells still carrying an unhit ship segment.
    pub fn afloat_cells(&self) -> usize {
        self.cells
            .iter()
            .filter(|s| matches!(s, CellState::Occupied(_)))
            .count()
    }

    /// True when exactly one full fleet is placed and nothing has been hit.
    pub fn is_fleet_complete(&self) -> bool {
        self.ships.len() == NUM_SHIPS && self.afloat_cells() == TOTAL_SHIP_CELLS
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {}x{} ({} ships)", self.width, self.height, self.ships.len())?;
        for row in 0..self.height {
            for col in 0..self.width {
                let ch = match self.cells[row * self.width + col] {
                    CellState::Empty => '.',
                    CellState::Occupied(_) => '#',
                    CellState::Hit => 'X',
                    CellState::Miss => 'o',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
