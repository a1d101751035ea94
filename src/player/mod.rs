//! Client-side players
//!
//! This module defines the Player trait and provides concrete implementations:
//! - BotPlayer: random fleet plus hunt/target shooting
//! - ClientNode: drives one seat over a Transport using a Player

use rand::rngs::SmallRng;

use crate::core::common::{Cell, ShotOutcome};
use crate::core::config::NUM_SHIPS;
use crate::core::placement::Placement;

/// Our view of the shots fired at the opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotRecord {
    width: usize,
    height: usize,
    cells: Vec<Option<ShotOutcome>>,
}

impl ShotRecord {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, cell: Cell) -> Option<ShotOutcome> {
        if cell.row < self.height && cell.col < self.width {
            self.cells[cell.row * self.width + cell.col]
        } else {
            None
        }
    }

    pub fn record(&mut self, cell: Cell, outcome: ShotOutcome) {
        if cell.row < self.height && cell.col < self.width {
            self.cells[cell.row * self.width + cell.col] = Some(outcome);
        }
    }

    /// Cells not fired at yet, row-major.
    pub fn untried(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(move |(i, _)| Cell::new(i / self.width, i % self.width))
    }

    /// Cells recorded as hits, row-major.
    pub fn hits(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Some(ShotOutcome::Hit))
            .map(move |(i, _)| Cell::new(i / self.width, i % self.width))
    }

    pub fn shots_fired(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// Interface implemented by automated or interactive players.
///
/// A Player is responsible for:
/// - Choosing a fleet for the declared board
/// - Selecting targets to attack
/// - Handling feedback from shots
pub trait Player: Send {
    /// Choose five placements for a `width` x `height` board.
    fn fleet(
        &mut self,
        rng: &mut SmallRng,
        width: usize,
        height: usize,
    ) -> anyhow::Result<[Placement; NUM_SHIPS]>;

    /// Choose the next cell to fire at. Must be an untried cell.
    fn select_target(&mut self, rng: &mut SmallRng, record: &ShotRecord) -> Cell;

    /// Inform the player of the result of its last shot.
    fn handle_shot_result(&mut self, _cell: Cell, _outcome: ShotOutcome, _ships_remaining: usize) {}
}

pub mod bot;
pub use bot::BotPlayer;

pub mod node;
pub use node::{ClientNode, MatchReport};
