//! Shot resolution against an opponent board.

use crate::core::board::Board;
use crate::core::common::{ShotError, ShotMark, ShotOutcome};

/// Result of a newly resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotReport {
    pub outcome: ShotOutcome,
    /// Index of the ship this shot sank, if any.
    pub sunk: Option<usize>,
    /// Opponent ships still afloat after the shot.
    pub ships_remaining: usize,
}

impl ShotReport {
    /// True when the shot eliminated the last ship.
    pub fn fleet_eliminated(&self) -> bool {
        self.ships_remaining == 0
    }
}

/// Fire at (`row`, `col`) on `board`.
///
/// Out-of-bounds and repeated shots are errors and leave the board as it was.
pub fn resolve_shot(board: &mut Board, row: i64, col: i64) -> Result<ShotReport, ShotError> {
    let cell = board.cell_at(row, col).ok_or(ShotError::OutOfBounds)?;
    let (outcome, sunk) = match board.record_shot(cell) {
        ShotMark::AlreadyGuessed => return Err(ShotError::AlreadyGuessed),
        ShotMark::Miss => (ShotOutcome::Miss, None),
        ShotMark::Hit => {
            // Ships never share cells, so at most one ship can sink per shot.
            let sunk = (0..board.ships().len())
                .find(|&i| !board.ships()[i].is_sunk() && board.is_ship_sunk(i));
            if let Some(i) = sunk {
                board.mark_sunk(i);
            }
            (ShotOutcome::Hit, sunk)
        }
    };
    Ok(ShotReport {
        outcome,
        sunk,
        ships_remaining: board.ships_remaining(),
    })
}
