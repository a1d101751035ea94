//! Piece placement: turns a kind/rotation/anchor into board cells and checks
//! bounds and overlap before committing.

use alloc::vec::Vec;
use rand::Rng;

use crate::core::board::Board;
use crate::core::common::{Cell, CellState, PlacementError, PlayerId};
use crate::core::config::{CELLS_PER_SHIP, NUM_SHIPS};
use crate::core::shapes::{self, PieceKind, Rotation};

/// Placement exactly as received on the wire, before any range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct RawPlacement {
    pub kind: i64,
    pub rotation: i64,
    pub col: i64,
    pub row: i64,
}

/// A placement whose kind and rotation are known to be valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub row: i64,
    pub col: i64,
}

impl Placement {
    pub fn new(kind: PieceKind, rotation: Rotation, row: i64, col: i64) -> Self {
        Self {
            kind,
            rotation,
            row,
            col,
        }
    }

    /// Check the piece descriptor. Kind is checked before rotation.
    pub fn validate(raw: RawPlacement) -> Result<Self, PlacementError> {
        let kind = PieceKind::from_wire(raw.kind).ok_or(PlacementError::InvalidShape)?;
        let rotation = Rotation::from_wire(raw.rotation).ok_or(PlacementError::InvalidRotation)?;
        Ok(Self::new(kind, rotation, raw.row, raw.col))
    }

    pub fn raw(&self) -> RawPlacement {
        RawPlacement {
            kind: self.kind.wire(),
            rotation: self.rotation.wire(),
            col: self.col,
            row: self.row,
        }
    }

    /// Absolute cells of the piece on `board`, or `OutOfBounds` if any leaves it.
    pub fn cells_on(&self, board: &Board) -> Result<[Cell; CELLS_PER_SHIP], PlacementError> {
        let offsets = shapes::offsets(self.kind, self.rotation);
        let mut cells = [Cell::new(0, 0); CELLS_PER_SHIP];
        for (slot, (dr, dc)) in cells.iter_mut().zip(offsets) {
            let row = self.row.checked_add(dr).ok_or(PlacementError::OutOfBounds)?;
            let col = self.col.checked_add(dc).ok_or(PlacementError::OutOfBounds)?;
            *slot = board.cell_at(row, col).ok_or(PlacementError::OutOfBounds)?;
        }
        Ok(cells)
    }

    /// Cells the piece would cover, provided all are on the board and empty.
    pub fn check(&self, board: &Board) -> Result<[Cell; CELLS_PER_SHIP], PlacementError> {
        let cells = self.cells_on(board)?;
        if cells
            .iter()
            .any(|&c| board.cell(c) != Some(CellState::Empty))
        {
            return Err(PlacementError::Overlap);
        }
        Ok(cells)
    }
}

/// Validate and commit one piece for `owner`. On error the board is untouched.
pub fn place_piece(
    board: &mut Board,
    owner: PlayerId,
    raw: RawPlacement,
) -> Result<usize, PlacementError> {
    let placement = Placement::validate(raw)?;
    let cells = placement.check(board)?;
    Ok(board.occupy(cells, owner))
}

/// Place pieces in order, stopping at the first failure.
///
/// Pieces committed before the failing one stay on the board; the error
/// carries the index of the piece that was rejected.
pub fn place_fleet(
    board: &mut Board,
    owner: PlayerId,
    raws: &[RawPlacement],
) -> Result<(), (usize, PlacementError)> {
    for (i, raw) in raws.iter().enumerate() {
        place_piece(board, owner, *raw).map_err(|e| (i, e))?;
    }
    Ok(())
}

/// Maximum anchor attempts per piece before `random_fleet` gives up.
const MAX_ATTEMPTS: usize = 200;

/// Generate a random, non-overlapping, in-bounds fleet for a board of the
/// given size. Returns `None` if some piece could not be fitted.
pub fn random_fleet<R: Rng>(
    rng: &mut R,
    width: usize,
    height: usize,
) -> Option<[Placement; NUM_SHIPS]> {
    let mut scratch = Board::new(width, height);
    let mut fleet = Vec::with_capacity(NUM_SHIPS);
    for _ in 0..NUM_SHIPS {
        let mut placed = false;
        for _ in 0..MAX_ATTEMPTS {
            let kind = PieceKind::ALL[rng.random_range(0..PieceKind::ALL.len())];
            let rotation = Rotation::ALL[rng.random_range(0..Rotation::ALL.len())];
            let row = rng.random_range(0..height) as i64;
            let col = rng.random_range(0..width) as i64;
            let candidate = Placement::new(kind, rotation, row, col);
            if let Ok(cells) = candidate.check(&scratch) {
                scratch.occupy(cells, PlayerId::One);
                fleet.push(candidate);
                placed = true;
                break;
            }
        }
        if !placed {
            return None;
        }
    }
    fleet.try_into().ok()
}
