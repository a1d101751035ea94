//! Common types for the match: player identities, cells, shot outcomes and
//! the errors raised by placement and shooting.

use core::fmt;

/// Player slot, fixed by the listener that accepted the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Zero-based slot index, for per-player arrays.
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// Player number as shown to humans (1 or 2).
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn from_number(n: u8) -> Option<PlayerId> {
        match n {
            1 => Some(PlayerId::One),
            2 => Some(PlayerId::Two),
            _ => None,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// State of a single board cell. `Hit` and `Miss` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Empty,
    Occupied(PlayerId),
    Hit,
    Miss,
}

/// Result of a newly resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    Hit,
    Miss,
}

impl ShotOutcome {
    pub fn symbol(self) -> char {
        match self {
            ShotOutcome::Hit => 'H',
            ShotOutcome::Miss => 'M',
        }
    }
}

/// What `Board::record_shot` observed at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotMark {
    /// The cell was already Hit or Miss; nothing changed.
    AlreadyGuessed,
    Miss,
    Hit,
}

/// Errors returned while placing a single piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Piece kind outside 1..=7.
    InvalidShape,
    /// Rotation outside 0..=3.
    InvalidRotation,
    /// At least one cell falls outside the board.
    OutOfBounds,
    /// At least one cell is already occupied by an earlier ship.
    Overlap,
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::InvalidShape => write!(f, "piece kind must be between 1 and 7"),
            PlacementError::InvalidRotation => write!(f, "rotation must be between 0 and 3"),
            PlacementError::OutOfBounds => write!(f, "piece does not fit on the board"),
            PlacementError::Overlap => write!(f, "piece overlaps an existing ship"),
        }
    }
}

/// Errors returned while resolving a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotError {
    OutOfBounds,
    AlreadyGuessed,
}

impl fmt::Display for ShotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotError::OutOfBounds => write!(f, "shot is outside the board"),
            ShotError::AlreadyGuessed => write!(f, "cell was already guessed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}
#[cfg(feature = "std")]
impl std::error::Error for ShotError {}
