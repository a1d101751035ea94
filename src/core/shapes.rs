//! Static tetromino catalog: seven piece kinds, four rotations each.

use crate::core::config::{CELLS_PER_SHIP, NUM_ROTATIONS, NUM_SHAPES};

/// Tetromino kind, numbered 1..=7 on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    O = 1,
    I = 2,
    S = 3,
    L = 4,
    Z = 5,
    J = 6,
    T = 7,
}

impl PieceKind {
    pub const ALL: [PieceKind; NUM_SHAPES] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::S,
        PieceKind::L,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::T,
    ];

    /// Look up a kind by its wire number; `None` outside 1..=7.
    pub fn from_wire(value: i64) -> Option<Self> {
        match value {
            1..=7 => Some(Self::ALL[(value - 1) as usize]),
            _ => None,
        }
    }

    pub fn wire(self) -> i64 {
        self as i64
    }
}

/// Quarter-turn rotation, numbered 0..=3 on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
}

impl Rotation {
    pub const ALL: [Rotation; NUM_ROTATIONS] = [Rotation::R0, Rotation::R1, Rotation::R2, Rotation::R3];

    pub fn from_wire(value: i64) -> Option<Self> {
        match value {
            0..=3 => Some(Self::ALL[value as usize]),
            _ => None,
        }
    }

    pub fn wire(self) -> i64 {
        self as i64
    }
}

/// Relative `(row, col)` offsets of one piece orientation.
pub type Offsets = [(i64, i64); CELLS_PER_SHIP];

// Indexed [kind - 1][rotation]. The anchor is always offset (0, 0); several
// pieces extend up or left of it.
const SHAPES: [[Offsets; NUM_ROTATIONS]; NUM_SHAPES] = [
    // O
    [
        [(0, 0), (0, 1), (1, 0), (1, 1)],
        [(0, 0), (0, 1), (1, 0), (1, 1)],
        [(0, 0), (0, 1), (1, 0), (1, 1)],
        [(0, 0), (0, 1), (1, 0), (1, 1)],
    ],
    // I
    [
        [(0, 0), (0, 1), (0, 2), (0, 3)],
        [(0, 0), (1, 0), (2, 0), (3, 0)],
        [(0, 0), (0, 1), (0, 2), (0, 3)],
        [(0, 0), (1, 0), (2, 0), (3, 0)],
    ],
    // S
    [
        [(0, 0), (0, 1), (1, 0), (1, -1)],
        [(0, 0), (1, 0), (1, -1), (2, -1)],
        [(0, 0), (0, 1), (1, 0), (1, -1)],
        [(0, 0), (1, 0), (1, -1), (2, -1)],
    ],
    // L
    [
        [(0, 0), (1, 0), (2, 0), (2, 1)],
        [(0, 0), (0, 1), (0, 2), (1, 2)],
        [(0, 0), (1, 0), (2, 0), (0, -1)],
        [(0, 0), (0, -1), (0, -2), (-1, -2)],
    ],
    // Z
    [
        [(0, 0), (0, -1), (1, 0), (1, 1)],
        [(0, 0), (1, 0), (1, -1), (2, -1)],
        [(0, 0), (0, -1), (1, 0), (1, 1)],
        [(0, 0), (1, 0), (1, -1), (2, -1)],
    ],
    // J
    [
        [(0, 0), (1, 0), (2, 0), (2, -1)],
        [(0, 0), (0, -1), (0, -2), (1, -2)],
        [(0, 0), (1, 0), (2, 0), (0, 1)],
        [(0, 0), (0, 1), (0, 2), (-1, 2)],
    ],
    // T
    [
        [(0, 0), (0, -1), (0, 1), (1, 0)],
        [(0, 0), (-1, 0), (1, 0), (0, -1)],
        [(0, 0), (0, -1), (0, 1), (-1, 0)],
        [(0, 0), (-1, 0), (1, 0), (0, 1)],
    ],
];

/// Relative cell offsets for `kind` in `rotation`.
pub fn offsets(kind: PieceKind, rotation: Rotation) -> Offsets {
    SHAPES[kind as usize - 1][rotation as usize]
}
