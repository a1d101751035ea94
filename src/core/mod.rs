//! Core match logic (no_std + alloc compatible)
//!
//! Shape catalog, boards, placement, shot resolution and the match state
//! machine. Nothing in here performs I/O or locking; the coordinator owns a
//! `Match` and feeds it lines.

pub mod board;
pub mod common;
pub mod config;
pub mod game;
pub mod placement;
pub mod shapes;
pub mod ship;
pub mod shot;

// Re-export commonly used types
pub use board::Board;
pub use common::{Cell, CellState, PlacementError, PlayerId, ShotError, ShotMark, ShotOutcome};
pub use config::*;
pub use game::{Delivery, EndReason, Match, MatchResult, MatchSnapshot, Outcome, Phase};
pub use placement::{place_fleet, place_piece, random_fleet, Placement, RawPlacement};
pub use shapes::{offsets, PieceKind, Rotation};
pub use ship::Ship;
pub use shot::{resolve_shot, ShotReport};
