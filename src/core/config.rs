/// Smallest board edge player 1 may declare.
pub const MIN_BOARD_DIM: usize = 10;
/// Largest board edge accepted; keeps a hostile `B` from allocating without bound.
pub const MAX_BOARD_DIM: usize = 256;

pub const NUM_SHIPS: usize = 5;
pub const CELLS_PER_SHIP: usize = 4;
pub const NUM_SHAPES: usize = 7;
pub const NUM_ROTATIONS: usize = 4;

/// Total number of occupied cells in a complete fleet.
pub const TOTAL_SHIP_CELLS: usize = NUM_SHIPS * CELLS_PER_SHIP;

pub const DEFAULT_P1_PORT: u16 = 2201;
pub const DEFAULT_P2_PORT: u16 = 2202;

/// Longest inbound line accepted from a client, in bytes.
pub const DEFAULT_MAX_LINE_LEN: usize = 1024;

/// Returns `true` when `width` x `height` is an acceptable board shape.
pub fn valid_dimensions(width: usize, height: usize) -> bool {
    (MIN_BOARD_DIM..=MAX_BOARD_DIM).contains(&width)
        && (MIN_BOARD_DIM..=MAX_BOARD_DIM).contains(&height)
}
