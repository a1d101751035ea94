use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};
use tetroship::{
    place_piece, random_fleet, resolve_shot, Board, Cell, CellState, PlacementError, PlayerId,
    ShotError, ShotOutcome, CELLS_PER_SHIP, NUM_SHIPS, TOTAL_SHIP_CELLS,
};

fn fleet_board(seed: u64, width: usize, height: usize) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let fleet = random_fleet(&mut rng, width, height).unwrap();
    let mut board = Board::new(width, height);
    for placement in fleet {
        place_piece(&mut board, PlayerId::One, placement.raw()).unwrap();
    }
    board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn new_board_all_empty(width in 10usize..=40, height in 10usize..=40) {
        let board = Board::new(width, height);
        for row in 0..height {
            for col in 0..width {
                prop_assert_eq!(board.cell(Cell::new(row, col)), Some(CellState::Empty));
            }
        }
    }

    #[test]
    fn random_fleet_is_legal(seed in any::<u64>(), width in 10usize..=30, height in 10usize..=30) {
        let board = fleet_board(seed, width, height);
        prop_assert_eq!(board.ships().len(), NUM_SHIPS);
        prop_assert_eq!(board.afloat_cells(), TOTAL_SHIP_CELLS);
    }

    #[test]
    fn placing_same_piece_twice_overlaps(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let fleet = random_fleet(&mut rng, 10, 10).unwrap();
        let mut board = Board::new(10, 10);
        place_piece(&mut board, PlayerId::Two, fleet[0].raw()).unwrap();
        let before = board.clone();
        prop_assert_eq!(
            place_piece(&mut board, PlayerId::Two, fleet[0].raw()),
            Err(PlacementError::Overlap)
        );
        prop_assert_eq!(board, before);
    }

    #[test]
    fn repeated_shot_is_rejected_without_change(seed in any::<u64>(), row in 0i64..10, col in 0i64..10) {
        let mut board = fleet_board(seed, 10, 10);
        resolve_shot(&mut board, row, col).unwrap();
        let after_first = board.clone();
        prop_assert_eq!(resolve_shot(&mut board, row, col), Err(ShotError::AlreadyGuessed));
        prop_assert_eq!(board, after_first);
    }

    #[test]
    fn ship_sinks_on_fourth_hit(seed in any::<u64>()) {
        let mut board = fleet_board(seed, 10, 10);
        let cells = *board.ships()[0].cells();
        for (i, cell) in cells.iter().enumerate() {
            let report = resolve_shot(&mut board, cell.row as i64, cell.col as i64).unwrap();
            prop_assert_eq!(report.outcome, ShotOutcome::Hit);
            if i + 1 < CELLS_PER_SHIP {
                prop_assert_eq!(report.sunk, None);
                prop_assert_eq!(report.ships_remaining, NUM_SHIPS);
            } else {
                prop_assert_eq!(report.sunk, Some(0));
                prop_assert_eq!(report.ships_remaining, NUM_SHIPS - 1);
            }
        }
    }
}
