use tetroship::{
    place_fleet, place_piece, resolve_shot, Board, Cell, CellState, PieceKind, PlacementError,
    Placement, PlayerId, RawPlacement, Rotation, ShotError, ShotOutcome,
};

fn raw(kind: i64, rotation: i64, col: i64, row: i64) -> RawPlacement {
    RawPlacement {
        kind,
        rotation,
        col,
        row,
    }
}

#[test]
fn new_board_is_empty() {
    let board = Board::new(12, 10);
    assert_eq!(board.width(), 12);
    assert_eq!(board.height(), 10);
    for row in 0..10 {
        for col in 0..12 {
            assert_eq!(board.cell(Cell::new(row, col)), Some(CellState::Empty));
        }
    }
    assert_eq!(board.cell(Cell::new(10, 0)), None);
    assert_eq!(board.ships_remaining(), 0);
}

#[test]
fn place_horizontal_i_piece() {
    let mut board = Board::new(10, 10);
    let idx = place_piece(&mut board, PlayerId::One, raw(2, 0, 3, 5)).unwrap();
    assert_eq!(idx, 0);
    for col in 3..7 {
        assert_eq!(
            board.cell(Cell::new(5, col)),
            Some(CellState::Occupied(PlayerId::One))
        );
    }
    assert_eq!(board.afloat_cells(), 4);
}

#[test]
fn shapes_extending_left_of_anchor() {
    let mut board = Board::new(10, 10);
    // S in rotation 0 reaches one column left of its anchor.
    assert_eq!(
        place_piece(&mut board, PlayerId::One, raw(3, 0, 0, 0)),
        Err(PlacementError::OutOfBounds)
    );
    place_piece(&mut board, PlayerId::One, raw(3, 0, 1, 0)).unwrap();
    assert_eq!(
        board.cell(Cell::new(1, 0)),
        Some(CellState::Occupied(PlayerId::One))
    );
}

#[test]
fn placement_errors_are_reported_in_check_order() {
    let mut board = Board::new(10, 10);
    assert_eq!(
        place_piece(&mut board, PlayerId::One, raw(0, 9, 0, 0)),
        Err(PlacementError::InvalidShape)
    );
    assert_eq!(
        place_piece(&mut board, PlayerId::One, raw(8, 0, 0, 0)),
        Err(PlacementError::InvalidShape)
    );
    assert_eq!(
        place_piece(&mut board, PlayerId::One, raw(1, 4, 0, 0)),
        Err(PlacementError::InvalidRotation)
    );
    assert_eq!(
        place_piece(&mut board, PlayerId::One, raw(2, 0, 7, 0)),
        Err(PlacementError::OutOfBounds)
    );
    assert_eq!(
        place_piece(&mut board, PlayerId::One, raw(1, 0, -1, 0)),
        Err(PlacementError::OutOfBounds)
    );
    place_piece(&mut board, PlayerId::One, raw(1, 0, 0, 0)).unwrap();
    assert_eq!(
        place_piece(&mut board, PlayerId::One, raw(2, 1, 1, 1)),
        Err(PlacementError::Overlap)
    );
    assert_eq!(board.ships().len(), 1);
}

#[test]
fn fleet_failure_keeps_earlier_pieces() {
    let mut board = Board::new(10, 10);
    let pieces = [
        raw(2, 0, 0, 0),
        raw(2, 0, 0, 2),
        raw(2, 0, 0, 2),
        raw(2, 0, 0, 6),
        raw(2, 0, 0, 8),
    ];
    assert_eq!(
        place_fleet(&mut board, PlayerId::Two, &pieces),
        Err((2, PlacementError::Overlap))
    );
    assert_eq!(board.ships().len(), 2);
    assert_eq!(board.cell(Cell::new(6, 0)), Some(CellState::Empty));
}

#[test]
fn placement_validation_round_trips_wire_values() {
    let placement = Placement::validate(raw(6, 3, 4, 5)).unwrap();
    assert_eq!(placement.kind, PieceKind::J);
    assert_eq!(placement.rotation, Rotation::R3);
    assert_eq!(placement.raw(), raw(6, 3, 4, 5));
}

#[test]
fn shots_mark_cells_and_sink_ships() {
    let mut board = Board::new(10, 10);
    place_piece(&mut board, PlayerId::One, raw(1, 0, 0, 0)).unwrap();
    place_piece(&mut board, PlayerId::One, raw(2, 1, 9, 0)).unwrap();

    let miss = resolve_shot(&mut board, 5, 5).unwrap();
    assert_eq!(miss.outcome, ShotOutcome::Miss);
    assert_eq!(miss.ships_remaining, 2);
    assert_eq!(board.cell(Cell::new(5, 5)), Some(CellState::Miss));

    for (row, col) in [(0, 0), (0, 1), (1, 0)] {
        let report = resolve_shot(&mut board, row, col).unwrap();
        assert_eq!(report.outcome, ShotOutcome::Hit);
        assert_eq!(report.sunk, None);
        assert_eq!(report.ships_remaining, 2);
    }
    let last = resolve_shot(&mut board, 1, 1).unwrap();
    assert_eq!(last.sunk, Some(0));
    assert_eq!(last.ships_remaining, 1);
    assert!(!last.fleet_eliminated());
    assert!(board.ships()[0].is_sunk());
}

#[test]
fn shot_errors_leave_board_unchanged() {
    let mut board = Board::new(10, 10);
    place_piece(&mut board, PlayerId::One, raw(1, 0, 0, 0)).unwrap();
    assert_eq!(resolve_shot(&mut board, -1, 0), Err(ShotError::OutOfBounds));
    assert_eq!(resolve_shot(&mut board, 0, 10), Err(ShotError::OutOfBounds));

    resolve_shot(&mut board, 0, 0).unwrap();
    let before = board.clone();
    assert_eq!(resolve_shot(&mut board, 0, 0), Err(ShotError::AlreadyGuessed));
    assert_eq!(board, before);
}

#[test]
fn guesses_are_row_major() {
    let mut board = Board::new(10, 10);
    place_piece(&mut board, PlayerId::One, raw(1, 0, 0, 0)).unwrap();
    resolve_shot(&mut board, 3, 2).unwrap();
    resolve_shot(&mut board, 0, 1).unwrap();
    resolve_shot(&mut board, 0, 5).unwrap();
    let guesses: Vec<_> = board.guesses().collect();
    assert_eq!(
        guesses,
        vec![
            (ShotOutcome::Hit, Cell::new(0, 1)),
            (ShotOutcome::Miss, Cell::new(0, 5)),
            (ShotOutcome::Miss, Cell::new(3, 2)),
        ]
    );
}
