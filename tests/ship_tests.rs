use broadside::{footprint, Cell, CoreError, Orientation, PlacementIssue, Ship, ShipKind};

#[test]
fn test_cells_follow_orientation() -> Result<(), CoreError> {
    let ship = Ship::new(ShipKind::Battleship, Cell::new(0, 0), Orientation::Vertical)?;
    let cells: Vec<_> = ship.cells().collect();
    assert_eq!(
        cells,
        vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0), Cell::new(3, 0)]
    );
    assert!(!ship.contains(Cell::new(4, 0)));
    assert!(!ship.contains(Cell::new(0, 1)));
    Ok(())
}

#[test]
fn test_register_hit_and_sunk() -> Result<(), CoreError> {
    let mut ship = Ship::new(ShipKind::Destroyer, Cell::new(1, 1), Orientation::Horizontal)?;
    assert_eq!(ship.hit_mask(), &[false, false]);
    assert_eq!(ship.register_hit(Cell::new(1, 2)), Some(1));
    assert!(!ship.is_sunk());
    assert_eq!(ship.register_hit(Cell::new(1, 1)), Some(0));
    assert!(ship.is_sunk());
    // repeat hits keep it sunk
    assert_eq!(ship.register_hit(Cell::new(1, 1)), Some(0));
    assert!(ship.is_sunk());
    assert_eq!(ship.register_hit(Cell::new(0, 0)), None);
    Ok(())
}

#[test]
fn test_off_board_ship_is_rejected() {
    let err = Ship::new(ShipKind::Carrier, Cell::new(0, 6), Orientation::Horizontal).unwrap_err();
    assert!(matches!(
        err,
        CoreError::InvalidPlacement {
            issue: PlacementIssue::OffBoard,
            ..
        }
    ));
    assert!(footprint(5, Cell::new(5, 0), Orientation::Vertical).is_some());
    assert!(footprint(5, Cell::new(6, 0), Orientation::Vertical).is_none());
    assert!(footprint(2, Cell::new(10, 0), Orientation::Horizontal).is_none());
}

#[test]
fn test_kind_metadata() {
    let sizes: Vec<_> = broadside::CLASSIC_FLEET.iter().map(|k| k.size()).collect();
    assert_eq!(sizes, vec![5, 4, 3, 3, 2]);
    assert_eq!(ShipKind::Destroyer.id(), "destroyer");
    assert_eq!(ShipKind::Carrier.to_string(), "Carrier");
}
