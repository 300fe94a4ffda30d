#[cfg(feature = "std")]
#[cfg(test)]
mod cli_tests {
    use broadside::cli::{describe_event, format_cell, parse_cell, parse_placement, render_board};
    use broadside::{
        place_manual, AttackResult, Cell, Grid, MatchEvent, Orientation, ShipKind, Side,
    };

    #[test]
    fn test_parse_and_format_cells() {
        assert_eq!(parse_cell("B7"), Ok(Cell::new(6, 1)));
        assert_eq!(parse_cell(" j10 "), Ok(Cell::new(9, 9)));
        assert_eq!(format_cell(Cell::new(6, 1)), "B7");
        assert_eq!(format_cell(Cell::new(0, 0)), "A1");

        assert!(parse_cell("").is_err());
        assert!(parse_cell("K1").is_err());
        assert!(parse_cell("A0").is_err());
        assert!(parse_cell("A11").is_err());
        assert!(parse_cell("5A").is_err());
        assert!(parse_cell("A").is_err());
    }

    #[test]
    fn test_parse_placement() {
        assert_eq!(
            parse_placement("A5 H"),
            Ok((Cell::new(4, 0), Some(Orientation::Horizontal)))
        );
        assert_eq!(
            parse_placement("c3 v"),
            Ok((Cell::new(2, 2), Some(Orientation::Vertical)))
        );
        assert_eq!(parse_placement("D4"), Ok((Cell::new(3, 3), None)));
        assert!(parse_placement("D4 X").is_err());
        assert!(parse_placement("D4 H H").is_err());
    }

    #[test]
    fn test_render_board_markers() {
        let mut grid = Grid::new();
        place_manual(&mut grid, ShipKind::Destroyer, Cell::new(0, 0), Orientation::Horizontal)
            .unwrap();
        grid.mark_shot(Cell::new(0, 0)).unwrap();
        grid.mark_shot(Cell::new(5, 5)).unwrap();

        let revealed = render_board(&grid, true);
        let first_row = revealed.lines().nth(1).unwrap();
        assert!(first_row.trim_start().starts_with("1 X S ."));

        let hidden = render_board(&grid, false);
        assert!(!hidden.contains(" S "));
        assert!(hidden.lines().nth(6).unwrap().contains('o'));
    }

    #[test]
    fn test_describe_event() {
        assert_eq!(describe_event(&MatchEvent::Reset), None);
        let line = describe_event(&MatchEvent::ShotFired {
            attacker: Side::Player,
            target: Cell::new(6, 1),
            result: AttackResult {
                hit: true,
                sunk: true,
                ship: Some(ShipKind::Submarine),
                segment: Some(2),
            },
        })
        .unwrap();
        assert!(line.contains("B7"));
        assert!(line.contains("Submarine sunk"));

        let over = describe_event(&MatchEvent::MatchOver {
            winner: Side::Opponent,
        })
        .unwrap();
        assert!(over.starts_with("DEFEAT"));
    }
}
