use line_follower::simulation::error::SimulationError;
use line_follower::simulation::grid::{Cell, Grid};

#[test]
fn test_grid_initialization() {
    let grid = Grid::new(25, 20).unwrap();
    assert_eq!(grid.width(), 25);
    assert_eq!(grid.height(), 20);
    assert_eq!(grid.line_count(), 0);
    assert_eq!(grid.get(0, 0), Some(Cell::Empty));
    assert_eq!(grid.get(24, 19), Some(Cell::Empty));
}

#[test]
fn test_invalid_dimensions() {
    for (w, h) in [(0, 5), (5, 0), (-1, 5), (5, -3), (0, 0)] {
        assert_eq!(
            Grid::new(w, h),
            Err(SimulationError::InvalidDimension {
                width: w,
                height: h
            }),
            "{w}x{h} should be rejected"
        );
    }
}

#[test]
fn test_out_of_bounds_reads_are_explicit() {
    let grid = Grid::new(4, 3).unwrap();
    assert_eq!(grid.get(-1, 0), None, "left boundary");
    assert_eq!(grid.get(4, 0), None, "right boundary");
    assert_eq!(grid.get(0, -1), None, "top boundary");
    assert_eq!(grid.get(0, 3), None, "bottom boundary");
    assert!(!grid.in_bounds(4, 3));
    assert!(grid.in_bounds(3, 2));
}

#[test]
fn test_set_and_get() {
    let mut grid = Grid::new(4, 3).unwrap();
    grid.set(1, 2, Cell::Line).unwrap();
    assert_eq!(grid.get(1, 2), Some(Cell::Line));
    assert!(grid.is_line(1, 2));
    assert_eq!(grid.line_count(), 1);

    grid.set(1, 2, Cell::Empty).unwrap();
    assert!(!grid.is_line(1, 2));
}

#[test]
fn test_set_out_of_bounds_is_rejected_without_mutation() {
    let mut grid = Grid::new(4, 3).unwrap();
    let before = grid.clone();

    let err = grid.set(4, 1, Cell::Line).unwrap_err();
    assert!(matches!(err, SimulationError::OutOfBounds { x: 4, y: 1, .. }));
    assert!(grid.set(-1, -1, Cell::Line).is_err());
    assert_eq!(grid, before);
}

#[test]
fn test_reset_is_idempotent() {
    let mut grid = Grid::new(5, 5).unwrap();
    for i in 0..5 {
        grid.set(i, i, Cell::Line).unwrap();
    }
    assert_eq!(grid.line_count(), 5);

    grid.reset();
    assert_eq!(grid.line_count(), 0);
    let once = grid.clone();
    grid.reset();
    assert_eq!(grid, once);
}
