//! Grid tests

use tetrion::core::{Grid, GridError};
use tetrion::types::{ConfigError, GridConfig, PieceKind, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::default();
    assert_eq!(grid.width(), DEFAULT_GRID_WIDTH);
    assert_eq!(grid.height(), DEFAULT_GRID_HEIGHT);

    for y in 0..DEFAULT_GRID_HEIGHT as i8 {
        for x in 0..DEFAULT_GRID_WIDTH as i8 {
            assert!(grid.in_bounds(x, y), "Cell ({}, {}) should be in bounds", x, y);
            assert_eq!(grid.get(x, y), Some(None));
        }
    }
    assert!(grid.is_empty());
}

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::default();
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(DEFAULT_GRID_WIDTH as i8, 0), None);
    assert_eq!(grid.get(0, DEFAULT_GRID_HEIGHT as i8), None);
    assert!(!grid.is_occupied(-1, 5));
}

#[test]
fn test_grid_set_and_get() {
    let mut grid = Grid::default();
    grid.set_cell(5, 10, Some(PieceKind::T)).unwrap();
    assert_eq!(grid.get(5, 10), Some(Some(PieceKind::T)));
    assert!(grid.is_occupied(5, 10));

    grid.set_cell(5, 10, None).unwrap();
    assert_eq!(grid.get(5, 10), Some(None));
}

#[test]
fn test_grid_set_out_of_bounds_is_an_error() {
    let mut grid = Grid::default();
    let err = grid.set_cell(10, 0, Some(PieceKind::T)).unwrap_err();
    assert_eq!(err, GridError::OutOfBounds { x: 10, y: 0 });
    assert_eq!(err.code(), "out_of_bounds");
    assert!(grid.set_cell(0, -1, Some(PieceKind::T)).is_err());
    assert!(grid.is_empty());
}

#[test]
fn test_grid_dimensions_are_validated() {
    assert_eq!(
        Grid::new(GridConfig { width: 3, height: 20 }).unwrap_err(),
        ConfigError::GridWidth(3)
    );
    assert_eq!(
        Grid::new(GridConfig { width: 10, height: 65 }).unwrap_err(),
        ConfigError::GridHeight(65)
    );
    let grid = Grid::new(GridConfig { width: 4, height: 64 }).unwrap();
    assert_eq!(grid.cells().len(), 256);
}

#[test]
fn test_find_and_remove_full_rows() {
    let mut grid = Grid::from_rows(
        GridConfig::default(),
        &[
            "T.........",
            "IIIIIIIIII",
            "J.J.J.J.J.",
            "LLLLLLLLLL",
        ],
    )
    .unwrap();
    assert_eq!(grid.find_full_rows(), vec![17, 19]);

    assert_eq!(grid.remove_rows(&[17, 19]), 2);
    // Survivors keep their order and settle at the bottom.
    assert_eq!(grid.get(0, 18), Some(Some(PieceKind::T)));
    assert_eq!(grid.get(0, 19), Some(Some(PieceKind::J)));
    assert_eq!(grid.get(1, 19), Some(None));
    assert!(grid.rows().take(18).all(|row| row.iter().all(|c| c.is_none())));
}

#[test]
fn test_remove_rows_ignores_duplicates_and_out_of_range() {
    let mut grid = Grid::from_rows(GridConfig::default(), &["ZZZZZZZZZZ"]).unwrap();
    assert_eq!(grid.remove_rows(&[19, 19, 40]), 1);
    assert!(grid.is_empty());
}

#[test]
fn test_clear_empties_every_cell() {
    let mut grid = Grid::from_rows(GridConfig::default(), &["SS..ZZ..OO"]).unwrap();
    assert!(!grid.is_empty());
    grid.clear();
    assert!(grid.is_empty());
}
