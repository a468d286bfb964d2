//! Grid tests - placement primitives and the out-of-bounds sentinel

use quintris::core::{GamePiece, Grid};
use quintris::types::{EMPTY_CELL, GRID_COLS, GRID_ROWS, OUT_OF_BOUNDS};

#[test]
fn new_grid_is_empty() {
    let grid = Grid::new();
    assert_eq!(grid.cols(), GRID_COLS);
    assert_eq!(grid.rows(), GRID_ROWS);
    for y in 0..GRID_ROWS {
        for x in 0..GRID_COLS {
            assert_eq!(grid.get(x, y), EMPTY_CELL);
        }
    }
}

#[test]
fn out_of_range_get_always_returns_the_sentinel() {
    let grid = Grid::new();
    for (x, y) in [
        (-1, 0),
        (0, -1),
        (GRID_COLS, 0),
        (0, GRID_ROWS),
        (-100, -100),
        (i8::MAX, i8::MAX),
    ] {
        assert_eq!(grid.get(x, y), OUT_OF_BOUNDS, "at ({x}, {y})");
        // and it is stable across repeated reads
        assert_eq!(grid.get(x, y), OUT_OF_BOUNDS);
    }
}

#[test]
fn can_play_true_implies_play_succeeds() {
    for index in 0..18 {
        let piece = GamePiece::from_index(index).unwrap();
        for y in 0..GRID_ROWS {
            for x in 0..GRID_COLS {
                let mut grid = Grid::new();
                let fits = grid.can_play(&piece, x, y);
                assert_eq!(grid.play(&piece, x, y), fits, "{piece} at ({x}, {y})");

                if fits {
                    // exactly the footprint cells are occupied
                    let occupied = grid
                        .cells()
                        .iter()
                        .filter(|&&value| value != EMPTY_CELL)
                        .count();
                    assert_eq!(occupied, piece.cell_count());
                } else {
                    assert!(grid.cells().iter().all(|&value| value == EMPTY_CELL));
                }
            }
        }
    }
}

#[test]
fn centre_placement_always_fits_on_an_empty_grid() {
    // every footprint fits inside the board when centred at (2, 2)
    for index in 0..18 {
        let piece = GamePiece::from_index(index).unwrap();
        for rotations in 0..4 {
            let grid = Grid::new();
            assert!(grid.can_play(&piece.rotated(rotations), 2, 2));
        }
    }
}

#[test]
fn occupied_cells_block_replay() {
    let mut grid = Grid::new();
    let dot = GamePiece::from_index(0).unwrap();

    assert!(grid.play(&dot, 3, 3));
    assert_eq!(grid.get(3, 3), dot.value());
    assert!(!grid.can_play(&dot, 3, 3));
    assert!(!grid.play(&dot, 3, 3));
    // the first write is intact
    assert_eq!(grid.get(3, 3), dot.value());
}
