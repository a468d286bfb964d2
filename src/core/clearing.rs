//! Clear detection - full rows and columns after a placement
//!
//! A placement may complete any number of columns and rows at once. Each full
//! line counts once toward the line total, while a cell shared by a full row
//! and a full column is recorded once in the cleared set.

use arrayvec::ArrayVec;

use crate::core::grid::Grid;
use crate::types::{GridCoordinate, EMPTY_CELL, GRID_CELLS, GRID_COLS, GRID_ROWS};

/// Outcome of one scan: the line count and the deduplicated cell set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearScan {
    pub lines: u32,
    pub cells: ArrayVec<GridCoordinate, GRID_CELLS>,
}

impl ClearScan {
    fn record(&mut self, cell: GridCoordinate) {
        if !self.cells.contains(&cell) {
            self.cells.push(cell);
        }
    }
}

/// Scan the grid for fully occupied columns and rows.
///
/// The scan only reads; zeroing happens in [`apply_clear`] after scoring has
/// consumed the pre-clear counts.
pub fn scan_full_lines(grid: &Grid) -> ClearScan {
    let mut scan = ClearScan {
        lines: 0,
        cells: ArrayVec::new(),
    };

    for x in 0..GRID_COLS {
        if (0..GRID_ROWS).all(|y| grid.get(x, y) != EMPTY_CELL) {
            scan.lines += 1;
            for y in 0..GRID_ROWS {
                scan.record(GridCoordinate::new(x, y));
            }
        }
    }

    for y in 0..GRID_ROWS {
        if (0..GRID_COLS).all(|x| grid.get(x, y) != EMPTY_CELL) {
            scan.lines += 1;
            for x in 0..GRID_COLS {
                scan.record(GridCoordinate::new(x, y));
            }
        }
    }

    scan
}

/// Zero every recorded cell
pub fn apply_clear(grid: &mut Grid, scan: &ClearScan) {
    for cell in &scan.cells {
        grid.set(cell.x, cell.y, EMPTY_CELL);
    }
}
