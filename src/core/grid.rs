//! Grid module - the 5x5 board model
//!
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..4 (left to right), y ranges 0..4
//! (top to bottom). Out-of-range reads return a sentinel instead of failing
//! so bounds-probing callers behave uniformly at the border.

use crate::core::pieces::GamePiece;
use crate::types::{CellValue, EMPTY_CELL, GRID_CELLS, GRID_COLS, GRID_ROWS, OUT_OF_BOUNDS};

/// The game board - 5 columns x 5 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * COLS + x)
    cells: [CellValue; GRID_CELLS],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [EMPTY_CELL; GRID_CELLS],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_COLS || y < 0 || y >= GRID_ROWS {
            return None;
        }
        Some((y as usize) * (GRID_COLS as usize) + (x as usize))
    }

    pub fn cols(&self) -> i8 {
        GRID_COLS
    }

    pub fn rows(&self) -> i8 {
        GRID_ROWS
    }

    /// Get the value at (x, y).
    ///
    /// Returns [`OUT_OF_BOUNDS`] for any coordinate outside the grid, however
    /// far outside. This sentinel is part of the contract: placement checks
    /// probe the border and rely on it reading as "not empty".
    pub fn get(&self, x: i8, y: i8) -> CellValue {
        match Self::index(x, y) {
            Some(idx) => self.cells[idx],
            None => OUT_OF_BOUNDS,
        }
    }

    /// Write `value` at (x, y).
    ///
    /// Precondition: (x, y) is inside the grid. Out-of-range writes are a
    /// caller bug; they are dropped here and trip a debug assertion.
    pub fn set(&mut self, x: i8, y: i8, value: CellValue) {
        debug_assert!(
            Self::index(x, y).is_some(),
            "grid set out of bounds: ({x}, {y})"
        );
        if let Some(idx) = Self::index(x, y) {
            self.cells[idx] = value;
        }
    }

    /// Determine whether `piece` fits with its footprint centred on (x, y).
    ///
    /// Every occupied footprint cell must land on an in-bounds, empty grid
    /// cell; a single violation fails the whole check.
    pub fn can_play(&self, piece: &GamePiece, x: i8, y: i8) -> bool {
        // The footprint's top-left sits one cell up-left of the centre.
        let origin_x = x - 1;
        let origin_y = y - 1;

        for px in 0..3i8 {
            for py in 0..3i8 {
                if !piece.occupies(px, py) {
                    continue;
                }
                // The sentinel makes out-of-bounds targets read as occupied.
                if self.get(origin_x + px, origin_y + py) != EMPTY_CELL {
                    return false;
                }
            }
        }
        true
    }

    /// Play `piece` centred on (x, y): validate, then commit.
    ///
    /// Returns `false` and leaves the grid byte-identical when the placement
    /// is rejected; the grid is never left partially filled.
    pub fn play(&mut self, piece: &GamePiece, x: i8, y: i8) -> bool {
        if !self.can_play(piece, x, y) {
            return false;
        }

        let origin_x = x - 1;
        let origin_y = y - 1;

        for px in 0..3i8 {
            for py in 0..3i8 {
                if piece.occupies(px, py) {
                    self.set(origin_x + px, origin_y + py, piece.value());
                }
            }
        }
        true
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// Copy the grid into a row-major 2D array (`out[y][x]`)
    pub fn write_rows(&self, out: &mut [[CellValue; GRID_COLS as usize]; GRID_ROWS as usize]) {
        for y in 0..GRID_ROWS as usize {
            for x in 0..GRID_COLS as usize {
                out[y][x] = self.cells[y * GRID_COLS as usize + x];
            }
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
