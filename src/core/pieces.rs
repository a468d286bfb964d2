//! Pieces module - the fixed shape catalog and 90-degree rotation
//!
//! Every playable piece is a small polyomino inside a 3x3 footprint. The
//! catalog order is stable: index N always maps to the same shape, because
//! the instructions screen lists pieces by sequential index. A piece's value
//! is `index + 1` so it never collides with the empty cell value, and the
//! same value marks the occupied footprint cells.

use std::fmt;

use thiserror::Error;

use crate::types::CellValue;

/// Number of shapes in the catalog
pub const CATALOG_SIZE: usize = 18;

/// 3x3 footprint, indexed `blocks[x][y]`. Occupied cells hold the piece
/// value, everything else is 0.
pub type Footprint = [[CellValue; 3]; 3];

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    /// An index outside the catalog indicates a corrupted draw upstream, so
    /// this is surfaced loudly instead of clamped.
    #[error("piece index {index} outside catalog of {CATALOG_SIZE} shapes")]
    InvalidIndex { index: usize },
}

/// Shape table. Cells are (x, y) offsets inside the footprint; every shape
/// occupies the centre (1, 1) so a piece always covers the aimed cell.
const CATALOG: [(&str, &[(i8, i8)]); CATALOG_SIZE] = [
    ("dot", &[(1, 1)]),
    ("domino", &[(1, 1), (2, 1)]),
    ("line", &[(0, 1), (1, 1), (2, 1)]),
    ("corner", &[(1, 1), (2, 1), (2, 2)]),
    ("square", &[(1, 1), (2, 1), (1, 2), (2, 2)]),
    ("ell", &[(1, 0), (1, 1), (1, 2), (2, 2)]),
    ("jay", &[(1, 0), (1, 1), (0, 2), (1, 2)]),
    ("ess", &[(1, 1), (2, 1), (0, 2), (1, 2)]),
    ("zed", &[(0, 1), (1, 1), (1, 2), (2, 2)]),
    ("tee", &[(0, 1), (1, 1), (2, 1), (1, 2)]),
    ("plus", &[(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)]),
    ("you", &[(0, 0), (2, 0), (0, 1), (1, 1), (2, 1)]),
    ("stairs", &[(2, 0), (1, 1), (2, 1), (0, 2), (1, 2)]),
    ("diagonal", &[(0, 0), (1, 1), (2, 2)]),
    ("antidiag", &[(2, 0), (1, 1), (0, 2)]),
    ("prong", &[(0, 0), (0, 1), (1, 1), (0, 2)]),
    ("hook", &[(0, 0), (1, 0), (1, 1), (1, 2)]),
    ("kite", &[(1, 0), (2, 0), (1, 1), (1, 2)]),
];

/// An immutable piece identity with its current footprint orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamePiece {
    value: CellValue,
    name: &'static str,
    blocks: Footprint,
}

impl GamePiece {
    /// Create the catalog piece at `index` in its spawn orientation
    pub fn from_index(index: usize) -> Result<Self, CatalogError> {
        if index >= CATALOG_SIZE {
            return Err(CatalogError::InvalidIndex { index });
        }
        Ok(Self::from_catalog(index))
    }

    /// Create the catalog piece at `index` with `rotations` 90-degree turns
    /// pre-applied
    pub fn from_index_rotated(index: usize, rotations: i32) -> Result<Self, CatalogError> {
        let mut piece = Self::from_index(index)?;
        piece.rotate(rotations);
        Ok(piece)
    }

    /// Infallible lookup for callers that already hold a bounded index
    pub(crate) fn from_catalog(index: usize) -> Self {
        let (name, cells) = CATALOG[index];
        let value = (index + 1) as CellValue;
        let mut blocks: Footprint = [[0; 3]; 3];
        for &(x, y) in cells {
            blocks[x as usize][y as usize] = value;
        }
        Self {
            value,
            name,
            blocks,
        }
    }

    /// The numeric identity written into grid cells this piece fills
    pub fn value(&self) -> CellValue {
        self.value
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn blocks(&self) -> &Footprint {
        &self.blocks
    }

    /// Whether footprint cell (x, y) belongs to this piece
    pub fn occupies(&self, x: i8, y: i8) -> bool {
        if !(0..3).contains(&x) || !(0..3).contains(&y) {
            return false;
        }
        self.blocks[x as usize][y as usize] == self.value
    }

    /// Number of cells this piece fills
    pub fn cell_count(&self) -> usize {
        self.blocks
            .iter()
            .flatten()
            .filter(|&&cell| cell == self.value)
            .count()
    }

    /// Rotate the footprint 90 degrees clockwise `count` times.
    ///
    /// Any `i32` normalizes into 0..4; negative counts rotate the other way
    /// around. The piece value never changes.
    pub fn rotate(&mut self, count: i32) {
        for _ in 0..count.rem_euclid(4) {
            self.rotate_cw_once();
        }
    }

    /// Consuming variant of [`rotate`](Self::rotate)
    pub fn rotated(mut self, count: i32) -> Self {
        self.rotate(count);
        self
    }

    fn rotate_cw_once(&mut self) {
        let old = self.blocks;
        for x in 0..3 {
            for y in 0..3 {
                self.blocks[x][y] = old[y][2 - x];
            }
        }
    }
}

impl fmt::Display for GamePiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (value {})", self.name, self.value)
    }
}
