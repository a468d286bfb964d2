//! Core module - pure game logic with no I/O dependencies
//!
//! This module contains all the game rules and state management. It has zero
//! dependencies on terminals, timers or threads; the concurrent wrapper lives
//! in [`crate::session`].

pub mod clearing;
pub mod game;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

// Re-export commonly used types
pub use game::{ClearOutcome, ExpiryOutcome, Game, PlaceOutcome};
pub use grid::Grid;
pub use pieces::{CatalogError, GamePiece, CATALOG_SIZE};
pub use rng::PieceSpawner;
pub use snapshot::GameSnapshot;
