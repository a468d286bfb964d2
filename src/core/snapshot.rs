//! Read-only snapshot of the session state for presentation layers.
//!
//! Collaborators never hold a live alias into game state; they pull one of
//! these or subscribe to events.

use crate::core::pieces::GamePiece;
use crate::types::{
    CellValue, GamePhase, GridCoordinate, AIM_SPAWN, EMPTY_CELL, GRID_COLS, GRID_ROWS,
    STARTING_LIVES,
};

/// Row-major copy of the grid, `grid[y][x]`
pub type GridRows = [[CellValue; GRID_COLS as usize]; GRID_ROWS as usize];

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub grid: GridRows,
    pub current: Option<GamePiece>,
    pub following: Option<GamePiece>,
    pub aim: GridCoordinate,
    /// Whether the current piece fits at the aim cursor
    pub aim_fits: bool,
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub multiplier: u32,
    pub phase: GamePhase,
    /// Countdown delay the session is currently pacing at
    pub loop_delay_ms: u64,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[EMPTY_CELL; GRID_COLS as usize]; GRID_ROWS as usize],
            current: None,
            following: None,
            aim: AIM_SPAWN,
            aim_fits: false,
            score: 0,
            level: 0,
            lives: STARTING_LIVES,
            multiplier: 1,
            phase: GamePhase::Initializing,
            loop_delay_ms: crate::types::BASE_LOOP_DELAY_MS,
        }
    }
}
