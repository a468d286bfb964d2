//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Grid dimensions - the game is played on a fixed 5x5 board
pub const GRID_COLS: i8 = 5;
pub const GRID_ROWS: i8 = 5;
pub const GRID_CELLS: usize = (GRID_COLS as usize) * (GRID_ROWS as usize);

/// Contents of one grid cell.
///
/// `0` is empty and `1..=CATALOG_SIZE` identifies the piece that filled the
/// cell. [`OUT_OF_BOUNDS`] is the sentinel returned by `Grid::get` for any
/// coordinate outside the board.
pub type CellValue = i8;

pub const EMPTY_CELL: CellValue = 0;
pub const OUT_OF_BOUNDS: CellValue = -1;

/// Session counters
pub const STARTING_LIVES: u32 = 3;
pub const SCORE_PER_LEVEL: u32 = 1000;
pub const LINE_CLEAR_BASE_POINTS: u32 = 10;

/// Countdown pacing (milliseconds). The delay shrinks by one step per level
/// and never drops below the floor.
pub const BASE_LOOP_DELAY_MS: u64 = 12_000;
pub const LOOP_DELAY_STEP_MS: u64 = 500;
pub const MIN_LOOP_DELAY_MS: u64 = 2_500;

/// Where the aim cursor starts - the centre of the board
pub const AIM_SPAWN: GridCoordinate = GridCoordinate { x: 2, y: 2 };

/// A cell position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoordinate {
    pub x: i8,
    pub y: i8,
}

impl GridCoordinate {
    pub fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }
}

/// Lifecycle of one game session. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Initializing,
    Running,
    GameOver,
}

/// Sound intents emitted by the session.
///
/// Playback is a collaborator concern; the session only names the cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Place,
    Fail,
    Clear,
    Rotate,
    Swap,
}

/// Player actions produced by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    AimLeft,
    AimRight,
    AimUp,
    AimDown,
    Place,
    RotateCw,
    RotateCcw,
    Swap,
}
