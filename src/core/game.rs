//! Game module - the session state machine
//!
//! Owns the grid, the current and following piece, the aim cursor and the
//! session counters, and runs the clearing/scoring pass after every
//! successful placement. This type is pure: no timers, no locks, no events.
//! The concurrent wrapper that adds the countdown and the subscriptions
//! lives in [`crate::session`].

use crate::core::clearing::{apply_clear, scan_full_lines};
use crate::core::grid::Grid;
use crate::core::pieces::GamePiece;
use crate::core::rng::PieceSpawner;
use crate::core::scoring::{level_for_score, loop_delay_ms, next_multiplier, placement_points};
use crate::core::snapshot::GameSnapshot;
use crate::types::{
    GamePhase, GridCoordinate, AIM_SPAWN, GRID_COLS, GRID_ROWS, STARTING_LIVES,
};

/// One clearing pass triggered by a placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearOutcome {
    pub lines: u32,
    pub cells: Vec<GridCoordinate>,
    pub points: u32,
}

/// Result of a placement attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// The piece was committed; `clear` is `None` when nothing completed
    Placed { clear: Option<ClearOutcome> },
    /// Blocked or out-of-bounds target; nothing changed
    Rejected,
}

/// Result of a countdown expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryOutcome {
    LifeLost,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    spawner: PieceSpawner,
    current: Option<GamePiece>,
    following: Option<GamePiece>,
    aim: GridCoordinate,
    score: u32,
    level: u32,
    lives: u32,
    multiplier: u32,
    phase: GamePhase,
}

impl Game {
    /// Create a game with a clock-seeded spawner
    pub fn new() -> Self {
        Self::with_spawner(PieceSpawner::from_entropy())
    }

    /// Create a game with a deterministic piece sequence
    pub fn with_seed(seed: u32) -> Self {
        Self::with_spawner(PieceSpawner::new(seed))
    }

    fn with_spawner(spawner: PieceSpawner) -> Self {
        Self {
            grid: Grid::new(),
            spawner,
            current: None,
            following: None,
            aim: AIM_SPAWN,
            score: 0,
            level: 0,
            lives: STARTING_LIVES,
            multiplier: 1,
            phase: GamePhase::Initializing,
        }
    }

    /// Draw the opening current/following pair and enter `Running`
    pub fn start(&mut self) {
        if self.phase != GamePhase::Initializing {
            return;
        }
        self.current = Some(self.spawner.draw());
        self.following = Some(self.spawner.draw());
        self.phase = GamePhase::Running;
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn aim(&self) -> GridCoordinate {
        self.aim
    }

    pub fn current_piece(&self) -> Option<GamePiece> {
        self.current
    }

    pub fn following_piece(&self) -> Option<GamePiece> {
        self.following
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Countdown delay for the current level
    pub fn loop_delay_ms(&self) -> u64 {
        loop_delay_ms(self.level)
    }

    /// Try to place the current piece centred on (x, y).
    ///
    /// On success the following piece becomes current, a fresh following
    /// piece is drawn and the clearing/scoring pass runs. A rejected
    /// placement changes nothing.
    pub fn place_at(&mut self, x: i8, y: i8) -> PlaceOutcome {
        if self.phase != GamePhase::Running {
            return PlaceOutcome::Rejected;
        }
        let Some(piece) = self.current else {
            return PlaceOutcome::Rejected;
        };
        if !self.grid.play(&piece, x, y) {
            return PlaceOutcome::Rejected;
        }

        self.advance_pieces();
        PlaceOutcome::Placed {
            clear: self.after_piece(),
        }
    }

    /// Place the current piece at the aim cursor
    pub fn place_at_aim(&mut self) -> PlaceOutcome {
        self.place_at(self.aim.x, self.aim.y)
    }

    /// Clearing and scoring pass after a committed placement.
    ///
    /// Points use the multiplier as it stood before this placement; the
    /// multiplier then advances (or resets on a clear-less placement), and
    /// recorded cells are zeroed only after scoring consumed their count.
    fn after_piece(&mut self) -> Option<ClearOutcome> {
        let scan = scan_full_lines(&self.grid);
        let points = placement_points(scan.lines, scan.cells.len() as u32, self.multiplier);

        self.score += points;
        self.level = level_for_score(self.score);
        self.multiplier = next_multiplier(scan.lines, self.multiplier);

        if scan.lines == 0 {
            return None;
        }

        apply_clear(&mut self.grid, &scan);
        Some(ClearOutcome {
            lines: scan.lines,
            cells: scan.cells.to_vec(),
            points,
        })
    }

    fn advance_pieces(&mut self) {
        self.current = self.following.take();
        self.following = Some(self.spawner.draw());
    }

    /// Rotate the current piece in place; returns the updated piece for
    /// re-announcement. Does not consume the turn.
    pub fn rotate_current(&mut self, count: i32) -> Option<GamePiece> {
        if self.phase != GamePhase::Running {
            return None;
        }
        let piece = self.current.as_mut()?;
        piece.rotate(count);
        Some(*piece)
    }

    /// Exchange current and following in place (no new piece drawn)
    pub fn swap_pieces(&mut self) -> Option<(GamePiece, GamePiece)> {
        if self.phase != GamePhase::Running {
            return None;
        }
        std::mem::swap(&mut self.current, &mut self.following);
        Some((self.current?, self.following?))
    }

    /// Move the aim cursor by a delta, clamping each axis independently
    pub fn move_aim(&mut self, dx: i8, dy: i8) -> GridCoordinate {
        let x = self.aim.x.saturating_add(dx);
        let y = self.aim.y.saturating_add(dy);
        self.set_aim(x, y)
    }

    /// Set the aim cursor to an absolute cell, clamped to the grid
    pub fn set_aim(&mut self, x: i8, y: i8) -> GridCoordinate {
        self.aim.x = x.clamp(0, GRID_COLS - 1);
        self.aim.y = y.clamp(0, GRID_ROWS - 1);
        self.aim
    }

    /// Countdown expiry: a skipped turn costs a life.
    ///
    /// While lives remain, the piece pair advances exactly as in a placement
    /// (with no scoring side effects) and the multiplier streak breaks. The
    /// expiry that brings lives to zero is the only transition into
    /// `GameOver`.
    pub fn expire_loop(&mut self) -> ExpiryOutcome {
        if self.phase != GamePhase::Running {
            return ExpiryOutcome::GameOver;
        }

        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            return ExpiryOutcome::GameOver;
        }

        self.advance_pieces();
        self.multiplier = 1;
        ExpiryOutcome::LifeLost
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot {
            current: self.current,
            following: self.following,
            aim: self.aim,
            aim_fits: self
                .current
                .map(|piece| self.grid.can_play(&piece, self.aim.x, self.aim.y))
                .unwrap_or(false),
            score: self.score,
            level: self.level,
            lives: self.lives,
            multiplier: self.multiplier,
            phase: self.phase,
            loop_delay_ms: self.loop_delay_ms(),
            ..GameSnapshot::default()
        };
        self.grid.write_rows(&mut snapshot.grid);
        snapshot
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub(crate) fn set_current_piece(&mut self, piece: GamePiece) {
        self.current = Some(piece);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EMPTY_CELL, GRID_ROWS};

    fn running_game() -> Game {
        let mut game = Game::with_seed(42);
        game.start();
        game
    }

    /// Leave (4, y) empty on row `y` so a dot at (4, y) completes it.
    fn prime_row(game: &mut Game, y: i8) {
        for x in 0..GRID_COLS - 1 {
            game.grid_mut().set(x, y, 1);
        }
    }

    #[test]
    fn start_draws_two_pieces_and_runs() {
        let mut game = Game::with_seed(1);
        assert_eq!(game.phase(), GamePhase::Initializing);
        assert!(game.current_piece().is_none());

        game.start();
        assert_eq!(game.phase(), GamePhase::Running);
        assert!(game.current_piece().is_some());
        assert!(game.following_piece().is_some());

        // start is not repeatable
        let pieces = (game.current_piece(), game.following_piece());
        game.start();
        assert_eq!((game.current_piece(), game.following_piece()), pieces);
    }

    #[test]
    fn placement_advances_the_piece_pair() {
        let mut game = running_game();
        let following = game.following_piece().unwrap();

        let outcome = game.place_at(2, 2);
        assert!(matches!(outcome, PlaceOutcome::Placed { .. }));
        assert_eq!(game.current_piece().unwrap(), following);
        assert!(game.following_piece().is_some());
    }

    #[test]
    fn rejected_placement_changes_nothing() {
        let mut game = running_game();
        // occupy the centre so the current piece cannot sit there
        for y in 0..GRID_ROWS {
            for x in 0..GRID_COLS {
                game.grid_mut().set(x, y, 1);
            }
        }
        let current = game.current_piece();
        let before = game.grid().clone();

        assert_eq!(game.place_at(2, 2), PlaceOutcome::Rejected);
        assert_eq!(game.current_piece(), current);
        assert_eq!(*game.grid(), before);
        assert_eq!(game.multiplier(), 1);
    }

    #[test]
    fn single_line_clear_scores_and_starts_a_streak() {
        let mut game = running_game();
        prime_row(&mut game, 0);
        game.set_current_piece(GamePiece::from_index(0).unwrap()); // dot

        let outcome = game.place_at(4, 0);
        let PlaceOutcome::Placed { clear: Some(clear) } = outcome else {
            panic!("expected a clearing placement, got {outcome:?}");
        };

        // 1 line * 5 cells * 10 * multiplier 1
        assert_eq!(clear.lines, 1);
        assert_eq!(clear.cells.len(), 5);
        assert_eq!(clear.points, 50);
        assert_eq!(game.score(), 50);
        assert_eq!(game.multiplier(), 2);

        // the cleared row is zeroed
        for x in 0..GRID_COLS {
            assert_eq!(game.grid().get(x, 0), EMPTY_CELL);
        }
    }

    #[test]
    fn second_clear_uses_the_streak_multiplier() {
        let mut game = running_game();

        prime_row(&mut game, 0);
        game.set_current_piece(GamePiece::from_index(0).unwrap());
        game.place_at(4, 0);
        assert_eq!(game.score(), 50);
        assert_eq!(game.multiplier(), 2);

        prime_row(&mut game, 1);
        game.set_current_piece(GamePiece::from_index(0).unwrap());
        game.place_at(4, 1);

        // second 5-cell line at multiplier 2 adds 100
        assert_eq!(game.score(), 150);
        assert_eq!(game.multiplier(), 3);
    }

    #[test]
    fn clear_less_placement_resets_the_multiplier() {
        let mut game = running_game();
        prime_row(&mut game, 0);
        game.set_current_piece(GamePiece::from_index(0).unwrap());
        game.place_at(4, 0);
        assert_eq!(game.multiplier(), 2);

        game.set_current_piece(GamePiece::from_index(0).unwrap());
        let outcome = game.place_at(2, 3);
        assert_eq!(outcome, PlaceOutcome::Placed { clear: None });
        assert_eq!(game.multiplier(), 1);
        assert_eq!(game.score(), 50);
    }

    #[test]
    fn crossing_clear_counts_two_lines_and_the_union() {
        let mut game = running_game();
        // row 2 and column 2 each missing only (2, 2)
        for x in 0..GRID_COLS {
            if x != 2 {
                game.grid_mut().set(x, 2, 1);
            }
        }
        for y in 0..GRID_ROWS {
            if y != 2 {
                game.grid_mut().set(2, y, 1);
            }
        }
        game.set_current_piece(GamePiece::from_index(0).unwrap());

        let outcome = game.place_at(2, 2);
        let PlaceOutcome::Placed { clear: Some(clear) } = outcome else {
            panic!("expected a clearing placement, got {outcome:?}");
        };
        assert_eq!(clear.lines, 2);
        assert_eq!(clear.cells.len(), 9);
        // 2 * 9 * 10 * 1
        assert_eq!(clear.points, 180);
    }

    #[test]
    fn level_follows_score() {
        let mut game = running_game();
        assert_eq!(game.level(), 0);
        assert_eq!(game.loop_delay_ms(), 12_000);

        // Clear row after row; the streak grows the score quickly.
        let mut placements = 0;
        while game.score() < 1000 && placements < 40 {
            prime_row(&mut game, 0);
            game.set_current_piece(GamePiece::from_index(0).unwrap());
            game.place_at(4, 0);
            placements += 1;
        }
        assert!(game.score() >= 1000);
        assert_eq!(game.level(), game.score() / 1000);
        assert!(game.loop_delay_ms() < 12_000);
    }

    #[test]
    fn aim_clamps_at_both_corners() {
        let mut game = running_game();
        game.set_aim(0, 0);
        assert_eq!(game.move_aim(-3, -3), GridCoordinate::new(0, 0));
        game.set_aim(4, 4);
        assert_eq!(game.move_aim(3, 3), GridCoordinate::new(4, 4));
        // each axis clamps independently
        game.set_aim(0, 4);
        assert_eq!(game.move_aim(-1, 1), GridCoordinate::new(0, 4));
    }

    #[test]
    fn swap_exchanges_without_drawing() {
        let mut game = running_game();
        let current = game.current_piece().unwrap();
        let following = game.following_piece().unwrap();

        let (new_current, new_following) = game.swap_pieces().unwrap();
        assert_eq!(new_current, following);
        assert_eq!(new_following, current);
    }

    #[test]
    fn rotate_keeps_identity_and_reports_the_piece() {
        let mut game = running_game();
        let value = game.current_piece().unwrap().value();
        let rotated = game.rotate_current(5).unwrap();
        assert_eq!(rotated.value(), value);
        assert_eq!(game.current_piece().unwrap(), rotated);
    }

    #[test]
    fn three_expiries_end_the_game() {
        let mut game = running_game();
        assert_eq!(game.lives(), 3);

        assert_eq!(game.expire_loop(), ExpiryOutcome::LifeLost);
        assert_eq!(game.lives(), 2);
        assert_eq!(game.expire_loop(), ExpiryOutcome::LifeLost);
        assert_eq!(game.lives(), 1);
        assert_eq!(game.expire_loop(), ExpiryOutcome::GameOver);
        assert_eq!(game.lives(), 0);
        assert_eq!(game.phase(), GamePhase::GameOver);

        // terminal: further input is inert
        assert_eq!(game.place_at(2, 2), PlaceOutcome::Rejected);
        assert!(game.rotate_current(1).is_none());
    }

    #[test]
    fn expiry_breaks_the_multiplier_streak() {
        let mut game = running_game();
        prime_row(&mut game, 0);
        game.set_current_piece(GamePiece::from_index(0).unwrap());
        game.place_at(4, 0);
        assert_eq!(game.multiplier(), 2);

        let following = game.following_piece().unwrap();
        game.expire_loop();
        assert_eq!(game.multiplier(), 1);
        // the pair advanced exactly as in a placement
        assert_eq!(game.current_piece().unwrap(), following);
        // and nothing was scored
        assert_eq!(game.score(), 50);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut game = running_game();
        game.set_aim(1, 3);
        let snapshot = game.snapshot();

        assert_eq!(snapshot.aim, GridCoordinate::new(1, 3));
        assert_eq!(snapshot.lives, 3);
        assert_eq!(snapshot.phase, GamePhase::Running);
        assert_eq!(snapshot.current, game.current_piece());
        assert_eq!(snapshot.loop_delay_ms, 12_000);
        // empty grid: the current piece always fits
        assert!(snapshot.aim_fits);
    }
}
