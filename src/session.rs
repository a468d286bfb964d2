//! Session module - the concurrent wrapper around [`core::Game`]
//!
//! One mutable game exists per session. Player actions and the countdown
//! expiry are serialized through a single mutex around the whole
//! decide/mutate/emit sequence; listeners run under that lock and are
//! expected to be non-blocking (hand off to a channel for anything slow).
//!
//! The countdown is a single-slot schedule guarded by a generation counter:
//! every restart bumps the generation before spawning the next sleeper, and
//! a sleeper that wakes to find a newer generation (or a stopped session)
//! does nothing. At most one pending expiry is ever live, so a stale timer
//! can never cost an extra life.
//!
//! [`core::Game`]: crate::core::Game

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::thread;
use std::time::Duration;

use crate::core::game::{ExpiryOutcome, Game, PlaceOutcome};
use crate::core::pieces::GamePiece;
use crate::core::snapshot::GameSnapshot;
use crate::types::{AudioCue, GridCoordinate};

type PieceListener = Box<dyn Fn(&GamePiece) + Send>;
type LinesListener = Box<dyn Fn(&[GridCoordinate]) + Send>;
type TickListener = Box<dyn Fn(u64) + Send>;
type EndListener = Box<dyn Fn() + Send>;
type SoundListener = Box<dyn Fn(AudioCue) + Send>;

/// Subscription registry. Cleared wholesale on stop, which is what makes
/// stop a hard detach rather than a null check at every emit site.
#[derive(Default)]
struct Listeners {
    next_piece: Vec<PieceListener>,
    following_piece: Vec<PieceListener>,
    lines_cleared: Vec<LinesListener>,
    loop_tick: Vec<TickListener>,
    game_over: Vec<EndListener>,
    sound: Vec<SoundListener>,
}

struct Inner {
    game: Game,
    listeners: Listeners,
    /// Bumped on every countdown restart and on stop; stale sleepers no-op
    timer_generation: u64,
    stopped: bool,
}

impl Inner {
    fn emit_current(&self, piece: &GamePiece) {
        if self.stopped {
            return;
        }
        for listener in &self.listeners.next_piece {
            listener(piece);
        }
    }

    fn emit_following(&self, piece: &GamePiece) {
        if self.stopped {
            return;
        }
        for listener in &self.listeners.following_piece {
            listener(piece);
        }
    }

    /// Announce both pieces, current first, via their separate subscriptions
    fn announce_pieces(&self) {
        if let Some(piece) = self.game.current_piece() {
            self.emit_current(&piece);
        }
        if let Some(piece) = self.game.following_piece() {
            self.emit_following(&piece);
        }
    }

    fn emit_lines_cleared(&self, cells: &[GridCoordinate]) {
        if self.stopped {
            return;
        }
        for listener in &self.listeners.lines_cleared {
            listener(cells);
        }
    }

    fn emit_loop_tick(&self, delay_ms: u64) {
        if self.stopped {
            return;
        }
        for listener in &self.listeners.loop_tick {
            listener(delay_ms);
        }
    }

    fn emit_game_over(&self) {
        if self.stopped {
            return;
        }
        for listener in &self.listeners.game_over {
            listener();
        }
    }

    fn emit_sound(&self, cue: AudioCue) {
        if self.stopped {
            return;
        }
        for listener in &self.listeners.sound {
            listener(cue);
        }
    }
}

/// A running game session: the state machine plus its countdown and events
pub struct GameSession {
    inner: Arc<Mutex<Inner>>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::with_game(Game::new())
    }

    /// Session with a deterministic piece sequence
    pub fn with_seed(seed: u32) -> Self {
        Self::with_game(Game::with_seed(seed))
    }

    fn with_game(game: Game) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                game,
                listeners: Listeners::default(),
                timer_generation: 0,
                stopped: false,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned session mutex means a listener or the game panicked
        // mid-update; the session cannot continue from there.
        self.inner.lock().expect("session mutex poisoned")
    }

    /// Subscribe to current-piece announcements
    pub fn on_next_piece(&self, listener: impl Fn(&GamePiece) + Send + 'static) {
        self.lock().listeners.next_piece.push(Box::new(listener));
    }

    /// Subscribe to following-piece announcements
    pub fn on_following_piece(&self, listener: impl Fn(&GamePiece) + Send + 'static) {
        self.lock()
            .listeners
            .following_piece
            .push(Box::new(listener));
    }

    /// Subscribe to the cleared-cell set emitted once per clearing placement
    pub fn on_lines_cleared(&self, listener: impl Fn(&[GridCoordinate]) + Send + 'static) {
        self.lock().listeners.lines_cleared.push(Box::new(listener));
    }

    /// Subscribe to countdown restarts; the payload is the new delay in ms
    pub fn on_loop_tick(&self, listener: impl Fn(u64) + Send + 'static) {
        self.lock().listeners.loop_tick.push(Box::new(listener));
    }

    /// Subscribe to the terminal game-over event
    pub fn on_game_over(&self, listener: impl Fn() + Send + 'static) {
        self.lock().listeners.game_over.push(Box::new(listener));
    }

    /// Subscribe to sound intents
    pub fn on_sound(&self, listener: impl Fn(AudioCue) + Send + 'static) {
        self.lock().listeners.sound.push(Box::new(listener));
    }

    /// Draw the opening pieces, announce them and start the countdown
    pub fn start(&self) {
        let mut inner = self.lock();
        if inner.stopped {
            return;
        }
        inner.game.start();
        inner.announce_pieces();
        Self::schedule_countdown(Arc::downgrade(&self.inner), &mut inner);
    }

    /// Try to place the current piece centred on the given cell.
    ///
    /// Success advances the pieces, runs clearing/scoring and resets the
    /// countdown; failure emits a fail cue and leaves everything untouched.
    pub fn place_at(&self, x: i8, y: i8) -> bool {
        let mut inner = self.lock();
        if inner.stopped {
            return false;
        }
        match inner.game.place_at(x, y) {
            PlaceOutcome::Placed { clear } => {
                inner.emit_sound(AudioCue::Place);
                inner.announce_pieces();
                if let Some(clear) = clear {
                    inner.emit_sound(AudioCue::Clear);
                    inner.emit_lines_cleared(&clear.cells);
                }
                Self::schedule_countdown(Arc::downgrade(&self.inner), &mut inner);
                true
            }
            PlaceOutcome::Rejected => {
                inner.emit_sound(AudioCue::Fail);
                false
            }
        }
    }

    /// Place at the aim cursor
    pub fn place_at_aim(&self) -> bool {
        let aim = self.lock().game.aim();
        self.place_at(aim.x, aim.y)
    }

    /// Rotate the current piece; re-announces it, never touches the timer
    pub fn rotate(&self, steps: i32) {
        let inner = &mut *self.lock();
        if inner.stopped {
            return;
        }
        if let Some(piece) = inner.game.rotate_current(steps) {
            inner.emit_sound(AudioCue::Rotate);
            inner.emit_current(&piece);
        }
    }

    /// Exchange current and following pieces; re-announces both
    pub fn swap(&self) {
        let inner = &mut *self.lock();
        if inner.stopped {
            return;
        }
        if inner.game.swap_pieces().is_some() {
            inner.emit_sound(AudioCue::Swap);
            inner.announce_pieces();
        }
    }

    /// Move the aim cursor by a delta (clamped per axis)
    pub fn move_aim(&self, dx: i8, dy: i8) -> GridCoordinate {
        self.lock().game.move_aim(dx, dy)
    }

    /// Aim at an absolute cell (clamped), e.g. on mouse hover
    pub fn set_aim(&self, x: i8, y: i8) -> GridCoordinate {
        self.lock().game.set_aim(x, y)
    }

    /// Read-only view of the whole session state
    pub fn snapshot(&self) -> GameSnapshot {
        self.lock().game.snapshot()
    }

    /// Cancel the countdown and detach every listener. Idempotent; no event
    /// fires after this returns.
    pub fn stop(&self) {
        // Non-panicking on poison so stop stays safe from Drop.
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        if inner.stopped {
            return;
        }
        inner.stopped = true;
        inner.timer_generation = inner.timer_generation.wrapping_add(1);
        inner.listeners = Listeners::default();
    }

    /// Cancel any pending expiry and schedule the next one.
    ///
    /// The generation bump and the spawn both happen under the caller's
    /// lock, so the cancel-then-reschedule pair is atomic with respect to
    /// every other session action.
    fn schedule_countdown(handle: Weak<Mutex<Inner>>, inner: &mut Inner) {
        inner.timer_generation = inner.timer_generation.wrapping_add(1);
        let generation = inner.timer_generation;
        let delay_ms = inner.game.loop_delay_ms();
        inner.emit_loop_tick(delay_ms);

        thread::spawn(move || Self::countdown_worker(handle, generation, delay_ms));
    }

    fn countdown_worker(handle: Weak<Mutex<Inner>>, generation: u64, delay_ms: u64) {
        thread::sleep(Duration::from_millis(delay_ms));

        let Some(inner) = handle.upgrade() else {
            return;
        };
        let Ok(mut guard) = inner.lock() else {
            return;
        };
        if guard.stopped || guard.timer_generation != generation {
            // cancelled or superseded while we slept
            return;
        }

        match guard.game.expire_loop() {
            ExpiryOutcome::LifeLost => {
                guard.announce_pieces();
                Self::schedule_countdown(handle, &mut guard);
            }
            ExpiryOutcome::GameOver => {
                guard.emit_game_over();
            }
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.stop();
    }
}
