//! Terminal quintris runner.
//!
//! The session owns all game state and timing; this binary only maps input
//! events to session calls and repaints from snapshots. Loop-tick events
//! arrive over a channel so the countdown bar animates between redraws.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use quintris::input::{handle_key_event, should_quit};
use quintris::session::GameSession;
use quintris::term::{CountdownView, Frame, GameView, TerminalRenderer};
use quintris::types::{GameAction, BASE_LOOP_DELAY_MS};

/// Session events the render loop cares about
enum UiEvent {
    LoopTick(u64),
    GameOver,
}

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let session = GameSession::new();
    let (tx, rx) = mpsc::channel::<UiEvent>();

    {
        let tx = tx.clone();
        session.on_loop_tick(move |delay_ms| {
            let _ = tx.send(UiEvent::LoopTick(delay_ms));
        });
    }
    session.on_game_over(move || {
        let _ = tx.send(UiEvent::GameOver);
    });

    session.start();

    let view = GameView;
    let mut frame = Frame::new(0, 0);
    let mut countdown_started = Instant::now();
    let mut countdown_delay = BASE_LOOP_DELAY_MS;

    loop {
        while let Ok(ui_event) = rx.try_recv() {
            match ui_event {
                UiEvent::LoopTick(delay_ms) => {
                    countdown_delay = delay_ms;
                    countdown_started = Instant::now();
                }
                UiEvent::GameOver => {
                    // the snapshot phase drives the overlay; nothing to do
                }
            }
        }

        let snap = session.snapshot();
        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
        if frame.width() != width || frame.height() != height {
            frame = Frame::new(width, height);
            term.invalidate();
        }
        frame.clear();

        let elapsed_ms = countdown_started.elapsed().as_millis() as u64;
        let countdown = CountdownView {
            remaining_ms: countdown_delay.saturating_sub(elapsed_ms),
            delay_ms: countdown_delay,
        };
        view.render(&snap, countdown, &mut frame);
        term.draw(&frame)?;

        if event::poll(Duration::from_millis(33))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        session.stop();
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        apply_action(&session, action);
                    }
                }
                Event::Mouse(mouse) => handle_mouse(&session, &view, mouse),
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }
    }
}

fn apply_action(session: &GameSession, action: GameAction) {
    match action {
        GameAction::AimLeft => {
            session.move_aim(-1, 0);
        }
        GameAction::AimRight => {
            session.move_aim(1, 0);
        }
        GameAction::AimUp => {
            session.move_aim(0, -1);
        }
        GameAction::AimDown => {
            session.move_aim(0, 1);
        }
        GameAction::Place => {
            session.place_at_aim();
        }
        GameAction::RotateCw => session.rotate(1),
        GameAction::RotateCcw => session.rotate(-1),
        GameAction::Swap => session.swap(),
    }
}

fn handle_mouse(session: &GameSession, view: &GameView, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved => {
            if let Some(cell) = view.hit_test(mouse.column, mouse.row) {
                session.set_aim(cell.x, cell.y);
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(cell) = view.hit_test(mouse.column, mouse.row) {
                session.place_at(cell.x, cell.y);
            }
        }
        _ => {}
    }
}
