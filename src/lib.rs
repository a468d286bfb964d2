//! quintris: a timed block-placement puzzle on a 5x5 grid.
//!
//! Pieces are placed where the player aims rather than dropped; full rows and
//! columns clear simultaneously, and a shrinking countdown forces a move or
//! costs a life.
//!
//! - [`core`] holds the pure rules engine: grid, piece catalog, clearing,
//!   scoring and the session state machine. No I/O, no timers, no locks.
//! - [`session`] wraps the core in a thread-safe session with the countdown
//!   timer and the event subscriptions consumed by presentation layers.
//! - [`term`] and [`input`] are the terminal front end.

pub mod core;
pub mod input;
pub mod session;
pub mod term;
pub mod types;
