//! Terminal layer: a small styled frame, a crossterm renderer and the pure
//! game view that maps snapshots into frames.

pub mod frame;
pub mod game_view;
pub mod renderer;

pub use frame::{Frame, StyledCell};
pub use game_view::{CountdownView, GameView};
pub use renderer::TerminalRenderer;
