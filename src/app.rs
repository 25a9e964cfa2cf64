//! Application module: the UI-side model used by the TUI and runtime.
//!
//! `App` holds what the player state machine does not own: the playlist
//! cursor, popups, the directory prompt and the status line.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
