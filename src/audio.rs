//! Audio output.
//!
//! `PlaybackBackend` is the seam the player controller drives; `AudioPlayer`
//! implements it with `rodio` on its own thread.

mod backend;
mod player;
mod sink;
mod thread;
mod types;

pub use backend::{BackendEvent, PlaybackBackend};
pub use player::AudioPlayer;

#[cfg(test)]
mod tests;
