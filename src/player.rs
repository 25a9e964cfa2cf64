//! Player controller: current track, shuffle/repeat modes, volume and the
//! transport commands that act on them.

mod controller;
mod error;
mod events;
mod order;
mod state;

pub use controller::PlayerController;
pub use error::PlayerError;
pub use events::PlayerEvent;
pub use state::{PlaybackStatus, PlayerState, RepeatMode};
