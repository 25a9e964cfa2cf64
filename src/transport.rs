//! Pure projections of the player state onto what the terminal shows.
//!
//! Nothing here touches the backend; callers pass in the live position and
//! duration read at draw time.

mod format;
mod view;

pub use format::{format_clock, progress_percent, round_to_second, seek_fraction};
pub use view::{PlayIcon, PlaylistRow, TransportView, VolumeIcon, playlist_rows};

#[cfg(test)]
mod tests;
