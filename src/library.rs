//! Directory scanning and the playlist store.
//!
//! `load_directory` turns one directory into a `TrackStore`; the store is
//! handed to the player controller and replaced on every reload.

mod error;
mod model;
mod scan;
mod store;

pub use error::LibraryError;
pub use model::Track;
pub use scan::load_directory;
pub use store::TrackStore;

#[cfg(test)]
mod tests;
