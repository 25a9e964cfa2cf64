//! Embedded tag reading and the now-playing display derived from it.

mod error;
mod fetcher;
mod now_playing;
mod reader;

pub use error::MetadataError;
pub use fetcher::{FetchMode, FetchOutcome, MetadataFetcher};
pub use now_playing::{CoverArt, NowPlaying};
pub use reader::{LoftyReader, MetadataReader, Picture, TrackTags};

#[cfg(test)]
mod tests;
