use std::path::{Path, PathBuf};

use super::model::Track;

/// Ordered playlist built from one directory selection.
///
/// Replaced wholesale when another directory is loaded; dropping the old
/// store releases its tracks.
#[derive(Debug, Clone, Default)]
pub struct TrackStore {
    dir: Option<PathBuf>,
    tracks: Vec<Track>,
}

impl TrackStore {
    pub fn new(dir: impl Into<PathBuf>, tracks: Vec<Track>) -> Self {
        Self {
            dir: Some(dir.into()),
            tracks,
        }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }
}
