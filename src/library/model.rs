use std::path::PathBuf;

/// One playable file from the loaded directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Directory entry name, extension included. Used as the display name.
    pub name: String,
    /// Playable source handed to the audio backend.
    pub path: PathBuf,
}

impl Track {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// `file://` URL for the track, as exposed over MPRIS.
    pub fn url(&self) -> String {
        format!("file://{}", self.path.display())
    }
}
