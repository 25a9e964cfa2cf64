//! Audio-related small types and handles.
//!
//! Commands sent to the audio thread, the playback snapshot it publishes
//! and the errors it can hit while opening a source.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

#[derive(Debug)]
pub enum AudioCmd {
    /// Open a file; it starts paused. Events about it carry `serial`.
    Load { path: PathBuf, serial: u64 },
    Play,
    Pause,
    /// Drop the current sink.
    Stop,
    /// Jump to an absolute position in the current file.
    Seek(Duration),
    SetVolume(f32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Clone, Default)]
/// Runtime playback information shared with the UI thread.
pub struct PlaybackInfo {
    /// Position inside the current file.
    pub position: Duration,
    /// Length of the current file, once known.
    pub duration: Option<Duration>,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}
