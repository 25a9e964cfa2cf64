use std::path::Path;
use std::time::Duration;

/// Lifecycle notifications from the playback engine.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    /// The source was opened; `duration` is `None` when it can't be determined.
    Loaded { duration: Option<Duration> },
    /// The current source played to its end.
    Ended,
    /// The source could not be opened or decoded.
    Failed(String),
}

/// The media element the player controller drives.
///
/// Commands are fire-and-forget; results come back through `poll_events`.
pub trait PlaybackBackend {
    /// Replace the current source. The new source starts paused at 0.
    fn load(&mut self, path: &Path);
    fn play(&mut self);
    fn pause(&mut self);
    /// Drop the current source.
    fn stop(&mut self);
    fn seek(&mut self, position: Duration);
    /// Output gain in `[0, 1]`.
    fn set_volume(&mut self, volume: f32);
    fn position(&self) -> Duration;
    /// `None` until the current source reports a duration.
    fn duration(&self) -> Option<Duration>;
    fn poll_events(&mut self) -> Vec<BackendEvent>;
}
