use crate::config::RepeatSetting;

/// Volume restored by unmute when none was ever recorded.
pub const DEFAULT_RESTORE_VOLUME: f32 = 1.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    /// No track loaded.
    #[default]
    Idle,
    /// Source assignment and metadata fetch in flight.
    Loading,
    Playing,
    Paused,
    /// The current track reached its end.
    Ended,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// Advance after each track, wrapping at the end of the playlist.
    #[default]
    Off,
    /// Replay the current track.
    One,
}

impl RepeatMode {
    pub fn cycled(self) -> Self {
        match self {
            Self::Off => Self::One,
            Self::One => Self::Off,
        }
    }
}

impl From<RepeatSetting> for RepeatMode {
    fn from(setting: RepeatSetting) -> Self {
        match setting {
            RepeatSetting::Off => Self::Off,
            RepeatSetting::One => Self::One,
        }
    }
}

/// Everything the controller mutates in response to commands.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub current_index: Option<usize>,
    pub status: PlaybackStatus,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    /// Slider volume in `[0, 1]`. Kept while muted.
    pub volume: f32,
    /// Explicit mute flag, independent of `volume`.
    pub muted: bool,
    pub last_volume_before_mute: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            current_index: None,
            status: PlaybackStatus::Idle,
            shuffle: false,
            repeat: RepeatMode::Off,
            volume: 1.0,
            muted: false,
            last_volume_before_mute: DEFAULT_RESTORE_VOLUME,
        }
    }
}

impl PlayerState {
    /// Gain sent to the backend; also the volume the UI shows.
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Drives the mute glyph: an explicit mute or a zero slider.
    pub fn is_silent(&self) -> bool {
        self.muted || self.volume == 0.0
    }

    /// Slider input. Any audible level unmutes and becomes the restore point;
    /// zero leaves the mute flag alone.
    pub fn set_volume(&mut self, volume: f32) {
        if volume.is_nan() {
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        self.volume = volume;
        if volume > 0.0 {
            self.muted = false;
            self.last_volume_before_mute = volume;
        }
    }

    pub fn toggle_mute(&mut self) {
        if self.is_silent() {
            self.muted = false;
            self.volume = self.last_volume_before_mute;
        } else {
            self.last_volume_before_mute = self.volume;
            self.muted = true;
        }
    }
}
