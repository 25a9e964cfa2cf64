use std::time::Duration;

use crate::library::TrackStore;
use crate::player::{PlaybackStatus, PlayerState, RepeatMode};

use super::format::{format_clock, progress_percent, round_to_second};

/// Icon on the play/pause control: the action a press would take.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

impl PlayIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Play => "▶",
            Self::Pause => "⏸",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VolumeIcon {
    Audible,
    Muted,
}

impl VolumeIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Audible => "vol",
            Self::Muted => "muted",
        }
    }
}

/// Everything the transport bar renders for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportView {
    pub elapsed: String,
    pub total: String,
    pub percent: f64,
    pub play_icon: PlayIcon,
    pub volume_icon: VolumeIcon,
    pub shuffle_active: bool,
    pub repeat_active: bool,
    pub volume_text: String,
}

impl TransportView {
    pub fn project(state: &PlayerState, position: Duration, duration: Option<Duration>) -> Self {
        let play_icon = match state.status {
            PlaybackStatus::Playing | PlaybackStatus::Loading => PlayIcon::Pause,
            _ => PlayIcon::Play,
        };
        let volume_icon = if state.is_silent() {
            VolumeIcon::Muted
        } else {
            VolumeIcon::Audible
        };
        let volume_pct = (state.effective_volume() * 100.0).round() as u32;

        Self {
            elapsed: format_clock(position),
            total: format_clock(duration.map(round_to_second).unwrap_or_default()),
            percent: progress_percent(position, duration),
            play_icon,
            volume_icon,
            shuffle_active: state.shuffle,
            repeat_active: state.repeat == RepeatMode::One,
            volume_text: format!("{volume_pct}%"),
        }
    }
}

/// One line of the playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRow {
    pub label: String,
    pub is_current: bool,
}

/// Numbered rows in store order, flagging the current track.
pub fn playlist_rows(store: &TrackStore, current: Option<usize>) -> Vec<PlaylistRow> {
    store
        .iter()
        .enumerate()
        .map(|(i, track)| PlaylistRow {
            label: format!("{}. {}", i + 1, track.name),
            is_current: current == Some(i),
        })
        .collect()
}
