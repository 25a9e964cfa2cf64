use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::metadata::NowPlaying;

use super::state::{PlaybackStatus, RepeatMode};

/// State-change notifications published by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    StoreReplaced { len: usize },
    TrackChanged { index: usize },
    StatusChanged(PlaybackStatus),
    NowPlayingChanged(NowPlaying),
    ShuffleChanged(bool),
    RepeatChanged(RepeatMode),
    VolumeChanged { volume: f32, muted: bool },
    Seeked(Duration),
    Error(String),
}

/// Fan-out of events to every live subscriber.
#[derive(Default)]
pub(super) struct Observers {
    subscribers: Vec<Sender<PlayerEvent>>,
}

impl Observers {
    pub(super) fn subscribe(&mut self) -> Receiver<PlayerEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Dropped receivers unsubscribe themselves.
    pub(super) fn emit(&mut self, event: PlayerEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
