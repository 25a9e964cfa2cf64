//! The playlist/player state machine.
//!
//! `PlayerController` is the only writer of `PlayerState`. UI bindings and
//! media keys call its command methods; the runtime loop calls `pump` to
//! feed it backend lifecycle events and finished metadata reads. Every
//! state change is published to subscribers as a `PlayerEvent`.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::{debug, info, warn};

use crate::audio::{BackendEvent, PlaybackBackend};
use crate::config::PlaybackSettings;
use crate::library::{Track, TrackStore};
use crate::metadata::{FetchOutcome, MetadataFetcher, NowPlaying};

use super::error::PlayerError;
use super::events::{Observers, PlayerEvent};
use super::order::{next_index, previous_index, shuffle_index};
use super::state::{PlaybackStatus, PlayerState, RepeatMode};

pub struct PlayerController<B, R = ThreadRng> {
    store: TrackStore,
    state: PlayerState,
    now_playing: Option<NowPlaying>,
    backend: B,
    metadata: MetadataFetcher,
    rng: R,
    observers: Observers,
}

impl<B: PlaybackBackend> PlayerController<B, ThreadRng> {
    pub fn new(backend: B, metadata: MetadataFetcher) -> Self {
        Self::with_rng(backend, metadata, rand::rng())
    }
}

impl<B: PlaybackBackend, R: Rng> PlayerController<B, R> {
    pub fn with_rng(mut backend: B, metadata: MetadataFetcher, rng: R) -> Self {
        let state = PlayerState::default();
        backend.set_volume(state.effective_volume());
        Self {
            store: TrackStore::default(),
            state,
            now_playing: None,
            backend,
            metadata,
            rng,
            observers: Observers::default(),
        }
    }

    /// Apply the configured start-up modes and volume.
    pub fn apply_settings(&mut self, settings: &PlaybackSettings) {
        self.state.shuffle = settings.shuffle;
        self.state.repeat = RepeatMode::from(settings.repeat);
        self.set_volume(settings.volume);
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    pub fn now_playing(&self) -> Option<&NowPlaying> {
        self.now_playing.as_ref()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.state.current_index.and_then(|i| self.store.get(i))
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn position(&self) -> Duration {
        if self.state.current_index.is_none() {
            return Duration::ZERO;
        }
        self.backend.position()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.state.current_index?;
        self.backend.duration()
    }

    pub fn subscribe(&mut self) -> Receiver<PlayerEvent> {
        self.observers.subscribe()
    }

    /// Swap in a freshly loaded directory. The old store and the backend's
    /// open source are released; nothing is current afterwards.
    pub fn replace_store(&mut self, store: TrackStore) {
        self.metadata.cancel();
        self.backend.stop();

        let released = std::mem::replace(&mut self.store, store);
        info!(
            released = released.len(),
            loaded = self.store.len(),
            "playlist replaced"
        );
        drop(released);

        self.state.current_index = None;
        self.now_playing = None;
        self.set_status(PlaybackStatus::Idle);
        self.observers.emit(PlayerEvent::StoreReplaced {
            len: self.store.len(),
        });
    }

    /// Make track `index` current and start playing it.
    ///
    /// Tag reading happens in the background; its result only changes what
    /// the now-playing box shows.
    pub fn select_track(&mut self, index: usize) -> Result<(), PlayerError> {
        let len = self.store.len();
        if len == 0 {
            return Err(PlayerError::EmptyPlaylist);
        }
        let Some(track) = self.store.get(index).cloned() else {
            return Err(PlayerError::IndexOutOfRange { index, len });
        };

        self.state.current_index = Some(index);
        self.set_status(PlaybackStatus::Loading);
        self.observers.emit(PlayerEvent::TrackChanged { index });

        let pending = NowPlaying::pending(index, &track);
        self.now_playing = Some(pending.clone());
        self.observers.emit(PlayerEvent::NowPlayingChanged(pending));

        self.metadata.request(index, track.path.clone());
        self.backend.load(&track.path);
        self.backend.play();
        self.set_status(PlaybackStatus::Playing);

        info!(index, track = %track.name, "playing");
        Ok(())
    }

    pub fn toggle_play_pause(&mut self) {
        match self.state.status {
            PlaybackStatus::Playing => self.pause(),
            _ => self.play(),
        }
    }

    /// Resume a paused track, or start one when nothing is loaded.
    pub fn play(&mut self) {
        if self.store.is_empty() {
            debug!("play ignored: empty playlist");
            return;
        }
        match self.state.status {
            PlaybackStatus::Paused => {
                self.backend.play();
                self.set_status(PlaybackStatus::Playing);
            }
            PlaybackStatus::Idle | PlaybackStatus::Ended => {
                let index = self.state.current_index.unwrap_or(0);
                if let Err(e) = self.select_track(index) {
                    debug!(error = %e, "play ignored");
                }
            }
            PlaybackStatus::Playing | PlaybackStatus::Loading => {}
        }
    }

    pub fn pause(&mut self) {
        if self.state.status == PlaybackStatus::Playing {
            self.backend.pause();
            self.set_status(PlaybackStatus::Paused);
        }
    }

    pub fn next(&mut self) -> Result<(), PlayerError> {
        let index = next_index(self.state.current_index, self.store.len())
            .ok_or(PlayerError::EmptyPlaylist)?;
        self.select_track(index)
    }

    pub fn previous(&mut self) -> Result<(), PlayerError> {
        let index = previous_index(self.state.current_index, self.store.len())
            .ok_or(PlayerError::EmptyPlaylist)?;
        self.select_track(index)
    }

    /// The backend finished the current track.
    pub fn on_ended(&mut self) {
        let Some(current) = self.state.current_index else {
            return;
        };
        let len = self.store.len();
        if len == 0 {
            return;
        }
        self.set_status(PlaybackStatus::Ended);

        if self.state.repeat == RepeatMode::One {
            self.backend.seek(Duration::ZERO);
            self.backend.play();
            self.set_status(PlaybackStatus::Playing);
            self.observers.emit(PlayerEvent::Seeked(Duration::ZERO));
            return;
        }

        let upcoming = if self.state.shuffle {
            shuffle_index(&mut self.rng, Some(current), len)
        } else {
            next_index(Some(current), len)
        };
        if let Some(index) = upcoming {
            if let Err(e) = self.select_track(index) {
                warn!(error = %e, "auto-advance failed");
            }
        }
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.shuffle = !self.state.shuffle;
        self.observers
            .emit(PlayerEvent::ShuffleChanged(self.state.shuffle));
    }

    pub fn cycle_repeat(&mut self) {
        self.state.repeat = self.state.repeat.cycled();
        self.observers
            .emit(PlayerEvent::RepeatChanged(self.state.repeat));
    }

    /// Jump to `fraction` of the current track. Ignored until the backend
    /// knows the duration.
    pub fn seek(&mut self, fraction: f64) {
        if fraction.is_nan() {
            return;
        }
        let Some(duration) = self.duration() else {
            debug!(fraction, "seek ignored: duration unknown");
            return;
        };
        let target = duration.mul_f64(fraction.clamp(0.0, 1.0));
        self.backend.seek(target);
        self.observers.emit(PlayerEvent::Seeked(target));
    }

    /// Relative seek in seconds, clamped to the track.
    pub fn seek_by(&mut self, seconds: i64) {
        let Some(duration) = self.duration().filter(|d| !d.is_zero()) else {
            return;
        };
        let total = duration.as_secs_f64();
        let target = (self.position().as_secs_f64() + seconds as f64).clamp(0.0, total);
        self.seek(target / total);
    }

    pub fn set_volume(&mut self, volume: f32) {
        if volume.is_nan() {
            return;
        }
        self.state.set_volume(volume);
        self.sync_volume();
    }

    /// Nudge the audible volume by `delta`.
    pub fn change_volume(&mut self, delta: f32) {
        let target = self.state.effective_volume() + delta;
        self.set_volume(target.clamp(0.0, 1.0));
    }

    pub fn toggle_mute(&mut self) {
        self.state.toggle_mute();
        self.sync_volume();
    }

    /// Feed backend lifecycle events and finished tag reads into the state machine.
    pub fn pump(&mut self) {
        for event in self.backend.poll_events() {
            match event {
                BackendEvent::Loaded { duration } => {
                    debug!(?duration, "backend loaded source");
                }
                BackendEvent::Ended => self.on_ended(),
                BackendEvent::Failed(message) => {
                    warn!(%message, "playback failed");
                    self.set_status(PlaybackStatus::Idle);
                    self.observers.emit(PlayerEvent::Error(message));
                }
            }
        }

        for outcome in self.metadata.drain() {
            self.apply_metadata(outcome);
        }
    }

    fn apply_metadata(&mut self, outcome: FetchOutcome) {
        if self.state.current_index != Some(outcome.index) {
            debug!(index = outcome.index, "discarding metadata for a track no longer current");
            return;
        }
        let Some(track) = self.store.get(outcome.index) else {
            return;
        };
        if let Err(ref e) = outcome.result {
            warn!(error = %e, track = %track.name, "metadata unavailable, using fallback");
        }

        let now_playing = NowPlaying::from_result(outcome.index, track, &outcome.result);
        self.now_playing = Some(now_playing.clone());
        self.observers
            .emit(PlayerEvent::NowPlayingChanged(now_playing));
    }

    fn sync_volume(&mut self) {
        self.backend.set_volume(self.state.effective_volume());
        self.observers.emit(PlayerEvent::VolumeChanged {
            volume: self.state.volume,
            muted: self.state.muted,
        });
    }

    fn set_status(&mut self, status: PlaybackStatus) {
        if self.state.status != status {
            self.state.status = status;
            self.observers.emit(PlayerEvent::StatusChanged(status));
        }
    }
}
