use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use super::backend::{BackendEvent, PlaybackBackend};
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo};

/// `PlaybackBackend` running `rodio` on a dedicated audio thread.
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    events: Receiver<(u64, BackendEvent)>,
    // Serial of the last `Load`; events about older sources are dropped.
    serial: u64,
    // Failures noticed on this side of the channel.
    local_events: Vec<BackendEvent>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new() -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events) = mpsc::channel::<(u64, BackendEvent)>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(rx, playback_info.clone(), events_tx)?;

        Ok(Self {
            tx,
            events,
            serial: 0,
            local_events: Vec::new(),
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
        })
    }

    fn send(&self, cmd: AudioCmd) -> bool {
        match self.tx.send(cmd) {
            Ok(()) => true,
            Err(e) => {
                warn!(cmd = ?e.0, "audio thread is gone");
                false
            }
        }
    }

    fn snapshot(&self) -> PlaybackInfo {
        self.playback
            .lock()
            .map(|info| info.clone())
            .unwrap_or_default()
    }

    /// Fade out, stop the audio thread and wait for it.
    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.tx.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl PlaybackBackend for AudioPlayer {
    fn load(&mut self, path: &Path) {
        // Forget the previous source right away so the controller never
        // sees its duration for the new track.
        if let Ok(mut info) = self.playback.lock() {
            *info = PlaybackInfo::default();
        }
        self.serial += 1;
        let sent = self.send(AudioCmd::Load {
            path: path.to_path_buf(),
            serial: self.serial,
        });
        if !sent {
            self.local_events
                .push(BackendEvent::Failed("audio output is not running".to_string()));
        }
    }

    fn play(&mut self) {
        let _ = self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        let _ = self.send(AudioCmd::Pause);
    }

    fn stop(&mut self) {
        if let Ok(mut info) = self.playback.lock() {
            *info = PlaybackInfo::default();
        }
        let _ = self.send(AudioCmd::Stop);
    }

    fn seek(&mut self, position: Duration) {
        if let Ok(mut info) = self.playback.lock() {
            info.position = position;
        }
        let _ = self.send(AudioCmd::Seek(position));
    }

    fn set_volume(&mut self, volume: f32) {
        let _ = self.send(AudioCmd::SetVolume(volume));
    }

    fn position(&self) -> Duration {
        self.snapshot().position
    }

    fn duration(&self) -> Option<Duration> {
        self.snapshot().duration
    }

    fn poll_events(&mut self) -> Vec<BackendEvent> {
        // Serial 0 is reserved for failures that are not about a source.
        let serial = self.serial;
        let mut events: Vec<BackendEvent> = self.local_events.drain(..).collect();
        events.extend(
            self.events
                .try_iter()
                .filter(|(s, _)| *s == serial || *s == 0)
                .map(|(_, event)| event),
        );
        events
    }
}
