use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, warn};

use super::backend::BackendEvent;
use super::sink::create_sink_at;
use super::types::{AudioCmd, PlaybackHandle};

const TICK: Duration = Duration::from_millis(100);

/// Position to report for a sink built at `offset`, capped at the known duration.
pub(super) fn reported_position(
    offset: Duration,
    sink_pos: Duration,
    duration: Option<Duration>,
) -> Duration {
    let pos = offset + sink_pos;
    match duration {
        Some(d) => pos.min(d),
        None => pos,
    }
}

/// Whether the tick should emit `BackendEvent::Ended`.
pub(super) fn reached_end(paused: bool, sink_empty: bool, already_reported: bool) -> bool {
    !paused && sink_empty && !already_reported
}

struct Engine {
    stream: OutputStream,
    sink: Option<Sink>,
    current: Option<PathBuf>,
    duration: Option<Duration>,
    // Sinks rebuilt for a seek start counting from zero again.
    offset: Duration,
    volume: f32,
    paused: bool,
    end_reported: bool,
    serial: u64,
    info: PlaybackHandle,
    events: Sender<(u64, BackendEvent)>,
}

impl Engine {
    fn emit(&self, event: BackendEvent) {
        let _ = self.events.send((self.serial, event));
    }

    fn load(&mut self, path: PathBuf, serial: u64) {
        self.serial = serial;
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.paused = true;
        self.end_reported = false;
        self.offset = Duration::ZERO;

        match create_sink_at(&self.stream, &path, Duration::ZERO, self.volume) {
            Ok((sink, duration)) => {
                debug!(path = %path.display(), ?duration, "source loaded");
                self.sink = Some(sink);
                self.duration = duration;
                self.current = Some(path);
                self.publish(|info| {
                    info.position = Duration::ZERO;
                    info.duration = duration;
                });
                self.emit(BackendEvent::Loaded { duration });
            }
            Err(e) => {
                warn!(error = %e, "failed to load source");
                self.current = None;
                self.duration = None;
                self.publish(|info| *info = Default::default());
                self.emit(BackendEvent::Failed(e.to_string()));
            }
        }
    }

    fn play(&mut self) {
        if let Some(ref s) = self.sink {
            s.play();
            self.paused = false;
        }
    }

    fn pause(&mut self) {
        if let Some(ref s) = self.sink {
            s.pause();
            self.paused = true;
        }
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.current = None;
        self.duration = None;
        self.paused = true;
        self.end_reported = false;
        self.offset = Duration::ZERO;
        self.publish(|info| *info = Default::default());
    }

    /// Rebuild the current sink and skip into the file.
    /// This also revives a sink that already ran empty.
    fn seek(&mut self, target: Duration) {
        let Some(path) = self.current.clone() else {
            return;
        };
        let target = match self.duration {
            Some(d) => target.min(d),
            None => target,
        };

        if let Some(s) = self.sink.take() {
            s.stop();
        }

        match create_sink_at(&self.stream, &path, target, self.volume) {
            Ok((sink, _)) => {
                if !self.paused {
                    sink.play();
                }
                self.sink = Some(sink);
                self.offset = target;
                self.end_reported = false;
                self.publish(|info| info.position = target);
            }
            Err(e) => {
                warn!(error = %e, "failed to seek");
                self.current = None;
                self.publish(|info| *info = Default::default());
                self.emit(BackendEvent::Failed(e.to_string()));
            }
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(ref s) = self.sink {
            s.set_volume(self.volume);
        }
    }

    fn tick(&mut self) {
        let Some(ref s) = self.sink else {
            return;
        };

        let position = reported_position(self.offset, s.get_pos(), self.duration);
        let ended = reached_end(self.paused, s.empty(), self.end_reported);
        self.publish(|info| info.position = position);

        if ended {
            self.end_reported = true;
            self.emit(BackendEvent::Ended);
        }
    }

    fn fade_out(&self, fade_out_ms: u64) {
        let Some(ref sink) = self.sink else {
            return;
        };
        if fade_out_ms == 0 || self.paused {
            sink.set_volume(0.0);
            return;
        }
        let steps: u64 = 20;
        let step_ms = (fade_out_ms / steps).max(1);
        for step in 1..=steps {
            let t = step as f32 / steps as f32;
            sink.set_volume(self.volume * (1.0 - t));
            thread::sleep(Duration::from_millis(step_ms));
        }
        sink.set_volume(0.0);
    }

    fn publish(&self, f: impl FnOnce(&mut super::types::PlaybackInfo)) {
        if let Ok(mut info) = self.info.lock() {
            f(&mut info);
        }
    }
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    events: Sender<(u64, BackendEvent)>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("audio".to_string())
        .spawn(move || {
            let mut stream = match OutputStreamBuilder::open_default_stream() {
                Ok(s) => s,
                Err(e) => {
                    error!(error = %e, "no audio output device");
                    let _ = events.send((
                        0,
                        BackendEvent::Failed(format!("no audio output device: {e}")),
                    ));
                    return;
                }
            };
            // rodio logs to stderr when OutputStream is dropped, which would
            // scribble over the TUI.
            stream.log_on_drop(false);

            let mut engine = Engine {
                stream,
                sink: None,
                current: None,
                duration: None,
                offset: Duration::ZERO,
                volume: 1.0,
                paused: true,
                end_reported: false,
                serial: 0,
                info: playback_info,
                events,
            };

            loop {
                match rx.recv_timeout(TICK) {
                    Ok(cmd) => match cmd {
                        AudioCmd::Load { path, serial } => engine.load(path, serial),
                        AudioCmd::Play => engine.play(),
                        AudioCmd::Pause => engine.pause(),
                        AudioCmd::Stop => engine.stop(),
                        AudioCmd::Seek(pos) => engine.seek(pos),
                        AudioCmd::SetVolume(v) => engine.set_volume(v),
                        AudioCmd::Quit { fade_out_ms } => {
                            engine.fade_out(fade_out_ms);
                            engine.stop();
                            break;
                        }
                    },
                    Err(RecvTimeoutError::Timeout) => engine.tick(),
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        })
}
