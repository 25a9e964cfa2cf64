//! MPRIS bridge: exposes the player on the session bus so media keys and
//! `playerctl` can drive it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};
use std::time::Duration;

use async_io::{Timer, block_on};
use tracing::{info, warn};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::library::Track;
use crate::metadata::NowPlaying;
use crate::player::{PlaybackStatus, RepeatMode};

const BUS_NAME: &str = "org.mpris.MediaPlayer2.tapedeck";
const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
}

#[derive(Debug, Default)]
struct SharedState {
    status: PlaybackStatus,
    title: Option<String>,
    artist: Option<String>,
    url: Option<String>,
    art_url: Option<String>,
    length_micros: Option<i64>,
    track_id: Option<ObjectPath<'static>>,
    shuffle: bool,
    repeat: RepeatMode,
    volume: f64,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    fn update(&self, f: impl FnOnce(&mut SharedState)) {
        if let Ok(mut s) = self.state.lock() {
            f(&mut s);
        }
    }

    pub fn set_status(&self, status: PlaybackStatus) {
        self.update(|s| s.status = status);
    }

    /// Point the metadata at `track`, or clear it when nothing is current.
    pub fn set_track(&self, index: Option<usize>, track: Option<&Track>) {
        self.update(|s| match (index, track) {
            (Some(i), Some(t)) => {
                s.title = Some(t.name.clone());
                s.artist = None;
                s.url = Some(t.url());
                s.art_url = None;
                s.length_micros = None;
                s.track_id = ObjectPath::try_from(format!("{OBJECT_PATH}/track/{i}")).ok();
            }
            _ => {
                s.title = None;
                s.artist = None;
                s.url = None;
                s.art_url = None;
                s.length_micros = None;
                s.track_id = None;
            }
        });
    }

    pub fn set_now_playing(&self, now_playing: &NowPlaying) {
        self.update(|s| {
            s.title = Some(now_playing.title.clone());
            s.artist = Some(now_playing.artist.clone()).filter(|a| !a.is_empty());
            s.art_url = now_playing.cover_url().map(str::to_string);
        });
    }

    pub fn set_length(&self, length: Option<Duration>) {
        self.update(|s| {
            s.length_micros = length.map(|d| i64::try_from(d.as_micros()).unwrap_or(i64::MAX));
        });
    }

    pub fn set_shuffle(&self, shuffle: bool) {
        self.update(|s| s.shuffle = shuffle);
    }

    pub fn set_repeat(&self, repeat: RepeatMode) {
        self.update(|s| s.repeat = repeat);
    }

    pub fn set_volume(&self, volume: f32) {
        self.update(|s| s.volume = f64::from(volume));
    }
}

fn owned<'a>(value: impl Into<Value<'a>>) -> Option<OwnedValue> {
    OwnedValue::try_from(value.into()).ok()
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {}

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "tapedeck"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec!["audio/mpeg".to_string(), "audio/wav".to_string()]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.status {
            PlaybackStatus::Playing | PlaybackStatus::Loading => "Playing",
            PlaybackStatus::Paused => "Paused",
            PlaybackStatus::Idle | PlaybackStatus::Ended => "Stopped",
        }
    }

    #[zbus(property)]
    fn loop_status(&self) -> &str {
        match self.state.lock().map(|s| s.repeat) {
            Ok(RepeatMode::One) => "Track",
            _ => "Playlist",
        }
    }

    #[zbus(property)]
    fn shuffle(&self) -> bool {
        self.state.lock().map(|s| s.shuffle).unwrap_or(false)
    }

    #[zbus(property)]
    fn volume(&self) -> f64 {
        self.state.lock().map(|s| s.volume).unwrap_or(0.0)
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_seek(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        let mut insert = |key: &str, value: Option<OwnedValue>| {
            if let Some(v) = value {
                map.insert(key.to_string(), v);
            }
        };

        insert("mpris:trackid", s.track_id.clone().and_then(owned));
        insert("xesam:title", s.title.clone().and_then(owned));
        insert(
            "xesam:artist",
            s.artist.clone().and_then(|a| owned(vec![a])),
        );
        insert("xesam:url", s.url.clone().and_then(owned));
        insert("mpris:artUrl", s.art_url.clone().and_then(owned));
        insert("mpris:length", s.length_micros.and_then(owned));
        map
    }
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    let spawned = std::thread::Builder::new()
        .name("mpris".to_string())
        .spawn(move || {
            block_on(async move {
                let connection = match Connection::session().await {
                    Ok(c) => c,
                    Err(e) => {
                        warn!(error = %e, "MPRIS: failed to connect to session bus");
                        return;
                    }
                };

                if let Err(e) = connection.request_name(BUS_NAME).await {
                    warn!(error = %e, "MPRIS: failed to acquire name");
                    return;
                }

                let object_server = connection.object_server();

                if let Err(e) = object_server
                    .at(OBJECT_PATH, RootIface { tx: tx.clone() })
                    .await
                {
                    warn!(error = %e, "MPRIS: failed to register root iface");
                    return;
                }

                if let Err(e) = object_server
                    .at(
                        OBJECT_PATH,
                        PlayerIface {
                            tx,
                            state: state_for_thread,
                        },
                    )
                    .await
                {
                    warn!(error = %e, "MPRIS: failed to register player iface");
                    return;
                }

                info!(name = BUS_NAME, "MPRIS service registered");

                // Keep the service alive.
                loop {
                    Timer::after(Duration::from_secs(3600)).await;
                }
            });
        });
    if let Err(e) = spawned {
        warn!(error = %e, "MPRIS: failed to spawn thread");
    }

    MprisHandle { state }
}

#[cfg(test)]
mod tests;
