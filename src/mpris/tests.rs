use super::*;
use crate::metadata::CoverArt;
use std::sync::mpsc;
use std::time::Duration;

fn handle_with_state() -> (MprisHandle, Arc<Mutex<SharedState>>) {
    let state = Arc::new(Mutex::new(SharedState::default()));
    (
        MprisHandle {
            state: state.clone(),
        },
        state,
    )
}

fn iface(state: Arc<Mutex<SharedState>>) -> (PlayerIface, mpsc::Receiver<ControlCmd>) {
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    (PlayerIface { tx, state }, rx)
}

#[test]
fn set_track_sets_and_clears_shared_state() {
    let (handle, state) = handle_with_state();
    let track = Track::new("test.mp3", "/tmp/music/test.mp3");

    handle.set_track(Some(7), Some(&track));
    handle.set_length(Some(Duration::from_micros(1_234_567)));
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("test.mp3"));
        assert_eq!(s.url.as_deref(), Some("file:///tmp/music/test.mp3"));
        assert_eq!(s.length_micros, Some(1_234_567));
        assert_eq!(
            s.track_id.as_ref().map(|p| p.as_str()),
            Some("/org/mpris/MediaPlayer2/track/7")
        );
    }

    handle.set_track(None, None);
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert_eq!(s.url, None);
        assert_eq!(s.length_micros, None);
        assert!(s.track_id.is_none());
    }
}

#[test]
fn now_playing_fills_artist_and_art_url() {
    let (handle, state) = handle_with_state();
    handle.set_now_playing(&NowPlaying {
        index: 0,
        title: "Song".to_string(),
        artist: "Band".to_string(),
        cover: CoverArt::Embedded {
            mime: "image/png".to_string(),
            data_url: "data:image/png;base64,AA==".to_string(),
            size: 1,
        },
        resolved: true,
    });

    let s = state.lock().unwrap();
    assert_eq!(s.title.as_deref(), Some("Song"));
    assert_eq!(s.artist.as_deref(), Some("Band"));
    assert_eq!(s.art_url.as_deref(), Some("data:image/png;base64,AA=="));
}

#[test]
fn playback_status_maps_player_status() {
    let (handle, state) = handle_with_state();
    let (iface, _rx) = iface(state);

    for (status, expected) in [
        (PlaybackStatus::Idle, "Stopped"),
        (PlaybackStatus::Loading, "Playing"),
        (PlaybackStatus::Playing, "Playing"),
        (PlaybackStatus::Paused, "Paused"),
        (PlaybackStatus::Ended, "Stopped"),
    ] {
        handle.set_status(status);
        assert_eq!(iface.playback_status(), expected);
    }
}

#[test]
fn loop_shuffle_and_volume_properties_follow_state() {
    let (handle, state) = handle_with_state();
    let (iface, _rx) = iface(state);

    assert_eq!(iface.loop_status(), "Playlist");
    handle.set_repeat(RepeatMode::One);
    assert_eq!(iface.loop_status(), "Track");

    handle.set_shuffle(true);
    assert!(iface.shuffle());

    handle.set_volume(0.5);
    assert_eq!(iface.volume(), 0.5);
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let (handle, state) = handle_with_state();
    let (iface, _rx) = iface(state);

    handle.set_track(Some(1), Some(&Track::new("a.mp3", "/tmp/a.mp3")));
    handle.set_length(Some(Duration::from_secs(42)));
    handle.set_now_playing(&NowPlaying {
        index: 1,
        title: "Title".to_string(),
        artist: "Artist".to_string(),
        cover: CoverArt::Embedded {
            mime: "image/jpeg".to_string(),
            data_url: "data:image/jpeg;base64,AA==".to_string(),
            size: 1,
        },
        resolved: true,
    });

    let map = iface.metadata();
    for k in [
        "mpris:trackid",
        "xesam:title",
        "xesam:artist",
        "xesam:url",
        "mpris:artUrl",
        "mpris:length",
    ] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn metadata_is_empty_without_a_track() {
    let (_handle, state) = handle_with_state();
    let (iface, _rx) = iface(state);
    assert!(iface.metadata().is_empty());
}

#[test]
fn methods_forward_control_commands() {
    let (_handle, state) = handle_with_state();
    let (iface, rx) = iface(state);

    iface.play_pause();
    iface.next();
    iface.previous();
    iface.stop();

    let got: Vec<ControlCmd> = rx.try_iter().collect();
    assert_eq!(
        got,
        vec![
            ControlCmd::PlayPause,
            ControlCmd::Next,
            ControlCmd::Prev,
            ControlCmd::Stop
        ]
    );
}
