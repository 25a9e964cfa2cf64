use super::thread::{reached_end, reported_position};
use super::types::PlaybackInfo;
use std::time::Duration;

#[test]
fn reported_position_adds_seek_offset() {
    let pos = reported_position(Duration::from_secs(30), Duration::from_secs(2), None);
    assert_eq!(pos, Duration::from_secs(32));
}

#[test]
fn reported_position_is_capped_at_duration() {
    let pos = reported_position(
        Duration::from_secs(170),
        Duration::from_secs(20),
        Some(Duration::from_secs(180)),
    );
    assert_eq!(pos, Duration::from_secs(180));
}

#[test]
fn end_is_reported_once_while_playing() {
    assert!(reached_end(false, true, false));
    assert!(!reached_end(false, true, true));
    assert!(!reached_end(true, true, false));
    assert!(!reached_end(false, false, false));
}

#[test]
fn playback_info_defaults_to_unknown_duration() {
    let info = PlaybackInfo::default();
    assert_eq!(info.position, Duration::ZERO);
    assert!(info.duration.is_none());
}
