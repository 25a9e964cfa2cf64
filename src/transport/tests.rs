use super::*;
use crate::library::{Track, TrackStore};
use crate::player::{PlaybackStatus, PlayerState, RepeatMode};
use proptest::prelude::*;
use std::time::Duration;

#[test]
fn format_clock_pads_seconds_only() {
    assert_eq!(format_clock(Duration::ZERO), "0:00");
    assert_eq!(format_clock(Duration::from_secs(7)), "0:07");
    assert_eq!(format_clock(Duration::from_millis(65_900)), "1:05");
    assert_eq!(format_clock(Duration::from_secs(3600 + 61)), "61:01");
}

#[test]
fn round_to_second_rounds_half_up() {
    assert_eq!(round_to_second(Duration::from_millis(1_499)), Duration::from_secs(1));
    assert_eq!(round_to_second(Duration::from_millis(1_500)), Duration::from_secs(2));
}

#[test]
fn progress_is_zero_without_a_duration() {
    assert_eq!(progress_percent(Duration::from_secs(5), None), 0.0);
    assert_eq!(progress_percent(Duration::from_secs(5), Some(Duration::ZERO)), 0.0);
}

#[test]
fn progress_is_proportional_and_capped() {
    let total = Some(Duration::from_secs(200));
    assert_eq!(progress_percent(Duration::from_secs(50), total), 25.0);
    assert_eq!(progress_percent(Duration::from_secs(500), total), 100.0);
}

#[test]
fn seek_fraction_guards_zero_width() {
    assert_eq!(seek_fraction(3, 0), None);
    assert_eq!(seek_fraction(25, 100), Some(0.25));
    assert_eq!(seek_fraction(150, 100), Some(1.0));
}

#[test]
fn view_reflects_state_flags() {
    let state = PlayerState {
        status: PlaybackStatus::Playing,
        shuffle: true,
        repeat: RepeatMode::One,
        volume: 0.5,
        ..PlayerState::default()
    };
    let view = TransportView::project(
        &state,
        Duration::from_secs(30),
        Some(Duration::from_millis(119_600)),
    );

    assert_eq!(view.elapsed, "0:30");
    assert_eq!(view.total, "2:00");
    assert_eq!(view.play_icon, PlayIcon::Pause);
    assert_eq!(view.volume_icon, VolumeIcon::Audible);
    assert!(view.shuffle_active);
    assert!(view.repeat_active);
    assert_eq!(view.volume_text, "50%");
}

#[test]
fn view_shows_muted_for_zero_volume_and_explicit_mute() {
    let zero = PlayerState {
        volume: 0.0,
        ..PlayerState::default()
    };
    assert_eq!(
        TransportView::project(&zero, Duration::ZERO, None).volume_icon,
        VolumeIcon::Muted
    );

    let muted = PlayerState {
        muted: true,
        ..PlayerState::default()
    };
    let view = TransportView::project(&muted, Duration::ZERO, None);
    assert_eq!(view.volume_icon, VolumeIcon::Muted);
    assert_eq!(view.volume_text, "0%");
    assert_eq!(view.play_icon, PlayIcon::Play);
    assert_eq!(view.total, "0:00");
    assert_eq!(view.percent, 0.0);
}

#[test]
fn playlist_rows_number_from_one_and_mark_current() {
    let store = TrackStore::new(
        "/music",
        vec![Track::new("a.mp3", "/music/a.mp3"), Track::new("b.wav", "/music/b.wav")],
    );
    let rows = playlist_rows(&store, Some(1));
    assert_eq!(rows[0].label, "1. a.mp3");
    assert!(!rows[0].is_current);
    assert_eq!(rows[1].label, "2. b.wav");
    assert!(rows[1].is_current);

    assert!(playlist_rows(&TrackStore::default(), None).is_empty());
}

proptest! {
    #[test]
    fn progress_stays_in_range(pos_ms in 0u64..10_000_000, total_ms in 0u64..10_000_000) {
        let pct = progress_percent(
            Duration::from_millis(pos_ms),
            Some(Duration::from_millis(total_ms)),
        );
        prop_assert!((0.0..=100.0).contains(&pct));
    }

    #[test]
    fn seek_fraction_stays_in_unit_range(offset in any::<u16>(), width in 1u16..) {
        let f = seek_fraction(offset, width).unwrap();
        prop_assert!((0.0..=1.0).contains(&f));
    }
}
