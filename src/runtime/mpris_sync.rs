use crate::audio::PlaybackBackend;
use crate::mpris::MprisHandle;
use crate::player::{PlayerController, PlayerEvent};

/// Push the whole player state, used once at start-up.
pub fn sync_all<B: PlaybackBackend, R: rand::Rng>(mpris: &MprisHandle, player: &PlayerController<B, R>) {
    let state = player.state();
    mpris.set_status(state.status);
    mpris.set_shuffle(state.shuffle);
    mpris.set_repeat(state.repeat);
    mpris.set_volume(state.effective_volume());
    mpris.set_track(state.current_index, player.current_track());
}

/// Mirror one controller event onto the MPRIS properties.
pub fn sync_event<B: PlaybackBackend, R: rand::Rng>(
    mpris: &MprisHandle,
    player: &PlayerController<B, R>,
    event: &PlayerEvent,
) {
    match event {
        PlayerEvent::StoreReplaced { .. } => mpris.set_track(None, None),
        PlayerEvent::TrackChanged { index } => {
            mpris.set_track(Some(*index), player.store().get(*index));
        }
        PlayerEvent::StatusChanged(status) => mpris.set_status(*status),
        PlayerEvent::NowPlayingChanged(now_playing) => mpris.set_now_playing(now_playing),
        PlayerEvent::ShuffleChanged(shuffle) => mpris.set_shuffle(*shuffle),
        PlayerEvent::RepeatChanged(repeat) => mpris.set_repeat(*repeat),
        PlayerEvent::VolumeChanged { volume, muted } => {
            mpris.set_volume(if *muted { 0.0 } else { *volume });
        }
        PlayerEvent::Seeked(_) | PlayerEvent::Error(_) => {}
    }
}
