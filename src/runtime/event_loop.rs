use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Rect;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info, warn};

use crate::app::App;
use crate::audio::{AudioPlayer, PlaybackBackend};
use crate::config;
use crate::library::{LibraryError, load_directory};
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{PlayerController, PlayerError, PlayerEvent};
use crate::runtime::mpris_sync::sync_event;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    pending_zz: bool,
    /// Frame area of the last draw, used to hit-test mouse clicks.
    pub area: Rect,
}

/// Main terminal event loop: handles input, UI drawing, controller events
/// and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &mut PlayerController<AudioPlayer>,
    events: &mpsc::Receiver<PlayerEvent>,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        player.pump();
        for event in events.try_iter() {
            apply_event(&event, app, player);
            sync_event(mpris, player, &event);
        }
        // The length is only known once the audio thread has opened the file.
        mpris.set_length(player.duration());

        let completed = terminal.draw(|f| ui::draw(f, app, player, settings))?;
        state.area = completed.area;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, player) {
                quit(player, settings);
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, settings, app, player, state) {
                        quit(player, settings);
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, app, player, state),
                _ => {}
            }
        }
    }

    Ok(())
}

fn quit(player: &PlayerController<AudioPlayer>, settings: &config::Settings) {
    player
        .backend()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
}

/// UI-side reaction to a controller event.
fn apply_event<B: PlaybackBackend, R: rand::Rng>(
    event: &PlayerEvent,
    app: &mut App,
    player: &PlayerController<B, R>,
) {
    match event {
        PlayerEvent::StoreReplaced { len } => {
            debug!(len, "store replaced");
            app.on_store_replaced();
        }
        PlayerEvent::TrackChanged { index } => {
            app.on_track_changed(*index, player.store().len());
        }
        PlayerEvent::Seeked(position) => debug!(?position, "seeked"),
        PlayerEvent::Error(message) => app.set_status(format!("error: {message}")),
        _ => {}
    }
}

/// Load `picked` into the player, autoplaying the first track if configured.
pub(super) fn open_directory<B: PlaybackBackend, R: rand::Rng>(
    player: &mut PlayerController<B, R>,
    app: &mut App,
    settings: &config::Settings,
    picked: Result<PathBuf, LibraryError>,
) {
    let loaded = picked.and_then(|dir| load_directory(&dir, &settings.library));
    match loaded {
        Ok(store) => {
            let len = store.len();
            player.replace_store(store);
            if len == 0 {
                app.set_status("no playable files in that directory");
                return;
            }
            app.clear_status();
            if settings.playback.autoplay {
                if let Err(e) = player.select_track(0) {
                    warn!(error = %e, "autoplay failed");
                }
            }
        }
        Err(e) if e.is_cancelled() => debug!("directory selection cancelled"),
        Err(e) => {
            warn!(error = %e, "could not load directory");
            app.set_status(e.to_string());
        }
    }
}

fn report(app: &mut App, result: Result<(), PlayerError>) {
    if let Err(e) = result {
        debug!(error = %e, "command ignored");
        app.set_status(e.to_string());
    }
}

/// Returns true when shutdown is requested.
fn handle_control_cmd<B: PlaybackBackend, R: rand::Rng>(
    cmd: ControlCmd,
    player: &mut PlayerController<B, R>,
) -> bool {
    debug!(?cmd, "media key");
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => player.play(),
        ControlCmd::Pause => player.pause(),
        ControlCmd::PlayPause => player.toggle_play_pause(),
        // There is no stopped state distinct from paused.
        ControlCmd::Stop => player.pause(),
        ControlCmd::Next => {
            if let Err(e) = player.next() {
                debug!(error = %e, "next ignored");
            }
        }
        ControlCmd::Prev => {
            if let Err(e) = player.previous() {
                debug!(error = %e, "previous ignored");
            }
        }
    }
    false
}

fn handle_prompt_key<B: PlaybackBackend, R: rand::Rng>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &mut PlayerController<B, R>,
) {
    let Some(prompt) = app.prompt.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => {
            app.close_prompt();
            open_directory(player, app, settings, Err(LibraryError::Cancelled));
        }
        KeyCode::Enter => {
            let picked = prompt.submit();
            app.close_prompt();
            if let Ok(dir) = &picked {
                info!(dir = %dir.display(), "opening directory");
            }
            open_directory(player, app, settings, picked);
        }
        KeyCode::Backspace => prompt.pop(),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => prompt.clear(),
        KeyCode::Char(c) if !c.is_control() => prompt.push(c),
        _ => {}
    }
}

/// Returns true when shutdown is requested.
fn handle_key_event<B: PlaybackBackend, R: rand::Rng>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    player: &mut PlayerController<B, R>,
    state: &mut EventLoopState,
) -> bool {
    if app.prompt.is_some() {
        state.pending_gg = false;
        state.pending_zz = false;
        handle_prompt_key(key, settings, app, player);
        return false;
    }

    let len = player.store().len();
    let scrub = i64::try_from(settings.controls.scrub_seconds).unwrap_or(i64::MAX);
    let step = settings.controls.volume_step;

    // Any key other than the second half of a prefix cancels it.
    let was_gg = std::mem::take(&mut state.pending_gg);
    let was_zz = std::mem::take(&mut state.pending_zz);

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('p') | KeyCode::Char(' ') => player.toggle_play_pause(),
        KeyCode::Char('l') => {
            app.follow_playback = true;
            report(app, player.next());
        }
        KeyCode::Char('h') => {
            app.follow_playback = true;
            report(app, player.previous());
        }
        KeyCode::Char('s') => player.toggle_shuffle(),
        KeyCode::Char('r') => player.cycle_repeat(),
        KeyCode::Char('m') => player.toggle_mute(),
        KeyCode::Char('+') | KeyCode::Char('=') => player.change_volume(step),
        KeyCode::Char('-') => player.change_volume(-step),
        KeyCode::Char('L') => player.seek_by(scrub),
        KeyCode::Char('H') => player.seek_by(-scrub),
        KeyCode::Char('j') | KeyCode::Down => {
            app.follow_playback = false;
            app.cursor_next(len);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.follow_playback = false;
            app.cursor_prev(len);
        }
        KeyCode::Char('g') => {
            if was_gg {
                app.follow_playback = false;
                app.cursor_top();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            app.follow_playback = false;
            app.cursor_bottom(len);
        }
        KeyCode::Char('z') => {
            if was_zz {
                app.follow_playback = true;
                if let Some(current) = player.state().current_index {
                    app.set_cursor(current, len);
                }
            } else {
                state.pending_zz = true;
            }
        }
        KeyCode::Enter => {
            if len > 0 {
                app.follow_playback = true;
                report(app, player.select_track(app.cursor));
            }
        }
        KeyCode::Char('o') => {
            let initial = player
                .store()
                .dir()
                .map(|d| d.display().to_string())
                .unwrap_or_default();
            app.open_prompt(initial);
        }
        KeyCode::Char('K') => app.toggle_metadata_window(),
        KeyCode::Esc => app.metadata_window = false,
        _ => {}
    }

    false
}

fn handle_mouse_event<B: PlaybackBackend, R: rand::Rng>(
    mouse: MouseEvent,
    app: &mut App,
    player: &mut PlayerController<B, R>,
    state: &EventLoopState,
) {
    if app.prompt.is_some() {
        return;
    }
    let areas = ui::layout(state.area);
    let len = player.store().len();

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(fraction) = ui::progress_hit(areas.progress, mouse.column, mouse.row) {
                player.seek(fraction);
            } else if let Some(index) =
                ui::playlist_hit(areas.playlist, mouse.column, mouse.row, len, app.cursor)
            {
                app.set_cursor(index, len);
                report(app, player.select_track(index));
            }
        }
        MouseEventKind::ScrollDown => {
            app.follow_playback = false;
            app.cursor_next(len);
        }
        MouseEventKind::ScrollUp => {
            app.follow_playback = false;
            app.cursor_prev(len);
        }
        _ => {}
    }
}
