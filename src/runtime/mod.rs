use std::env;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::{App, expand_home};
use crate::audio::AudioPlayer;
use crate::logging;
use crate::metadata::{FetchMode, LoftyReader, MetadataFetcher, MetadataReader};
use crate::mpris::ControlCmd;
use crate::player::PlayerController;

mod event_loop;
mod mpris_sync;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_problem) = settings::load_settings();
    let _log_guard = logging::init(&settings.logging);
    info!(version = env!("CARGO_PKG_VERSION"), "tapedeck starting");
    if let Some(problem) = &config_problem {
        warn!("{problem}");
    }

    let audio_player = AudioPlayer::new()?;
    let reader: Option<Arc<dyn MetadataReader>> = if settings.metadata.enabled {
        Some(Arc::new(LoftyReader))
    } else {
        None
    };
    let mut player = PlayerController::new(
        audio_player,
        MetadataFetcher::new(reader, FetchMode::Background),
    );
    player.apply_settings(&settings.playback);
    let events = player.subscribe();

    let mut app = App::new(settings.ui.follow_playback);
    if let Some(problem) = config_problem {
        app.set_status(problem);
    }

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);
    mpris_sync::sync_all(&mpris, &player);

    match env::args().nth(1) {
        Some(dir) => event_loop::open_directory(&mut player, &mut app, &settings, Ok(expand_home(&dir))),
        None => {
            let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            app.open_prompt(cwd.display().to_string());
        }
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::default();
    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut player,
        &events,
        &mpris,
        &control_rx,
        &mut state,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("tapedeck exiting");
    run_result
}
