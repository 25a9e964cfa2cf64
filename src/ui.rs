//! UI rendering helpers for the terminal user interface.
//!
//! This module renders the TUI using `ratatui` and maps mouse clicks back
//! onto the widgets that were drawn.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, visible_window};
use crate::audio::PlaybackBackend;
use crate::config::Settings;
use crate::metadata::{CoverArt, NowPlaying};
use crate::player::{PlaybackStatus, PlayerController};
use crate::transport::{TransportView, playlist_rows, seek_fraction};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("zz", "cursor to playing");
    map.insert("enter", "play selected song");
    map.insert("space/p", "play/pause");
    map.insert("h/l", "prev/next song");
    // H/L is filled dynamically from config.
    map.insert("-/+", "volume");
    map.insert("m", "mute");
    map.insert("s", "shuffle");
    map.insert("r", "repeat");
    map.insert("o", "open directory");
    map.insert("K", "track info");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    let order = [
        "j/k", "h/l", "H/L", "enter", "space/p", "-/+", "m", "s", "r", "gg/G", "zz", "o", "K",
        "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{scrub_seconds}s"))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{k}] {v}"))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Screen regions, shared by drawing and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub header: Rect,
    pub now_playing: Rect,
    pub playlist: Rect,
    pub progress: Rect,
    pub status: Rect,
    pub footer: Rect,
}

pub fn layout(area: Rect) -> Areas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(area);
    Areas {
        header: chunks[0],
        now_playing: chunks[1],
        playlist: chunks[2],
        progress: chunks[3],
        status: chunks[4],
        footer: chunks[5],
    }
}

/// Area inside a one-cell border.
fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Playlist index under a click, given the list length and cursor used to draw it.
pub fn playlist_hit(area: Rect, column: u16, row: u16, len: usize, cursor: usize) -> Option<usize> {
    let list = inner(area);
    if !contains(list, column, row) {
        return None;
    }
    let (start, end) = visible_window(len, list.height as usize, cursor);
    let index = start + (row - list.y) as usize;
    (index < end).then_some(index)
}

/// Seek fraction for a click on the progress bar.
pub fn progress_hit(area: Rect, column: u16, row: u16) -> Option<f64> {
    let bar = inner(area);
    if !contains(bar, column, row) {
        return None;
    }
    seek_fraction(column - bar.x, bar.width)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn left_pad() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

fn cover_text(now_playing: &NowPlaying) -> String {
    match &now_playing.cover {
        CoverArt::Embedded { mime, size, .. } => format!("{mime}, {size} bytes"),
        CoverArt::Placeholder if !now_playing.resolved => "…".to_string(),
        CoverArt::Placeholder => "none".to_string(),
        CoverArt::Fallback => "unavailable".to_string(),
    }
}

fn now_playing_text(now_playing: Option<&NowPlaying>) -> String {
    let Some(np) = now_playing else {
        return "Nothing playing".to_string();
    };
    let artist = if np.resolved {
        np.artist.as_str()
    } else {
        "reading tags…"
    };
    format!(
        "Title: {}\nArtist: {}\nCover: {}",
        np.title,
        artist,
        cover_text(np)
    )
}

fn status_label(status: PlaybackStatus) -> &'static str {
    match status {
        PlaybackStatus::Idle => "Stopped",
        PlaybackStatus::Loading => "Loading",
        PlaybackStatus::Playing => "Playing",
        PlaybackStatus::Paused => "Paused",
        PlaybackStatus::Ended => "Ended",
    }
}

/// Render the entire UI into `frame`.
pub fn draw<B: PlaybackBackend, R: rand::Rng>(
    frame: &mut Frame,
    app: &App,
    player: &PlayerController<B, R>,
    settings: &Settings,
) {
    let areas = layout(frame.area());
    let state = player.state();
    let view = TransportView::project(state, player.position(), player.duration());

    // Header
    let header = Paragraph::new(settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tapedeck ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, areas.header);

    // Now playing
    let now_playing = Paragraph::new(now_playing_text(player.now_playing()))
        .block(
            Block::bordered()
                .padding(left_pad())
                .title(" now playing "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, areas.now_playing);

    // Playlist
    {
        let rows = playlist_rows(player.store(), state.current_index);
        let list_height = inner(areas.playlist).height as usize;
        let (start, end) = visible_window(rows.len(), list_height, app.cursor);

        let visible_items: Vec<ListItem> = rows[start..end]
            .iter()
            .map(|row| {
                let item = ListItem::new(row.label.as_str());
                if row.is_current {
                    item.style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                } else {
                    item
                }
            })
            .collect();

        let title = match player.store().dir() {
            Some(dir) => format!(" tracks ({}) ", dir.display()),
            None => " tracks ".to_string(),
        };
        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut list_state = ratatui::widgets::ListState::default();
        if !rows.is_empty() {
            list_state.select(Some(app.cursor.saturating_sub(start)));
        }
        frame.render_stateful_widget(list, areas.playlist, &mut list_state);
    }

    // Progress
    let gauge = Gauge::default()
        .block(
            Block::bordered().title(format!(" {} ", view.play_icon.glyph())),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio((view.percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{} / {}", view.elapsed, view.total));
    frame.render_widget(gauge, areas.progress);

    // Status line
    let status = {
        let mut parts: Vec<String> = vec![status_label(state.status).to_string()];
        parts.push(format!(
            "Shuffle: {}",
            if view.shuffle_active { "ON" } else { "OFF" }
        ));
        parts.push(format!(
            "Repeat: {}",
            if view.repeat_active { "One" } else { "Off" }
        ));
        parts.push(format!("{} {}", view.volume_icon.glyph(), view.volume_text));
        if app.follow_playback {
            parts.push("CURSOR: Follow".to_string());
        } else {
            parts.push("CURSOR: Free-roam".to_string());
        }
        if let Some(msg) = &app.status_message {
            parts.push(msg.clone());
        }
        parts.join(" • ")
    };
    let status_par = Paragraph::new(status)
        .block(Block::bordered().padding(left_pad()).title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, areas.status);

    // Track info popup, kept inside the playlist area.
    if app.metadata_window {
        let popup_area = centered_rect_sized(72, 9, areas.playlist);
        frame.render_widget(Clear, popup_area);

        let info = match player.store().get(app.cursor) {
            Some(track) => {
                let mut lines = vec![
                    format!("Name: {}", track.name),
                    format!("Path: {}", track.path.display()),
                ];
                if state.current_index == Some(app.cursor) {
                    if let Some(np) = player.now_playing() {
                        lines.push(format!("Title: {}", np.title));
                        lines.push(format!("Artist: {}", np.artist));
                        lines.push(format!("Cover: {}", cover_text(np)));
                    }
                    lines.push(format!("Duration: {}", view.total));
                }
                lines.join("\n")
            }
            None => "No track selected".to_string(),
        };
        let info_paragraph = Paragraph::new(info)
            .block(
                Block::default()
                    .padding(left_pad())
                    .borders(Borders::ALL)
                    .title(" track info (K closes) "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(info_paragraph, popup_area);
    }

    let footer = Paragraph::new(controls_text(settings.controls.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, areas.footer);

    // Directory prompt
    if let Some(prompt) = &app.prompt {
        let popup_area = centered_rect_sized(72, 3, frame.area());
        frame.render_widget(Clear, popup_area);
        let input = Paragraph::new(prompt.input.as_str()).block(
            Block::bordered()
                .title(" open directory (enter loads, esc cancels) ")
                .bold(),
        );
        frame.render_widget(input, popup_area);

        let field = inner(popup_area);
        let typed = prompt.input.chars().count() as u16;
        frame.set_cursor_position((
            field.x + typed.min(field.width.saturating_sub(1)),
            field.y,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: 40,
            height: 30,
        }
    }

    #[test]
    fn layout_stacks_regions_top_to_bottom() {
        let a = layout(area());
        assert_eq!(a.header.y, 0);
        assert!(a.now_playing.y < a.playlist.y);
        assert!(a.playlist.y < a.progress.y);
        assert!(a.progress.y < a.status.y);
        assert!(a.status.y < a.footer.y);
    }

    #[test]
    fn progress_click_maps_to_fraction_of_inner_width() {
        let bar = Rect {
            x: 0,
            y: 10,
            width: 12,
            height: 3,
        };
        assert_eq!(progress_hit(bar, 1, 11), Some(0.0));
        assert_eq!(progress_hit(bar, 6, 11), Some(0.5));
        assert_eq!(progress_hit(bar, 0, 11), None);
        assert_eq!(progress_hit(bar, 6, 10), None);
    }

    #[test]
    fn playlist_click_accounts_for_scrolling() {
        let list = Rect {
            x: 0,
            y: 0,
            width: 20,
            height: 7,
        };
        // Five visible rows, short list.
        assert_eq!(playlist_hit(list, 2, 1, 3, 0), Some(0));
        assert_eq!(playlist_hit(list, 2, 3, 3, 0), Some(2));
        assert_eq!(playlist_hit(list, 2, 4, 3, 0), None);
        // Long list centered on cursor 50: rows 48..53.
        assert_eq!(playlist_hit(list, 2, 1, 100, 50), Some(48));
        assert_eq!(playlist_hit(list, 0, 1, 100, 50), None);
    }

    #[test]
    fn now_playing_text_shows_pending_and_fallback() {
        use crate::library::Track;
        let track = Track::new("song.mp3", "/m/song.mp3");
        let pending = NowPlaying::pending(0, &track);
        assert!(now_playing_text(Some(&pending)).contains("reading tags"));

        let fallback = NowPlaying::fallback(0, &track);
        let text = now_playing_text(Some(&fallback));
        assert!(text.contains("Unknown Artist (Metadata Error)"));
        assert!(text.contains("unavailable"));

        assert_eq!(now_playing_text(None), "Nothing playing");
    }

    #[test]
    fn controls_text_includes_scrub_seconds() {
        let text = controls_text(7);
        assert!(text.contains("[H/L] scrub -/+7s"));
        assert!(text.contains("[o] open directory"));
    }
}
