//! Application model types: `App` and `DirectoryPrompt`.

use std::path::{Path, PathBuf};

use crate::library::LibraryError;

/// Text input for the directory to load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryPrompt {
    pub input: String,
}

impl DirectoryPrompt {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            input: initial.into(),
        }
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop(&mut self) {
        self.input.pop();
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }

    /// The chosen directory. An empty input counts as a cancelled pick.
    pub fn submit(&self) -> Result<PathBuf, LibraryError> {
        let raw = self.input.trim();
        if raw.is_empty() {
            return Err(LibraryError::Cancelled);
        }
        Ok(expand_home(raw))
    }
}

/// Expand a leading `~` to `$HOME`.
pub fn expand_home(raw: &str) -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    expand_with_home(raw, home.as_deref())
}

pub fn expand_with_home(raw: &str, home: Option<&Path>) -> PathBuf {
    match (raw, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (s, Some(home)) if s.starts_with("~/") => home.join(&s[2..]),
        (s, _) => PathBuf::from(s),
    }
}

/// Rows `[start, end)` of a `total`-row list shown in `height` rows, keeping
/// `cursor` centered where possible.
pub fn visible_window(total: usize, height: usize, cursor: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = cursor.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// The main application model.
#[derive(Debug, Default)]
pub struct App {
    pub cursor: usize,
    /// Move the cursor to each track as it starts playing.
    pub follow_playback: bool,
    pub metadata_window: bool,
    pub prompt: Option<DirectoryPrompt>,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(follow_playback: bool) -> Self {
        Self {
            follow_playback,
            ..Self::default()
        }
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
    }

    pub fn open_prompt(&mut self, initial: impl Into<String>) {
        self.prompt = Some(DirectoryPrompt::new(initial));
    }

    pub fn close_prompt(&mut self) {
        self.prompt = None;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Move the cursor down, wrapping to the top.
    pub fn cursor_next(&mut self, len: usize) {
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn cursor_prev(&mut self, len: usize) {
        if len > 0 {
            self.cursor = (self.cursor + len - 1) % len;
        }
    }

    pub fn cursor_top(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_bottom(&mut self, len: usize) {
        self.cursor = len.saturating_sub(1);
    }

    pub fn set_cursor(&mut self, index: usize, len: usize) {
        self.cursor = index.min(len.saturating_sub(1));
    }

    /// Called when a track becomes current.
    pub fn on_track_changed(&mut self, index: usize, len: usize) {
        if self.follow_playback {
            self.set_cursor(index, len);
        }
    }

    /// Called after a new directory replaced the playlist.
    pub fn on_store_replaced(&mut self) {
        self.cursor = 0;
        self.metadata_window = false;
    }
}
