use std::path::Path;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::error::LibraryError;
use super::model::Track;
use super::store::TrackStore;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// List the audio files directly inside `dir`.
///
/// Subdirectories are not entered. Tracks keep the directory's enumeration
/// order unless `sort_by_name` is set. Only failures on `dir` itself are
/// errors; unreadable entries are skipped.
pub fn load_directory(dir: &Path, settings: &LibrarySettings) -> Result<TrackStore, LibraryError> {
    let meta = dir
        .metadata()
        .map_err(|e| LibraryError::from_io(dir.to_path_buf(), e))?;
    if !meta.is_dir() {
        return Err(LibraryError::NotADirectory(dir.to_path_buf()));
    }

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(settings.follow_links);

    let mut tracks: Vec<Track> = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Reading the root itself failed.
            Err(err) if err.depth() == 0 => {
                let path = err.path().unwrap_or(dir).to_path_buf();
                return Err(match err.into_io_error() {
                    Some(io) => LibraryError::from_io(path, io),
                    None => LibraryError::NotFound(path),
                });
            }
            Err(err) => {
                warn!(error = %err, "skipping unreadable directory entry");
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if !settings.include_hidden && is_hidden(path) {
            continue;
        }
        if !is_audio_file(path, settings) {
            debug!(path = %path.display(), "ignoring non-audio file");
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        tracks.push(Track::new(name, path));
    }

    if settings.sort_by_name {
        tracks.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    }

    info!(dir = %dir.display(), tracks = tracks.len(), "loaded directory");
    Ok(TrackStore::new(dir, tracks))
}
