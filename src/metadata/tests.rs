use super::now_playing::{UNKNOWN_ARTIST, data_url};
use super::*;
use crate::library::Track;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

struct FixedReader(TrackTags);

impl MetadataReader for FixedReader {
    fn read(&self, _path: &Path) -> Result<TrackTags, MetadataError> {
        Ok(self.0.clone())
    }
}

/// Blocks every read until the test releases the gate.
struct GatedReader {
    gate: Arc<Mutex<()>>,
}

impl MetadataReader for GatedReader {
    fn read(&self, path: &Path) -> Result<TrackTags, MetadataError> {
        let _g = self.gate.lock().unwrap_or_else(|p| p.into_inner());
        Ok(TrackTags {
            title: path.file_stem().map(|s| s.to_string_lossy().into_owned()),
            ..TrackTags::default()
        })
    }
}

fn song() -> Track {
    Track::new("song.mp3", "/tmp/music/song.mp3")
}

#[test]
fn data_url_encodes_format_and_base64_bytes() {
    let picture = Picture {
        data: b"hello".to_vec(),
        format: "image/png".to_string(),
    };
    assert_eq!(data_url(&picture), "data:image/png;base64,aGVsbG8=");
}

#[test]
fn tags_fill_title_artist_and_cover() {
    let tags = TrackTags {
        title: Some("Title".into()),
        artist: Some("Artist".into()),
        picture: Some(Picture {
            data: vec![1, 2, 3],
            format: "image/jpeg".into(),
        }),
    };
    let np = NowPlaying::from_tags(3, &song(), &tags);
    assert_eq!(np.index, 3);
    assert_eq!(np.title, "Title");
    assert_eq!(np.artist, "Artist");
    assert!(np.resolved);
    assert_eq!(np.cover_url(), Some("data:image/jpeg;base64,AQID"));
    assert!(matches!(np.cover, CoverArt::Embedded { size: 3, .. }));
}

#[test]
fn missing_tag_fields_fall_back_to_name_and_unknown_artist() {
    let np = NowPlaying::from_tags(0, &song(), &TrackTags::default());
    assert_eq!(np.title, "song.mp3");
    assert_eq!(np.artist, UNKNOWN_ARTIST);
    assert_eq!(np.cover, CoverArt::Placeholder);
    assert_eq!(np.cover_url(), None);
}

#[test]
fn read_failure_shows_metadata_error_fallback() {
    let np = NowPlaying::from_result(0, &song(), &Err(MetadataError::NoTags));
    assert_eq!(np.title, "song.mp3");
    assert_eq!(np.artist, "Unknown Artist (Metadata Error)");
    assert_eq!(np.cover, CoverArt::Fallback);

    let unavailable = NowPlaying::from_result(0, &song(), &Err(MetadataError::Unavailable));
    assert_eq!(unavailable, np);
}

#[test]
fn pending_uses_file_name_and_placeholder() {
    let np = NowPlaying::pending(1, &song());
    assert_eq!(np.title, "song.mp3");
    assert!(!np.resolved);
    assert_eq!(np.cover, CoverArt::Placeholder);
}

#[test]
fn fetcher_without_reader_reports_unavailable() {
    let fetcher = MetadataFetcher::new(None, FetchMode::Background);
    let ticket = fetcher.request(0, PathBuf::from("/tmp/a.mp3"));
    let outcomes = fetcher.drain();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].ticket, ticket);
    assert!(matches!(outcomes[0].result, Err(MetadataError::Unavailable)));
}

#[test]
fn inline_fetcher_drops_superseded_results() {
    let reader: Arc<dyn MetadataReader> = Arc::new(FixedReader(TrackTags::default()));
    let fetcher = MetadataFetcher::new(Some(reader), FetchMode::Inline);

    fetcher.request(0, PathBuf::from("/tmp/a.mp3"));
    let second = fetcher.request(1, PathBuf::from("/tmp/b.mp3"));

    let outcomes = fetcher.drain();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].ticket, second);
    assert_eq!(outcomes[0].index, 1);
}

#[test]
fn cancel_invalidates_pending_results() {
    let reader: Arc<dyn MetadataReader> = Arc::new(FixedReader(TrackTags::default()));
    let fetcher = MetadataFetcher::new(Some(reader), FetchMode::Inline);

    let ticket = fetcher.request(0, PathBuf::from("/tmp/a.mp3"));
    fetcher.cancel();
    assert!(!fetcher.is_current(ticket));
    assert!(fetcher.drain().is_empty());
}

#[test]
fn background_fetcher_only_delivers_latest_request() {
    let gate = Arc::new(Mutex::new(()));
    let held = gate.lock().unwrap();

    let reader: Arc<dyn MetadataReader> = Arc::new(GatedReader { gate: gate.clone() });
    let fetcher = MetadataFetcher::new(Some(reader), FetchMode::Background);

    fetcher.request(0, PathBuf::from("/tmp/first.mp3"));
    let latest = fetcher.request(1, PathBuf::from("/tmp/second.mp3"));
    drop(held);

    let deadline = Instant::now() + Duration::from_secs(5);
    let mut got = Vec::new();
    while got.is_empty() && Instant::now() < deadline {
        got.extend(fetcher.drain());
        std::thread::sleep(Duration::from_millis(10));
    }

    assert_eq!(got.len(), 1);
    assert_eq!(got[0].ticket, latest);
    assert_eq!(got[0].index, 1);
    let title = got[0].result.as_ref().ok().and_then(|t| t.title.clone());
    assert_eq!(title.as_deref(), Some("second"));

    std::thread::sleep(Duration::from_millis(50));
    assert!(fetcher.drain().is_empty());
}
