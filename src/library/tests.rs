use super::*;
use std::io;
use std::path::PathBuf;

#[test]
fn track_url_is_a_file_url() {
    let t = Track::new("song.mp3", "/tmp/music/song.mp3");
    assert_eq!(t.url(), "file:///tmp/music/song.mp3");
}

#[test]
fn store_preserves_insertion_order() {
    let store = TrackStore::new(
        "/tmp/music",
        vec![
            Track::new("z.mp3", "/tmp/music/z.mp3"),
            Track::new("a.mp3", "/tmp/music/a.mp3"),
        ],
    );
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(0).map(|t| t.name.as_str()), Some("z.mp3"));
    assert_eq!(store.get(1).map(|t| t.name.as_str()), Some("a.mp3"));
    assert!(store.get(2).is_none());
    assert_eq!(store.dir(), Some(std::path::Path::new("/tmp/music")));
}

#[test]
fn default_store_is_empty() {
    let store = TrackStore::default();
    assert!(store.is_empty());
    assert!(store.dir().is_none());
}

#[test]
fn io_errors_map_to_library_errors() {
    let p = PathBuf::from("/tmp/x");
    assert!(matches!(
        LibraryError::from_io(p.clone(), io::Error::from(io::ErrorKind::PermissionDenied)),
        LibraryError::AccessDenied { .. }
    ));
    assert!(matches!(
        LibraryError::from_io(p.clone(), io::Error::from(io::ErrorKind::NotFound)),
        LibraryError::NotFound(_)
    ));
    assert!(matches!(
        LibraryError::from_io(p, io::Error::other("boom")),
        LibraryError::Io { .. }
    ));
    assert!(LibraryError::Cancelled.is_cancelled());
}
