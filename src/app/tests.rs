use super::*;
use crate::library::LibraryError;
use std::path::{Path, PathBuf};

#[test]
fn cursor_wraps_both_ways() {
    let mut app = App::new(true);
    app.cursor_prev(3);
    assert_eq!(app.cursor, 2);
    app.cursor_next(3);
    assert_eq!(app.cursor, 0);
    app.cursor_next(3);
    assert_eq!(app.cursor, 1);
}

#[test]
fn cursor_moves_are_noops_on_empty_playlist() {
    let mut app = App::new(true);
    app.cursor_next(0);
    app.cursor_prev(0);
    app.cursor_bottom(0);
    assert_eq!(app.cursor, 0);
}

#[test]
fn cursor_top_and_bottom() {
    let mut app = App::new(true);
    app.cursor_bottom(5);
    assert_eq!(app.cursor, 4);
    app.cursor_top();
    assert_eq!(app.cursor, 0);
}

#[test]
fn follow_playback_moves_cursor_only_when_enabled() {
    let mut app = App::new(true);
    app.on_track_changed(3, 5);
    assert_eq!(app.cursor, 3);

    let mut app = App::new(false);
    app.on_track_changed(3, 5);
    assert_eq!(app.cursor, 0);
}

#[test]
fn store_replacement_resets_cursor_and_popup() {
    let mut app = App::new(true);
    app.cursor = 4;
    app.toggle_metadata_window();
    app.on_store_replaced();
    assert_eq!(app.cursor, 0);
    assert!(!app.metadata_window);
}

#[test]
fn empty_prompt_is_a_cancelled_pick() {
    let prompt = DirectoryPrompt::new("   ");
    assert!(matches!(prompt.submit(), Err(LibraryError::Cancelled)));
}

#[test]
fn prompt_edits_and_submits() {
    let mut prompt = DirectoryPrompt::new("/musi");
    prompt.push('c');
    assert_eq!(prompt.submit().unwrap(), PathBuf::from("/music"));
    prompt.pop();
    prompt.clear();
    assert!(prompt.submit().is_err());
}

#[test]
fn prompt_expands_home() {
    let home = Some(Path::new("/home/listener"));
    assert_eq!(expand_with_home("~", home), PathBuf::from("/home/listener"));
    assert_eq!(
        expand_with_home("~/Music", home),
        PathBuf::from("/home/listener/Music")
    );
    assert_eq!(expand_with_home("/srv/~x", home), PathBuf::from("/srv/~x"));
    assert_eq!(expand_with_home("~/Music", None), PathBuf::from("~/Music"));
}

#[test]
fn visible_window_centers_cursor() {
    assert_eq!(visible_window(5, 10, 3), (0, 5));
    assert_eq!(visible_window(100, 10, 50), (45, 55));
    assert_eq!(visible_window(100, 10, 2), (0, 10));
    assert_eq!(visible_window(100, 10, 99), (90, 100));
    assert_eq!(visible_window(100, 0, 50), (0, 100));
}
