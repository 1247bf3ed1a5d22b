use super::*;
use crate::artwork::ImageRef;
use crate::library::Track;
use crate::metadata::{MetadataRecord, MetadataStore};
use std::fs;
use tempfile::tempdir;

fn fetched(path: &str) -> MetadataRecord {
    MetadataRecord {
        file_path: path.to_string(),
        track_name: Some("X".into()),
        artist_name: Some("Artist".into()),
        album_name: Some("Album".into()),
        artwork_url: Some("https://example.com/x.jpg".into()),
        custom_title: None,
        image_paths: Vec::new(),
    }
}

#[test]
fn title_defaults_follow_custom_then_track_name_then_library_title() {
    let track = Track::new("/m/song.mp3", "Library Title");

    let editor = SongEditor::new(&track, None);
    assert_eq!(editor.title(), "Library Title");
    assert_eq!(editor.file_path(), "/m/song.mp3");

    let editor = SongEditor::new(&track, Some(fetched("/m/song.mp3")));
    assert_eq!(editor.title(), "X");

    let mut custom = fetched("/m/song.mp3");
    custom.custom_title = Some("Custom".into());
    let editor = SongEditor::new(&track, Some(custom));
    assert_eq!(editor.title(), "Custom");
}

#[test]
fn saving_custom_title_changes_displayed_title() {
    let dir = tempdir().unwrap();
    let mut store = MetadataStore::open(dir.path().join("metadata.json")).unwrap();
    store.upsert(fetched("song.mp3")).unwrap();
    assert_eq!(store.get("song.mp3").unwrap().display_title(), Some("X"));

    let track = Track::from_path("song.mp3");
    let mut editor = SongEditor::new(&track, store.get("song.mp3").cloned());
    editor.set_title("Y");
    editor.save(&mut store).unwrap();

    assert_eq!(store.get("song.mp3").unwrap().display_title(), Some("Y"));
}

#[test]
fn save_carries_fetched_fields_through() {
    let dir = tempdir().unwrap();
    let mut store = MetadataStore::open(dir.path().join("metadata.json")).unwrap();
    store.upsert(fetched("/m/a.mp3")).unwrap();

    let mut editor = SongEditor::new(&Track::from_path("/m/a.mp3"), store.get("/m/a.mp3").cloned());
    editor.set_title("New");
    assert!(editor.add_image("/covers/front.png"));
    let saved = editor.save(&mut store).unwrap();

    assert_eq!(saved.track_name.as_deref(), Some("X"));
    assert_eq!(saved.artist_name.as_deref(), Some("Artist"));
    assert_eq!(saved.album_name.as_deref(), Some("Album"));
    assert_eq!(saved.artwork_url.as_deref(), Some("https://example.com/x.jpg"));
    assert_eq!(saved.custom_title.as_deref(), Some("New"));
    assert_eq!(saved.image_paths, vec!["/covers/front.png".to_string()]);
    assert_eq!(store.get("/m/a.mp3"), Some(&saved));
}

#[test]
fn editing_uncached_track_creates_record() {
    let dir = tempdir().unwrap();
    let mut store = MetadataStore::open(dir.path().join("metadata.json")).unwrap();

    let editor = SongEditor::new(&Track::new("/m/new.mp3", "Fresh"), None);
    editor.save(&mut store).unwrap();

    let saved = store.get("/m/new.mp3").unwrap();
    assert_eq!(saved.custom_title.as_deref(), Some("Fresh"));
    assert_eq!(saved.track_name, None);
}

#[test]
fn blank_title_clears_override() {
    let dir = tempdir().unwrap();
    let mut store = MetadataStore::open(dir.path().join("metadata.json")).unwrap();
    let mut record = fetched("/m/a.mp3");
    record.custom_title = Some("Old".into());
    store.upsert(record.clone()).unwrap();

    let mut editor = SongEditor::new(&Track::from_path("/m/a.mp3"), Some(record));
    editor.set_title("   ");
    let saved = editor.save(&mut store).unwrap();
    assert_eq!(saved.custom_title, None);
    assert_eq!(saved.display_title(), Some("X"));
}

#[test]
fn dropping_editor_saves_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("metadata.json");
    let store = MetadataStore::open(&path).unwrap();

    let mut editor = SongEditor::new(&Track::from_path("/m/a.mp3"), None);
    editor.set_title("Never saved");
    drop(editor);

    assert!(store.is_empty());
    assert!(!path.exists());
}

#[test]
fn add_and_remove_images_manage_selection() {
    let mut record = fetched("/m/a.mp3");
    record.image_paths = vec!["/c/1.png".into(), "/c/2.jpg".into()];
    let mut editor = SongEditor::new(&Track::from_path("/m/a.mp3"), Some(record));
    assert_eq!(editor.selected_image(), Some("/c/1.png"));

    assert!(!editor.add_image("/c/notes.txt"));
    assert!(!editor.add_image("  "));
    assert!(editor.add_image("/c/3.JPEG"));
    assert_eq!(editor.selected_image(), Some("/c/3.JPEG"));

    assert!(editor.select_image(1));
    assert!(!editor.select_image(9));
    assert_eq!(editor.remove_selected().as_deref(), Some("/c/2.jpg"));
    assert_eq!(editor.image_paths(), ["/c/1.png".to_string(), "/c/3.JPEG".to_string()]);
    assert_eq!(editor.selected_image(), Some("/c/1.png"));

    editor.remove_selected();
    editor.remove_selected();
    assert!(editor.image_paths().is_empty());
    assert_eq!(editor.selected_image(), None);
    assert!(!editor.can_remove());
    assert_eq!(editor.remove_selected(), None);
}

#[test]
fn preview_prefers_existing_selected_image_then_artwork() {
    let dir = tempdir().unwrap();
    let cover = dir.path().join("cover.png");
    fs::write(&cover, b"x").unwrap();

    let mut editor = SongEditor::new(&Track::from_path("/m/a.mp3"), Some(fetched("/m/a.mp3")));
    assert_eq!(
        editor.preview(),
        Some(ImageRef::Remote("https://example.com/x.jpg".into()))
    );

    editor.add_image(cover.to_string_lossy().into_owned());
    assert_eq!(editor.preview(), Some(ImageRef::Local(cover)));

    editor.add_image("/missing/elsewhere.png");
    assert_eq!(
        editor.preview(),
        Some(ImageRef::Remote("https://example.com/x.jpg".into()))
    );

    let bare = SongEditor::new(&Track::from_path("/m/b.mp3"), None);
    assert_eq!(bare.preview(), None);
}
