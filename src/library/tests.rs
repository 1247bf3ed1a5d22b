use super::*;
use crate::persist::StoreError;
use std::fs;
use tempfile::tempdir;

#[test]
fn track_title_defaults_to_file_stem() {
    let t = Track::from_path("/music/Artist - Song.mp3");
    assert_eq!(t.title, "Artist - Song");
    assert_eq!(t.file_path(), "/music/Artist - Song.mp3");
}

#[test]
fn library_round_trips_through_its_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("library.json");

    let mut lib = Library::load(&path).unwrap();
    assert!(lib.is_empty());
    assert_eq!(lib.add(vec![Track::from_path("/m/a.mp3"), Track::from_path("/m/b.mp3")]), 2);
    lib.save().unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"filePath\""));

    let reloaded = Library::load(&path).unwrap();
    assert_eq!(reloaded.tracks(), lib.tracks());
}

#[test]
fn add_skips_paths_already_listed() {
    let dir = tempdir().unwrap();
    let mut lib = Library::load(dir.path().join("library.json")).unwrap();
    lib.add(vec![Track::from_path("/m/a.mp3")]);
    assert_eq!(lib.add(vec![Track::new("/m/a.mp3", "again"), Track::from_path("/m/c.mp3")]), 1);
    assert_eq!(lib.len(), 2);

    assert_eq!(lib.remove(0).map(|t| t.title), Some("a".to_string()));
    assert!(lib.remove(5).is_none());
    assert_eq!(lib.get(0).map(|t| t.title.as_str()), Some("c"));
}

#[test]
fn loads_pascal_case_library_files() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("library.json");
    fs::write(&path, r#"[{"Title":"Song","FilePath":"C:\\Music\\Song.mp3"}]"#).unwrap();

    let lib = Library::load(&path).unwrap();
    assert_eq!(lib.tracks()[0].title, "Song");
    assert_eq!(lib.tracks()[0].file_path(), "C:\\Music\\Song.mp3");
}

#[test]
fn malformed_library_is_corrupt_state() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("library.json");
    fs::write(&path, "[1, 2").unwrap();
    assert!(matches!(Library::load(&path), Err(StoreError::CorruptState { .. })));
}
