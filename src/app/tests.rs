use super::*;
use crate::fetch::{DisplayEvent, FetchStatus};
use crate::library::Track;
use crate::metadata::MetadataRecord;

fn app() -> App {
    App::new(vec![
        Track::new("/m/song.mp3", "song"),
        Track::new("/m/other.mp3", "other"),
        Track::new("/m/third.mp3", "third"),
    ])
}

fn metadata(path: &str, record: MetadataRecord) -> DisplayEvent {
    DisplayEvent::Metadata {
        record,
        file_path: path.to_string(),
        from_cache: true,
    }
}

#[test]
fn title_falls_back_from_custom_to_track_name_to_library_title() {
    let mut app = app();
    assert_eq!(app.display_title(), None);

    app.activate(0);
    assert_eq!(app.display_title().as_deref(), Some("song"));

    let mut record = MetadataRecord::new("/m/song.mp3");
    record.track_name = Some("X".into());
    assert!(app.apply(&metadata("/m/song.mp3", record.clone())));
    assert_eq!(app.display_title().as_deref(), Some("X"));

    record.custom_title = Some("Y".into());
    app.apply(&metadata("/M/SONG.mp3", record));
    assert_eq!(app.display_title().as_deref(), Some("Y"));
}

#[test]
fn events_for_other_tracks_are_ignored() {
    let mut app = app();
    app.activate(0);

    assert!(!app.apply(&metadata("/m/other.mp3", MetadataRecord::new("/m/other.mp3"))));
    assert!(!app.apply(&DisplayEvent::Status {
        file_path: "/m/other.mp3".into(),
        status: FetchStatus::NotFound,
    }));
    assert!(app.shown.is_none());
    assert!(app.status.is_none());
}

#[test]
fn status_then_metadata_then_clear() {
    let mut app = app();
    app.activate(1);

    app.apply(&DisplayEvent::Status {
        file_path: "/m/other.mp3".into(),
        status: FetchStatus::LookupFailed,
    });
    assert_eq!(app.status.as_deref(), Some("error loading info"));

    app.apply(&metadata("/m/other.mp3", MetadataRecord::new("/m/other.mp3")));
    assert!(app.status.is_none());
    assert!(app.shown_from_cache);

    app.apply(&DisplayEvent::Image { candidate_index: Some(2) });
    assert_eq!(app.image_index, Some(2));

    app.apply(&DisplayEvent::Clear);
    assert!(app.shown.is_none());
    assert_eq!(app.image_index, None);
}

#[test]
fn playing_path_only_while_playing() {
    let mut app = app();
    app.activate(2);
    assert_eq!(app.playing_path(), None);

    app.playback = PlaybackState::Playing;
    assert_eq!(app.playing_path().as_deref(), Some("/m/third.mp3"));

    app.playback = PlaybackState::Paused;
    assert_eq!(app.playing_path(), None);
}

#[test]
fn next_and_prev_wrap() {
    let app = app();
    assert_eq!(app.next_from(2), Some(0));
    assert_eq!(app.next_from(0), Some(1));
    assert_eq!(app.prev_from(0), Some(2));
    assert_eq!(app.prev_from(2), Some(1));

    let empty = App::new(Vec::new());
    assert!(!empty.has_tracks());
    assert_eq!(empty.next_from(0), None);
    assert_eq!(empty.prev_from(0), None);
}

#[test]
fn activate_rejects_out_of_range() {
    let mut app = app();
    assert!(app.activate(7).is_none());
    assert_eq!(app.active, None);
    assert_eq!(app.activate(1).map(|t| t.title.clone()), Some("other".to_string()));
    assert_eq!(app.selected, 1);
}
