//! Application model types: `App` and `PlaybackState`.

use crate::fetch::DisplayEvent;
use crate::library::Track;
use crate::metadata::MetadataRecord;

/// The playback state of the application.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// The main application model.
pub struct App {
    pub tracks: Vec<Track>,
    pub selected: usize,
    pub playback: PlaybackState,
    /// Library index of the track whose info is on display.
    pub active: Option<usize>,
    /// Record shown for the active track, if one arrived.
    pub shown: Option<MetadataRecord>,
    pub shown_from_cache: bool,
    pub status: Option<String>,
    /// Image candidate on screen; `None` means the placeholder.
    pub image_index: Option<usize>,
}

impl App {
    /// Create a new `App` with the provided list of `tracks`.
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            selected: 0,
            playback: PlaybackState::Stopped,
            active: None,
            shown: None,
            shown_from_cache: false,
            status: None,
            image_index: None,
        }
    }

    /// Return true if the library contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn active_track(&self) -> Option<&Track> {
        self.active.and_then(|i| self.tracks.get(i))
    }

    /// Make `idx` the active (and selected) track and forget the previous display.
    pub fn activate(&mut self, idx: usize) -> Option<&Track> {
        if idx >= self.tracks.len() {
            return None;
        }
        self.selected = idx;
        self.active = Some(idx);
        self.shown = None;
        self.shown_from_cache = false;
        self.status = None;
        self.image_index = None;
        self.tracks.get(idx)
    }

    /// Path of the active track while it is actually playing.
    pub fn playing_path(&self) -> Option<String> {
        match self.playback {
            PlaybackState::Playing => self.active_track().map(Track::file_path),
            _ => None,
        }
    }

    /// Index after `current`, wrapping to the first track.
    pub fn next_from(&self, current: usize) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        Some((current + 1) % self.tracks.len())
    }

    /// Index before `current`, wrapping to the last track.
    pub fn prev_from(&self, current: usize) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        Some(match current {
            0 => self.tracks.len() - 1,
            c => (c - 1).min(self.tracks.len() - 1),
        })
    }

    /// Title for the active track: the record's override or fetched name,
    /// falling back to the library title.
    pub fn display_title(&self) -> Option<String> {
        let track = self.active_track()?;
        let title = self
            .shown
            .as_ref()
            .and_then(MetadataRecord::display_title)
            .unwrap_or(track.title.as_str());
        Some(title.to_string())
    }

    /// Apply a display event. Returns false when it was about another track.
    pub fn apply(&mut self, event: &DisplayEvent) -> bool {
        match event {
            DisplayEvent::Metadata {
                record,
                file_path,
                from_cache,
            } => {
                if !self.is_active_path(file_path) {
                    return false;
                }
                self.shown = Some(record.clone());
                self.shown_from_cache = *from_cache;
                self.status = None;
            }
            DisplayEvent::Status { file_path, status } => {
                if !self.is_active_path(file_path) {
                    return false;
                }
                self.status = Some(status.message().to_string());
            }
            DisplayEvent::Image { candidate_index } => {
                self.image_index = *candidate_index;
            }
            DisplayEvent::Clear => {
                self.shown = None;
                self.shown_from_cache = false;
                self.status = None;
                self.image_index = None;
            }
        }
        true
    }

    fn is_active_path(&self, file_path: &str) -> bool {
        self.active_track()
            .is_some_and(|t| t.file_path().to_lowercase() == file_path.to_lowercase())
    }
}
