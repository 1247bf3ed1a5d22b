use std::path::{Path, PathBuf};

use crate::persist::{StoreError, read_json_list, write_json_atomic};

use super::model::Track;

/// The persisted, ordered track list.
#[derive(Debug)]
pub struct Library {
    path: PathBuf,
    tracks: Vec<Track>,
}

impl Library {
    /// Load the list at `path`; a missing file is an empty library.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let tracks = read_json_list(&path)?;
        Ok(Self { path, tracks })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Append tracks whose path is not already listed. Returns how many were added.
    pub fn add(&mut self, tracks: impl IntoIterator<Item = Track>) -> usize {
        let mut added = 0;
        for track in tracks {
            if self.tracks.iter().any(|t| t.path == track.path) {
                continue;
            }
            self.tracks.push(track);
            added += 1;
        }
        added
    }

    pub fn remove(&mut self, index: usize) -> Option<Track> {
        (index < self.tracks.len()).then(|| self.tracks.remove(index))
    }

    pub fn save(&self) -> Result<(), StoreError> {
        write_json_atomic(&self.path, &self.tracks)
    }
}
