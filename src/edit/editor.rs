use std::path::Path;

use crate::artwork::ImageRef;
use crate::library::Track;
use crate::metadata::{MetadataRecord, MetadataStore};
use crate::persist::StoreError;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp"];

/// Whether `path` has an extension the image picker accepts.
pub fn is_image_file(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Pending edits for one track.
///
/// Nothing is written until [`save`](Self::save); dropping the editor
/// discards the edits.
#[derive(Debug, Clone)]
pub struct SongEditor {
    file_path: String,
    record: MetadataRecord,
    title: String,
    image_paths: Vec<String>,
    selected: Option<usize>,
}

impl SongEditor {
    /// Start editing `track`, seeded from its stored record when there is one.
    pub fn new(track: &Track, existing: Option<MetadataRecord>) -> Self {
        let file_path = track.file_path();
        let record = existing.unwrap_or_else(|| MetadataRecord::new(file_path.clone()));

        let title = record
            .custom_title
            .clone()
            .or_else(|| record.track_name.clone())
            .unwrap_or_else(|| track.title.clone());
        let image_paths = record.image_paths.clone();
        let selected = (!image_paths.is_empty()).then_some(0);

        Self {
            file_path,
            record,
            title,
            image_paths,
            selected,
        }
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn image_paths(&self) -> &[String] {
        &self.image_paths
    }

    pub fn selected_image(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.image_paths.get(i))
            .map(String::as_str)
    }

    pub fn select_image(&mut self, index: usize) -> bool {
        if index < self.image_paths.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// Append a user-chosen image and select it. Rejects non-image files.
    pub fn add_image(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if path.trim().is_empty() || !is_image_file(&path) {
            return false;
        }
        self.image_paths.push(path);
        self.selected = Some(self.image_paths.len() - 1);
        true
    }

    pub fn can_remove(&self) -> bool {
        self.selected_image().is_some()
    }

    /// Remove the selected image; the first remaining one (if any) becomes selected.
    pub fn remove_selected(&mut self) -> Option<String> {
        let index = self.selected.filter(|&i| i < self.image_paths.len())?;
        let removed = self.image_paths.remove(index);
        self.selected = (!self.image_paths.is_empty()).then_some(0);
        Some(removed)
    }

    /// What the edit view shows: the selected image if it exists on disk,
    /// else the fetched artwork, else nothing (placeholder).
    pub fn preview(&self) -> Option<ImageRef> {
        if let Some(path) = self.selected_image() {
            if Path::new(path).is_file() {
                return Some(ImageRef::Local(path.into()));
            }
        }
        self.record
            .artwork_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .map(|u| ImageRef::Remote(u.to_string()))
    }

    /// Commit the edits. Fetched fields are carried over untouched.
    pub fn save(self, store: &mut MetadataStore) -> Result<MetadataRecord, StoreError> {
        let title = self.title.trim();
        let record = MetadataRecord {
            file_path: self.file_path,
            custom_title: (!title.is_empty()).then(|| title.to_string()),
            image_paths: self.image_paths,
            ..self.record
        };
        store.upsert(record.clone())?;
        tracing::debug!(path = %record.file_path, "saved metadata edits");
        Ok(record)
    }
}
