use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One entry in the library: an audio file and the title shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    #[serde(rename = "filePath", alias = "FilePath")]
    pub path: PathBuf,
    #[serde(alias = "Title", default)]
    pub title: String,
}

impl Track {
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
        }
    }

    /// Build a track whose title is the file name without its extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let title = default_title(&path);
        Self { path, title }
    }

    /// The path as the string key used by the metadata store.
    pub fn file_path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

pub(super) fn default_title(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string()
}
