use serde::{Deserialize, Serialize};

use crate::lookup::TrackInfo;

/// Everything known about one audio file.
///
/// `track_name`, `artist_name`, `album_name` and `artwork_url` come from the
/// remote lookup; `custom_title` and `image_paths` are owned by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    #[serde(alias = "FilePath", default)]
    pub file_path: String,
    #[serde(alias = "TrackName", default)]
    pub track_name: Option<String>,
    #[serde(alias = "ArtistName", default)]
    pub artist_name: Option<String>,
    #[serde(alias = "AlbumName", default)]
    pub album_name: Option<String>,
    #[serde(alias = "ArtworkUrl", default)]
    pub artwork_url: Option<String>,
    #[serde(alias = "CustomTitle", default)]
    pub custom_title: Option<String>,
    /// Local image files, in display and rotation order.
    #[serde(alias = "ImagePaths", default, deserialize_with = "null_as_empty")]
    pub image_paths: Vec<String>,
}

impl MetadataRecord {
    /// A record that only knows its path.
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            ..Self::default()
        }
    }

    /// Build a fresh record from a lookup result. User-owned fields start empty.
    pub fn from_lookup(file_path: impl Into<String>, info: TrackInfo) -> Self {
        Self {
            file_path: file_path.into(),
            track_name: info.track_name,
            artist_name: info.artist_name,
            album_name: info.album_name,
            artwork_url: info.artwork_url,
            custom_title: None,
            image_paths: Vec::new(),
        }
    }

    /// Title to show: the user's override first, then the fetched track name.
    pub fn display_title(&self) -> Option<&str> {
        non_blank(self.custom_title.as_deref()).or_else(|| non_blank(self.track_name.as_deref()))
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
