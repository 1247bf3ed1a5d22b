use std::path::{Path, PathBuf};

use crate::metadata::MetadataRecord;

/// One displayable image source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    Local(PathBuf),
    Remote(String),
}

/// Ordered image candidates for `record`.
///
/// User images that exist on disk win outright; the fetched artwork URL is
/// only used when none of them do. An empty list means "show the placeholder".
pub fn build_candidates(record: Option<&MetadataRecord>) -> Vec<ImageRef> {
    let Some(record) = record else {
        return Vec::new();
    };

    let local: Vec<ImageRef> = record
        .image_paths
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty() && Path::new(p).is_file())
        .map(|p| ImageRef::Local(PathBuf::from(p)))
        .collect();
    if !local.is_empty() {
        return local;
    }

    match record.artwork_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => vec![ImageRef::Remote(url.to_string())],
        _ => Vec::new(),
    }
}
