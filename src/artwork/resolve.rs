use std::io::Read;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use url::Url;

use crate::config::ArtworkSettings;

use super::candidates::ImageRef;

/// A candidate turned into something drawable.
#[derive(Debug, Clone)]
pub enum ResolvedImage {
    Loaded(DynamicImage),
    /// The candidate could not be loaded (or there was none); draw the placeholder.
    Placeholder,
}

impl ResolvedImage {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

#[derive(Debug, thiserror::Error)]
enum LoadError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("download larger than {0} bytes")]
    TooLarge(u64),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Decode(#[from] image::ImageError),
    #[error("unsupported reference")]
    Unsupported,
}

/// Turns a candidate into pixels. Implementations never fail: anything
/// that cannot be loaded is [`ResolvedImage::Placeholder`].
pub trait ImageLoader: Send + Sync {
    fn resolve(&self, candidate: Option<&ImageRef>) -> ResolvedImage;

    fn placeholder_image(&self) -> Option<DynamicImage> {
        None
    }
}

/// Loads image candidates from disk or over HTTP.
///
/// Failures never propagate: anything that cannot be loaded resolves to
/// [`ResolvedImage::Placeholder`].
pub struct ImageResolver {
    agent: ureq::Agent,
    max_download_bytes: u64,
    placeholder: Option<PathBuf>,
}

impl ImageResolver {
    pub fn new(settings: &ArtworkSettings) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            max_download_bytes: settings.max_download_bytes,
            placeholder: settings.placeholder.clone(),
        }
    }

    pub fn resolve(&self, candidate: Option<&ImageRef>) -> ResolvedImage {
        match candidate {
            Some(ImageRef::Local(path)) => self.finish(path.display(), load_file(path)),
            Some(ImageRef::Remote(url)) => self.resolve_reference(url),
            None => ResolvedImage::Placeholder,
        }
    }

    /// Resolve a free-form reference: an existing local path, a `file://`
    /// URI, or an `http(s)://` URL.
    pub fn resolve_reference(&self, reference: &str) -> ResolvedImage {
        let reference = reference.trim();
        if reference.is_empty() {
            return ResolvedImage::Placeholder;
        }

        let local = Path::new(reference);
        if local.is_file() {
            return self.finish(reference, load_file(local));
        }

        let result = match Url::parse(reference) {
            Ok(url) => match url.scheme() {
                "file" => url
                    .to_file_path()
                    .map_err(|()| LoadError::Unsupported)
                    .and_then(|path| load_file(&path)),
                "http" | "https" => self.download(url.as_str()),
                _ => Err(LoadError::Unsupported),
            },
            Err(_) => Err(LoadError::Unsupported),
        };
        self.finish(reference, result)
    }

    /// The configured placeholder image, if one is set and loads.
    pub fn placeholder_image(&self) -> Option<DynamicImage> {
        let path = self.placeholder.as_deref()?;
        match load_file(path) {
            Ok(img) => Some(img),
            Err(e) => {
                tracing::warn!(path = %path.display(), "placeholder image unavailable: {e}");
                None
            }
        }
    }

    fn download(&self, url: &str) -> Result<DynamicImage, LoadError> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| LoadError::Http(e.to_string()))?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .take(self.max_download_bytes + 1)
            .read_to_end(&mut bytes)?;
        if bytes.len() as u64 > self.max_download_bytes {
            return Err(LoadError::TooLarge(self.max_download_bytes));
        }

        Ok(image::load_from_memory(&bytes)?)
    }

    fn finish(
        &self,
        what: impl std::fmt::Display,
        result: Result<DynamicImage, LoadError>,
    ) -> ResolvedImage {
        match result {
            Ok(img) => ResolvedImage::Loaded(img),
            Err(e) => {
                tracing::debug!(image = %what, "falling back to placeholder: {e}");
                ResolvedImage::Placeholder
            }
        }
    }
}

impl ImageLoader for ImageResolver {
    fn resolve(&self, candidate: Option<&ImageRef>) -> ResolvedImage {
        ImageResolver::resolve(self, candidate)
    }

    fn placeholder_image(&self) -> Option<DynamicImage> {
        ImageResolver::placeholder_image(self)
    }
}

fn load_file(path: &Path) -> Result<DynamicImage, LoadError> {
    Ok(image::open(path)?)
}
