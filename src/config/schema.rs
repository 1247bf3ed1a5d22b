use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/liner/config.toml` or `~/.config/liner/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `LINER__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub lookup: LookupSettings,
    pub artwork: ArtworkSettings,
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Where metadata records live. Defaults to `<data dir>/liner/metadata.json`.
    pub metadata_file: Option<PathBuf>,
    /// Where the track list lives. Defaults to `<data dir>/liner/library.json`.
    pub library_file: Option<PathBuf>,
    /// Move an unreadable metadata file aside and start empty instead of aborting.
    pub reset_corrupt: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LookupSettings {
    /// Set to false to never contact the remote catalog.
    pub enabled: bool,
    /// Search endpoint.
    pub base_url: String,
    /// Optional two-letter storefront code.
    pub country: Option<String>,
    pub user_agent: String,
    /// Transport timeout. Unset means lookups only end by completing or
    /// being superseded.
    pub timeout_ms: Option<u64>,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://itunes.apple.com/search".to_string(),
            country: None,
            user_agent: concat!("liner/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtworkSettings {
    /// How long each image stays up while several rotate (milliseconds).
    pub rotation_interval_ms: u64,
    /// Image shown when a track has nothing displayable.
    pub placeholder: Option<PathBuf>,
    /// Cap on a single remote artwork download.
    pub max_download_bytes: u64,
}

impl Default for ArtworkSettings {
    fn default() -> Self {
        Self {
            rotation_interval_ms: 3000,
            placeholder: None,
            max_download_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
    /// Use the title tag when present instead of the file name.
    pub read_tags: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec![
                "mp3".into(),
                "flac".into(),
                "wav".into(),
                "ogg".into(),
                "m4a".into(),
            ],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
            read_tags: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` wins when set.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
