use std::{env, path::PathBuf};

use super::schema::{Settings, StorageSettings};

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `LINER__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("LINER")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.artwork.rotation_interval_ms == 0 {
            return Err("artwork.rotation_interval_ms must be >= 1".to_string());
        }
        if self.artwork.max_download_bytes == 0 {
            return Err("artwork.max_download_bytes must be >= 1".to_string());
        }
        if self.lookup.enabled && self.lookup.base_url.trim().is_empty() {
            return Err("lookup.base_url must not be empty".to_string());
        }
        Ok(())
    }
}

impl StorageSettings {
    /// Configured metadata file, or the default under the data directory.
    pub fn metadata_path(&self) -> PathBuf {
        self.metadata_file
            .clone()
            .unwrap_or_else(|| default_data_dir().join("metadata.json"))
    }

    /// Configured library file, or the default under the data directory.
    pub fn library_path(&self) -> PathBuf {
        self.library_file
            .clone()
            .unwrap_or_else(|| default_data_dir().join("library.json"))
    }
}

/// Resolve the config path from `LINER_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("LINER_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/liner/config.toml`
/// or `~/.config/liner/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("liner").join("config.toml"))
}

/// `$XDG_DATA_HOME/liner`, `~/.local/share/liner`, or the working directory.
pub fn default_data_dir() -> PathBuf {
    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("share"))
    };

    match data_home {
        Some(d) => d.join("liner"),
        None => PathBuf::from("."),
    }
}
