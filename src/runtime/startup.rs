use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;

use crate::config;
use crate::library::{Library, scan};
use crate::lookup::{DisabledClient, ItunesClient, LookupClient};
use crate::metadata::MetadataStore;
use crate::persist::StoreError;

/// Open the metadata store. A corrupt file aborts startup unless
/// `storage.reset_corrupt` is set, in which case it is moved aside.
pub fn open_store(storage: &config::StorageSettings) -> anyhow::Result<MetadataStore> {
    let path = storage.metadata_path();
    match MetadataStore::open(&path) {
        Ok(store) => Ok(store),
        Err(StoreError::CorruptState { path, source }) if storage.reset_corrupt => {
            let backup = backup_path(&path);
            fs::rename(&path, &backup).with_context(|| {
                format!("failed to move corrupt metadata file {}", path.display())
            })?;
            tracing::warn!(
                backup = %backup.display(),
                "metadata file was corrupt ({source}); starting with an empty store"
            );
            Ok(MetadataStore::empty(path))
        }
        Err(e) => Err(e).context("failed to open metadata store (set storage.reset_corrupt to start over)"),
    }
}

/// Load the saved library, adding anything found under `dir`.
pub fn open_library(settings: &config::Settings, dir: Option<&Path>) -> anyhow::Result<Library> {
    let mut library = Library::load(settings.storage.library_path())
        .context("failed to load the library")?;

    if let Some(dir) = dir {
        let added = library.add(scan(dir, &settings.library));
        tracing::info!(dir = %dir.display(), added, "scanned music directory");
        if added > 0 {
            library.save().context("failed to save the library")?;
        }
    }
    Ok(library)
}

pub fn lookup_client(settings: &config::LookupSettings) -> Arc<dyn LookupClient> {
    if settings.enabled {
        Arc::new(ItunesClient::new(settings))
    } else {
        tracing::info!("remote lookup disabled");
        Arc::new(DisabledClient)
    }
}

fn backup_path(path: &Path) -> std::path::PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".corrupt-{stamp}"));
    path.with_file_name(name)
}
