use std::env;
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::artwork::{ImageResolver, ImageRotator};
use crate::fetch::{DisplayEvent, FetchOrchestrator};
use crate::metadata::SharedStore;

mod commands;
mod event_loop;
mod settings;
mod startup;

pub fn run() -> anyhow::Result<()> {
    let settings = settings::load_settings();

    let dir = env::args_os().nth(1).map(PathBuf::from);

    let store: SharedStore = Arc::new(Mutex::new(startup::open_store(&settings.storage)?));
    let library = startup::open_library(&settings, dir.as_deref())?;
    tracing::info!(tracks = library.len(), "library loaded");

    let (event_tx, event_rx) = mpsc::channel::<DisplayEvent>();
    let orchestrator = FetchOrchestrator::new(
        Arc::clone(&store),
        startup::lookup_client(&settings.lookup),
        event_tx,
    );
    let rotator = ImageRotator::new(Duration::from_millis(settings.artwork.rotation_interval_ms));
    let resolver = Arc::new(ImageResolver::new(&settings.artwork));

    let mut session =
        event_loop::Session::new(library, store, orchestrator, event_rx, rotator, resolver);

    println!("{} tracks; type `help` for commands", session.app.tracks.len());
    event_loop::run(&mut session)
}
