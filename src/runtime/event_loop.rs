use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::app::{App, PlaybackState};
use crate::artwork::{ImageLoader, ImageRef, ImageRotator, ResolvedImage};
use crate::edit::SongEditor;
use crate::fetch::{DisplayEvent, FetchOrchestrator};
use crate::library::Library;
use crate::metadata::SharedStore;

use super::commands::{Command, HELP};

const TICK: Duration = Duration::from_millis(50);

/// Everything the control loop owns.
pub struct Session {
    pub app: App,
    library: Library,
    store: SharedStore,
    orchestrator: FetchOrchestrator,
    events: Receiver<DisplayEvent>,
    rotator: ImageRotator,
    resolver: Arc<dyn ImageLoader>,
    /// Bumped for every image request; only the latest may print.
    image_generation: u64,
    image_tx: Sender<(u64, String)>,
    image_rx: Receiver<(u64, String)>,
    shown_image: Option<String>,
    stale_images: u64,
}

impl Session {
    pub fn new(
        library: Library,
        store: SharedStore,
        orchestrator: FetchOrchestrator,
        events: Receiver<DisplayEvent>,
        rotator: ImageRotator,
        resolver: Arc<dyn ImageLoader>,
    ) -> Self {
        let (image_tx, image_rx) = mpsc::channel();
        Self {
            app: App::new(library.tracks().to_vec()),
            library,
            store,
            orchestrator,
            events,
            rotator,
            resolver,
            image_generation: 0,
            image_tx,
            image_rx,
            shown_image: None,
            stale_images: 0,
        }
    }

    /// Handle one command. Returns true when the user asked to quit.
    pub fn handle(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Quit => return true,
            Command::Help => println!("{HELP}"),
            Command::List => self.print_list(),
            Command::Show => self.print_now_playing(),
            Command::Play(idx) => self.play(idx),
            Command::Pause => {
                if self.app.playback == PlaybackState::Playing {
                    self.app.playback = PlaybackState::Paused;
                    self.sync_rotation();
                }
            }
            Command::Resume => {
                if self.app.playback == PlaybackState::Paused {
                    self.app.playback = PlaybackState::Playing;
                    self.sync_rotation();
                }
            }
            Command::Stop => {
                self.app.playback = PlaybackState::Stopped;
                self.sync_rotation();
            }
            Command::Next => {
                let from = self.app.active.unwrap_or(self.app.selected);
                let target = match self.app.active {
                    Some(_) => self.app.next_from(from),
                    None => self.app.has_tracks().then_some(from),
                };
                if let Some(idx) = target {
                    self.play(idx);
                }
            }
            Command::Prev => {
                let from = self.app.active.unwrap_or(self.app.selected);
                if let Some(idx) = self.app.prev_from(from) {
                    self.play(idx);
                }
            }
            Command::Title(text) => self.edit(|editor| {
                editor.set_title(text);
                true
            }),
            Command::AddImage(path) => self.edit(|editor| {
                let added = editor.add_image(path.clone());
                if !added {
                    println!("not an image file: {path}");
                }
                added
            }),
            Command::RemoveImage(idx) => self.edit(|editor| {
                if !editor.select_image(idx) || !editor.can_remove() {
                    println!("no image {}", idx + 1);
                    return false;
                }
                editor.remove_selected().is_some()
            }),
        }
        false
    }

    /// Apply finished lookups, display events and rotation for this instant.
    pub fn step(&mut self, now: Instant) {
        self.orchestrator.pump();
        while let Ok(event) = self.events.try_recv() {
            self.show(event, now);
        }
        if let Some(event) = self.rotator.tick(now) {
            self.show(event, now);
        }
        while let Ok((generation, line)) = self.image_rx.try_recv() {
            if generation != self.image_generation {
                tracing::debug!(generation, latest = self.image_generation, "dropping stale image");
                self.stale_images += 1;
                continue;
            }
            println!("{line}");
            self.shown_image = Some(line);
        }
    }

    fn play(&mut self, idx: usize) {
        let Some(track) = self.app.activate(idx).cloned() else {
            println!("no track {}", idx + 1);
            return;
        };
        self.app.playback = PlaybackState::Playing;
        println!("> playing {}", track.title);
        self.orchestrator.activate(&track);
        self.sync_rotation();
    }

    fn sync_rotation(&mut self) {
        let playing = self.app.playing_path();
        self.rotator.set_playback(playing.as_deref(), Instant::now());
    }

    /// Run `change` against an editor for the active track and save it.
    fn edit(&mut self, change: impl FnOnce(&mut SongEditor) -> bool) {
        let Some(track) = self.app.active_track().cloned() else {
            println!("nothing is playing");
            return;
        };

        let saved = match self.store.lock() {
            Ok(mut store) => {
                let mut editor = SongEditor::new(&track, store.get(&track.file_path()).cloned());
                if !change(&mut editor) {
                    return;
                }
                editor.save(&mut store)
            }
            Err(_) => {
                tracing::error!("metadata store lock poisoned");
                return;
            }
        };

        match saved {
            Ok(_) => {
                self.orchestrator.redisplay(&track.file_path());
            }
            Err(e) => {
                tracing::warn!(path = %track.file_path(), "failed to save edit: {e}");
                println!("could not save: {e}");
            }
        }
    }

    fn show(&mut self, event: DisplayEvent, now: Instant) {
        if !self.app.apply(&event) {
            return;
        }
        match event {
            DisplayEvent::Metadata { record, .. } => {
                let image = self.rotator.rebuild(Some(&record), now);
                self.sync_rotation();
                self.print_now_playing();
                self.show(image, now);
            }
            DisplayEvent::Clear => {
                self.image_generation += 1;
                self.shown_image = None;
                let image = self.rotator.rebuild(None, now);
                self.sync_rotation();
                self.app.apply(&image);
            }
            DisplayEvent::Status { .. } => {
                if let Some(status) = &self.app.status {
                    println!("  [{status}]");
                }
            }
            DisplayEvent::Image { candidate_index } => {
                let total = self.rotator.state().candidates.len();
                let candidate = self.rotator.current().cloned();
                self.resolve_in_background(candidate_index, total, candidate);
            }
        }
    }

    /// Image loading may hit the network; it runs off the control loop and
    /// reports a line to print, tagged so a late answer for an older
    /// request is dropped.
    fn resolve_in_background(&mut self, index: Option<usize>, total: usize, candidate: Option<ImageRef>) {
        self.image_generation += 1;
        let generation = self.image_generation;
        let resolver = Arc::clone(&self.resolver);
        let tx = self.image_tx.clone();
        let spawned = thread::Builder::new()
            .name("image-resolve".into())
            .spawn(move || {
                let label = match &candidate {
                    Some(ImageRef::Local(p)) => p.display().to_string(),
                    Some(ImageRef::Remote(url)) => url.clone(),
                    None => "placeholder".to_string(),
                };
                let line = match (index, resolver.resolve(candidate.as_ref())) {
                    (Some(i), ResolvedImage::Loaded(img)) => {
                        format!("  image {}/{total}: {label} ({}x{})", i + 1, img.width(), img.height())
                    }
                    (Some(i), ResolvedImage::Placeholder) => {
                        format!("  image {}/{total}: {label} (unavailable, placeholder)", i + 1)
                    }
                    (None, _) => match resolver.placeholder_image() {
                        Some(img) => format!("  image: placeholder ({}x{})", img.width(), img.height()),
                        None => "  image: placeholder".to_string(),
                    },
                };
                let _ = tx.send((generation, line));
            });
        if let Err(e) = spawned {
            tracing::warn!("failed to start image loader: {e}");
        }
    }

    fn print_list(&self) {
        if self.library.is_empty() {
            println!("library is empty; pass a music directory to scan");
            return;
        }
        for (i, track) in self.app.tracks.iter().enumerate() {
            let marker = if self.app.active == Some(i) { '*' } else { ' ' };
            println!("{marker}{:>4}  {}", i + 1, track.title);
        }
    }

    fn print_now_playing(&self) {
        let Some(title) = self.app.display_title() else {
            println!("nothing is playing");
            return;
        };
        let state = match self.app.playback {
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Stopped => "stopped",
        };
        println!("  {title} [{state}]");
        if let Some(record) = &self.app.shown {
            let artist = record.artist_name.as_deref().unwrap_or("unknown artist");
            let album = record.album_name.as_deref().unwrap_or("unknown album");
            let source = if self.app.shown_from_cache { "cached" } else { "fetched" };
            println!("  {artist} / {album} ({source})");
            if !record.image_paths.is_empty() {
                println!("  images: {}", record.image_paths.join(", "));
            }
        }
        if let Some(status) = &self.app.status {
            println!("  [{status}]");
        }
    }
}

/// Read lines from stdin on a helper thread.
fn spawn_input() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    let _ = thread::Builder::new().name("stdin".into()).spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn prompt() {
    print!("liner> ");
    let _ = io::stdout().flush();
}

/// Main control loop: waits up to one tick for input, then applies
/// whatever lookups and timers have come due. Returns on `quit` or EOF.
pub fn run(session: &mut Session) -> anyhow::Result<()> {
    let input = spawn_input();
    prompt();

    loop {
        match input.recv_timeout(TICK) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    match Command::parse(&line) {
                        Ok(cmd) => {
                            if session.handle(cmd) {
                                break;
                            }
                        }
                        Err(msg) => println!("{msg} (try `help`)"),
                    }
                }
                session.step(Instant::now());
                prompt();
                continue;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        session.step(Instant::now());
    }

    Ok(())
}
