use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crate::library::Track;
use crate::lookup::{CancelToken, LookupClient, LookupError, TrackInfo, query_from_path};
use crate::metadata::{MetadataRecord, SharedStore};

use super::events::{DisplayEvent, FetchStatus};

/// Where the orchestrator is in handling the latest activation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Resolving,
    CacheHit,
    Fetching,
    Settled,
}

/// Result of [`FetchOrchestrator::activate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Activation {
    CacheHit,
    Fetching { session: u64, query: String },
    /// Nothing to search for (blank path or empty derived query).
    NotSearchable,
    /// The lookup could not be started; a failure status was shown.
    Failed,
}

/// The one lookup that is allowed to apply its result.
#[derive(Debug)]
struct LookupSession {
    id: u64,
    file_path: String,
    cancel: CancelToken,
}

/// Message sent by a lookup worker when its call returns.
#[derive(Debug)]
pub struct LookupOutcome {
    pub session: u64,
    pub file_path: String,
    pub result: Result<Option<TrackInfo>, LookupError>,
}

/// Single-flight coordinator between the metadata store, the remote
/// lookup client and the display.
///
/// Lookups run on worker threads but never touch shared state themselves:
/// they report a [`LookupOutcome`] and the owner of the orchestrator
/// applies it with [`pump`](Self::pump) or
/// [`wait_for_outcome`](Self::wait_for_outcome). Each application compares
/// the outcome's session id with the current one right before every store
/// write and every emitted event.
pub struct FetchOrchestrator {
    store: SharedStore,
    client: Arc<dyn LookupClient>,
    events: Sender<DisplayEvent>,
    outcome_tx: Sender<LookupOutcome>,
    outcome_rx: Receiver<LookupOutcome>,
    next_session: u64,
    session: Option<LookupSession>,
    state: FetchState,
}

impl FetchOrchestrator {
    pub fn new(store: SharedStore, client: Arc<dyn LookupClient>, events: Sender<DisplayEvent>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel();
        Self {
            store,
            client,
            events,
            outcome_tx,
            outcome_rx,
            next_session: 0,
            session: None,
            state: FetchState::Idle,
        }
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    /// Id of the lookup still allowed to apply, if any.
    pub fn current_session(&self) -> Option<u64> {
        self.session.as_ref().map(|s| s.id)
    }

    /// Handle `track` becoming the active track.
    pub fn activate(&mut self, track: &Track) -> Activation {
        self.cancel_current();
        self.state = FetchState::Resolving;

        let file_path = track.file_path();
        if file_path.trim().is_empty() {
            self.state = FetchState::Settled;
            return Activation::NotSearchable;
        }

        if let Some(record) = self.cached(&file_path) {
            self.state = FetchState::CacheHit;
            tracing::debug!(path = %file_path, "metadata cache hit");
            self.emit(DisplayEvent::Metadata {
                record,
                file_path,
                from_cache: true,
            });
            self.state = FetchState::Settled;
            return Activation::CacheHit;
        }

        self.emit(DisplayEvent::Clear);

        let query = query_from_path(&file_path);
        if query.is_empty() {
            self.emit(DisplayEvent::Status {
                file_path,
                status: FetchStatus::NotFound,
            });
            self.state = FetchState::Settled;
            return Activation::NotSearchable;
        }

        self.state = FetchState::Fetching;
        self.emit(DisplayEvent::Status {
            file_path: file_path.clone(),
            status: FetchStatus::Loading,
        });

        self.next_session += 1;
        let session = LookupSession {
            id: self.next_session,
            file_path: file_path.clone(),
            cancel: CancelToken::new(),
        };
        let id = session.id;

        let client = Arc::clone(&self.client);
        let tx = self.outcome_tx.clone();
        let cancel = session.cancel.clone();
        let worker_query = query.clone();
        let worker_path = file_path.clone();
        self.session = Some(session);

        let spawned = thread::Builder::new()
            .name(format!("lookup-{id}"))
            .spawn(move || {
                let result = match cancel.check() {
                    Ok(()) => client.search_one(&worker_query, &cancel),
                    Err(e) => Err(e),
                };
                let _ = tx.send(LookupOutcome {
                    session: id,
                    file_path: worker_path,
                    result,
                });
            });

        if let Err(e) = spawned {
            return self.worker_failed(file_path, e);
        }

        tracing::debug!(session = id, path = %file_path, query = %query, "lookup started");
        Activation::Fetching { session: id, query }
    }

    /// Drop the session whose worker never started and report the failure.
    pub(super) fn worker_failed(&mut self, file_path: String, err: io::Error) -> Activation {
        tracing::warn!(path = %file_path, "failed to start lookup worker: {err}");
        self.session = None;
        self.emit(DisplayEvent::Status {
            file_path,
            status: FetchStatus::LookupFailed,
        });
        self.state = FetchState::Settled;
        Activation::Failed
    }

    /// Apply every outcome that has already arrived. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            if self.apply(outcome) {
                applied += 1;
            }
        }
        applied
    }

    /// Block up to `timeout` for the next outcome and apply it.
    ///
    /// Returns `Some(applied)` when an outcome arrived, `None` on timeout.
    pub fn wait_for_outcome(&mut self, timeout: Duration) -> Option<bool> {
        match self.outcome_rx.recv_timeout(timeout) {
            Ok(outcome) => Some(self.apply(outcome)),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Re-emit the stored record for `file_path`, e.g. after an edit.
    pub fn redisplay(&self, file_path: &str) -> bool {
        match self.cached(file_path) {
            Some(record) => {
                self.emit(DisplayEvent::Metadata {
                    file_path: record.file_path.clone(),
                    record,
                    from_cache: true,
                });
                true
            }
            None => false,
        }
    }

    /// Apply one lookup outcome. Returns false when it was discarded or
    /// the client gave up without an answer.
    pub fn apply(&mut self, outcome: LookupOutcome) -> bool {
        if !self.is_current(outcome.session) {
            tracing::debug!(
                session = outcome.session,
                path = %outcome.file_path,
                "discarding superseded lookup result"
            );
            return false;
        }

        let LookupOutcome {
            session,
            file_path,
            result,
        } = outcome;

        let applied = match result {
            Ok(Some(info)) => {
                self.apply_match(session, file_path, info);
                true
            }
            Ok(None) => {
                tracing::debug!(path = %file_path, "no remote match");
                self.emit_status(session, file_path, FetchStatus::NotFound);
                true
            }
            Err(LookupError::Cancelled) => false,
            Err(e) => {
                tracing::warn!(path = %file_path, "metadata lookup failed: {e}");
                self.emit_status(session, file_path, FetchStatus::LookupFailed);
                true
            }
        };

        if self.is_current(session) {
            self.session = None;
            self.state = FetchState::Settled;
        }
        applied
    }

    fn apply_match(&mut self, session: u64, file_path: String, info: TrackInfo) {
        let mut record = MetadataRecord::from_lookup(file_path.clone(), info);

        let mut saved = true;
        if self.is_current(session) {
            match self.store.lock() {
                Ok(mut store) => {
                    // Keep what the user entered while the lookup was running.
                    if let Some(existing) = store.get(&file_path) {
                        record.custom_title = existing.custom_title.clone();
                        record.image_paths = existing.image_paths.clone();
                    }
                    if let Err(e) = store.upsert(record.clone()) {
                        tracing::warn!(path = %file_path, "failed to save fetched metadata: {e}");
                        saved = false;
                    }
                }
                Err(_) => {
                    tracing::warn!(path = %file_path, "metadata store lock poisoned; not saving");
                    saved = false;
                }
            }
        }

        if !saved {
            self.emit_status(session, file_path.clone(), FetchStatus::SaveFailed);
        }

        if self.is_current(session) {
            self.emit(DisplayEvent::Metadata {
                record,
                file_path,
                from_cache: false,
            });
        }
    }

    fn emit_status(&self, session: u64, file_path: String, status: FetchStatus) {
        if self.is_current(session) {
            self.emit(DisplayEvent::Status { file_path, status });
        }
    }

    fn is_current(&self, session: u64) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.id == session && !s.cancel.is_cancelled())
    }

    fn cancel_current(&mut self) {
        if let Some(prev) = self.session.take() {
            prev.cancel.cancel();
            tracing::debug!(session = prev.id, path = %prev.file_path, "lookup superseded");
        }
    }

    fn cached(&self, file_path: &str) -> Option<MetadataRecord> {
        match self.store.lock() {
            Ok(store) => store.get(file_path).cloned(),
            Err(_) => {
                tracing::warn!("metadata store lock poisoned; treating as a miss");
                None
            }
        }
    }

    fn emit(&self, event: DisplayEvent) {
        // Nobody listening is fine; display is best effort.
        let _ = self.events.send(event);
    }
}

impl Drop for FetchOrchestrator {
    fn drop(&mut self) {
        self.cancel_current();
    }
}
