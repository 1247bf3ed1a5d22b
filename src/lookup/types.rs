use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Fields returned by a successful remote match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackInfo {
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub album_name: Option<String>,
    pub artwork_url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The caller gave up on this lookup; never shown to the user.
    #[error("lookup cancelled")]
    Cancelled,
    #[error("lookup request failed: {0}")]
    Transport(String),
    #[error("lookup service answered with status {0}")]
    Status(u16),
    #[error("unreadable lookup response: {0}")]
    Decode(String),
}

/// Cooperative cancellation flag shared between a session and its worker.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// `Err(Cancelled)` once [`cancel`](Self::cancel) has been called.
    pub fn check(&self) -> Result<(), LookupError> {
        if self.is_cancelled() {
            Err(LookupError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// A remote service that maps a free-text query to its single best match.
///
/// Implementations are expected to poll `cancel` around their blocking
/// steps and bail out with [`LookupError::Cancelled`].
pub trait LookupClient: Send + Sync {
    fn search_one(&self, query: &str, cancel: &CancelToken) -> Result<Option<TrackInfo>, LookupError>;
}

/// Used when remote lookups are switched off: nothing ever matches.
#[derive(Debug, Default)]
pub struct DisabledClient;

impl LookupClient for DisabledClient {
    fn search_one(&self, _query: &str, cancel: &CancelToken) -> Result<Option<TrackInfo>, LookupError> {
        cancel.check()?;
        Ok(None)
    }
}
