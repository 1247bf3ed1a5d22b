use crate::metadata::MetadataRecord;

/// What the display layer is told to show. Emitted over a channel and
/// never waited on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    /// Show `record` for `file_path`.
    Metadata {
        record: MetadataRecord,
        file_path: String,
        from_cache: bool,
    },
    Status {
        file_path: String,
        status: FetchStatus,
    },
    /// Show candidate `index` of the current image list; `None` shows the placeholder.
    Image { candidate_index: Option<usize> },
    /// Drop whatever the previous track left on screen.
    Clear,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Loading,
    NotFound,
    LookupFailed,
    SaveFailed,
}

impl FetchStatus {
    pub fn message(self) -> &'static str {
        match self {
            Self::Loading => "loading info...",
            Self::NotFound => "no info found",
            Self::LookupFailed => "error loading info",
            Self::SaveFailed => "error saving info",
        }
    }
}
