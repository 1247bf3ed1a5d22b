use std::time::{Duration, Instant};

use crate::fetch::DisplayEvent;
use crate::metadata::MetadataRecord;

use super::candidates::{ImageRef, build_candidates};

/// Derived image list plus the index currently on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayImageState {
    pub candidates: Vec<ImageRef>,
    pub current_index: usize,
}

impl DisplayImageState {
    pub fn current(&self) -> Option<&ImageRef> {
        self.candidates.get(self.current_index)
    }
}

/// Rotates through a record's images on a fixed interval.
///
/// The timer only runs while there are at least two candidates and the
/// track that owns them is playing. Time is passed in by the caller so the
/// owner's event loop decides when to [`tick`](Self::tick).
#[derive(Debug)]
pub struct ImageRotator {
    interval: Duration,
    state: DisplayImageState,
    owner: Option<String>,
    playing: Option<String>,
    next_due: Option<Instant>,
}

fn same_path(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl ImageRotator {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: DisplayImageState::default(),
            owner: None,
            playing: None,
            next_due: None,
        }
    }

    pub fn state(&self) -> &DisplayImageState {
        &self.state
    }

    pub fn current(&self) -> Option<&ImageRef> {
        self.state.current()
    }

    pub fn is_rotating(&self) -> bool {
        self.next_due.is_some()
    }

    /// Rebuild candidates for `record` (or none) and show the first one.
    pub fn rebuild(&mut self, record: Option<&MetadataRecord>, now: Instant) -> DisplayEvent {
        self.state = DisplayImageState {
            candidates: build_candidates(record),
            current_index: 0,
        };
        self.owner = record.map(|r| r.file_path.clone());
        self.next_due = None;
        self.reschedule(now);
        self.display_event()
    }

    /// Tell the rotator which file is playing right now, if any.
    ///
    /// Pausing or stopping passes `None`.
    pub fn set_playback(&mut self, playing: Option<&str>, now: Instant) {
        self.playing = playing.map(str::to_string);
        self.reschedule(now);
    }

    /// Advance to the next candidate if the interval has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<DisplayEvent> {
        let due = self.next_due?;
        if now < due {
            return None;
        }

        let len = self.state.candidates.len();
        self.state.current_index = (self.state.current_index + 1) % len;
        self.next_due = Some(now + self.interval);
        Some(self.display_event())
    }

    fn should_rotate(&self) -> bool {
        self.state.candidates.len() > 1
            && matches!(
                (&self.owner, &self.playing),
                (Some(owner), Some(playing)) if same_path(owner, playing)
            )
    }

    fn reschedule(&mut self, now: Instant) {
        if !self.should_rotate() {
            self.next_due = None;
        } else if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }

    fn display_event(&self) -> DisplayEvent {
        DisplayEvent::Image {
            candidate_index: (!self.state.candidates.is_empty()).then_some(self.state.current_index),
        }
    }
}
