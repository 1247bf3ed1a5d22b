//! Cache-or-fetch orchestration for the active track.
//!
//! Activating a track either answers straight from the metadata store or
//! starts a remote lookup. Only the newest lookup may ever write to the
//! store or reach the display; older ones are cancelled and their results
//! dropped when they arrive.

mod events;
mod orchestrator;

pub use events::*;
pub use orchestrator::*;
