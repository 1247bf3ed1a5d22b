//! Application module: exposes the view model the runtime renders from.
//!
//! The `App` model lives in `app::model` and holds the track list,
//! selection, simulated playback state and whatever the display events
//! last said to show.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
