//! Which image to show for a track, and when to move to the next one.
//!
//! `candidates` turns a metadata record into an ordered image list,
//! `rotation` steps through that list on a timer while the owning track
//! plays, and `resolve` turns a single candidate into pixels.

mod candidates;
mod resolve;
mod rotation;

pub use candidates::*;
pub use resolve::*;
pub use rotation::*;
