//! Track library: the ordered list of audio files the user has added.
//!
//! The library is a collaborator of the metadata cache rather than part of
//! it: it hands out [`Track`] values and persists them as a plain JSON list.

mod file;
mod model;
mod scan;

pub use file::Library;
pub use model::Track;
pub use scan::scan;

#[cfg(test)]
mod tests;
