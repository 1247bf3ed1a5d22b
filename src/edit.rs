//! User edits to a track's metadata: custom title and image list.

mod editor;

pub use editor::*;

#[cfg(test)]
mod tests;
