//! Durable metadata records keyed by audio file path.
//!
//! `model` defines the record itself; `store` owns the in-memory map and
//! its JSON backing file.

mod model;
mod store;

pub use model::*;
pub use store::*;
