//! Remote track lookup.
//!
//! The rest of the crate only sees the [`LookupClient`] trait: give it a
//! free-text query and a [`CancelToken`], get back at most one match.
//! `itunes` holds the HTTP implementation.

mod itunes;
mod query;
mod types;

pub use itunes::ItunesClient;
pub use query::query_from_path;
pub use types::*;

#[cfg(test)]
mod tests;
