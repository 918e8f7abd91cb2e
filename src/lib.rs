//! quotebook - Local-first quote collection
//!
//! Keeps an ordered collection of quotes mirrored to durable storage,
//! filters it by category, imports and exports JSON snapshots, and
//! periodically exchanges quotes with a remote JSON endpoint.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::QuoteError;
