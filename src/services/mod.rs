//! Typed access to the remote BONGO endpoints.

pub mod bongo_api;

pub use bongo_api::BongoClient;
