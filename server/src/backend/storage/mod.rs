//! # Storage Module
//!
//! Handles persistence of the record list.
//!
//! The domain layer only sees the [`RecordStorage`] trait. The shipped
//! implementation is a file-backed key-value store: each key is one JSON
//! document under the data directory, read once at startup and overwritten
//! wholesale on every change.

pub mod json;
pub mod traits;

pub use json::{JsonConnection, RecordRepository, RECORDS_KEY};
pub use traits::RecordStorage;
