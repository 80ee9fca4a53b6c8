//! # Storage Traits
//!
//! Storage abstraction used by the record store, so the domain layer can be
//! exercised against any backend.

use anyhow::Result;
use async_trait::async_trait;

use crate::backend::domain::models::vehicle_record::VehicleRecord;

/// Persistence for the whole ordered record list
#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// Load every stored record in list order.
    /// Absent or unreadable state yields an empty list rather than an error.
    async fn load_records(&self) -> Result<Vec<VehicleRecord>>;

    /// Replace the stored list with `records`
    async fn save_records(&self, records: &[VehicleRecord]) -> Result<()>;
}
