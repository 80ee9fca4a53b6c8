use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use shared::VehicleRecord as SharedRecord;

use super::connection::JsonConnection;
use crate::backend::domain::models::vehicle_record::VehicleRecord as DomainRecord;
use crate::backend::io::rest::mappers::record_mapper::RecordMapper;
use crate::backend::storage::traits::RecordStorage;

/// Key the record array is stored under
pub const RECORDS_KEY: &str = "vehicle_records";

/// Record repository storing the whole list as one JSON array
#[derive(Clone)]
pub struct RecordRepository {
    connection: JsonConnection,
}

impl RecordRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// Parse the stored array, skipping entries that do not form a valid
    /// record. Returns the records and how many entries were skipped.
    fn decode_records(&self, bytes: &[u8]) -> Option<(Vec<DomainRecord>, usize)> {
        let entries: Vec<serde_json::Value> = match serde_json::from_slice(bytes) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Stored records are not a JSON array ({}), starting with no records", e);
                return None;
            }
        };

        let mut records = Vec::with_capacity(entries.len());
        let mut skipped = 0;
        for (index, entry) in entries.into_iter().enumerate() {
            let mapped = serde_json::from_value::<SharedRecord>(entry)
                .context("Invalid record shape")
                .and_then(RecordMapper::to_domain);

            match mapped {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Skipping stored record at index {}: {:#}", index, e);
                    skipped += 1;
                }
            }
        }

        Some((records, skipped))
    }

    fn backup_store(&self, reason: &str) {
        match self.connection.backup_key(RECORDS_KEY) {
            Ok(path) => warn!("{} record store copied to {}", reason, path.display()),
            Err(e) => warn!("Could not back up {} record store: {:#}", reason.to_lowercase(), e),
        }
    }
}

#[async_trait]
impl RecordStorage for RecordRepository {
    async fn load_records(&self) -> Result<Vec<DomainRecord>> {
        let bytes = match self.connection.read_key(RECORDS_KEY)? {
            Some(bytes) => bytes,
            None => {
                info!("No stored records found, starting empty");
                return Ok(Vec::new());
            }
        };

        match self.decode_records(&bytes) {
            Some((records, skipped)) => {
                if skipped > 0 {
                    // The next save would drop the skipped entries for good
                    self.backup_store("Partially unreadable");
                }
                info!("Loaded {} records", records.len());
                Ok(records)
            }
            None => {
                self.backup_store("Unreadable");
                Ok(Vec::new())
            }
        }
    }

    async fn save_records(&self, records: &[DomainRecord]) -> Result<()> {
        let dtos: Vec<SharedRecord> = records.iter().cloned().map(RecordMapper::to_dto).collect();
        let json = serde_json::to_string_pretty(&dtos)?;
        self.connection.write_key(RECORDS_KEY, &json)?;
        debug!("Persisted {} records", records.len());
        Ok(())
    }
}
