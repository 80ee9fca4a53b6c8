//! Test utilities with automatic cleanup.
//!
//! The temporary data directory is removed when the [`TestEnvironment`]
//! is dropped, even if the test panics.

use anyhow::Result;
use chrono::NaiveDate;
use shared::VehicleStatus;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use super::connection::JsonConnection;
use super::record_repository::RecordRepository;
use crate::backend::domain::models::vehicle_record::VehicleRecord;
use crate::backend::domain::record_service::RecordService;

pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub connection: JsonConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = JsonConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn record_repository(&self) -> RecordRepository {
        RecordRepository::new(self.connection.clone())
    }

    /// A record service backed by this environment's directory
    pub async fn record_service(&self) -> Result<RecordService> {
        RecordService::load(Arc::new(self.record_repository())).await
    }
}

/// Record with every required field filled in
pub fn sample_record(id: &str, name: &str, car_number: &str) -> VehicleRecord {
    VehicleRecord {
        id: id.to_string(),
        name: name.to_string(),
        phone: "050-1234567".to_string(),
        car_model: "Citroen".to_string(),
        car_number: car_number.to_string(),
        service_date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
        status: VehicleStatus::InProgress,
        is_rental_car: false,
        rental_car_number: None,
        advisor_id: "advisor12".to_string(),
        expected_end_time: None,
        entry_reason: Some("Annual service".to_string()),
        notes: None,
        last_weekly_alert_ack: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_cleanup() -> Result<()> {
        let base_path;
        {
            let env = TestEnvironment::new()?;
            base_path = env.base_path.clone();
            std::fs::write(base_path.join("scratch.json"), "[]")?;
            assert!(base_path.join("scratch.json").exists());
        }
        assert!(!base_path.exists());
        Ok(())
    }
}
