//! Record store: the ordered list of vehicle intakes.
//!
//! The list is loaded once at startup and kept in memory. Every mutation
//! works on a copy of the list, persists the copy, and only then swaps it in,
//! so readers never observe a half-applied change and a failed write leaves
//! the in-memory list untouched.

use anyhow::Result;
use chrono::{NaiveDateTime, NaiveTime, Utc};
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::commands::records::{
    CreateRecordCommand, DeleteRecordCommand, QuickUpdateCommand, UpdateRecordCommand,
};
use super::models::vehicle_record::VehicleRecord;
use crate::backend::storage::RecordStorage;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Deleting record {0} requires confirmation")]
    ConfirmationRequired(String),
}

/// Case-insensitive substring match against customer name and plate number.
/// An empty term matches everything.
pub fn matches_search(record: &VehicleRecord, term: &str) -> bool {
    let term = term.to_lowercase();
    record.name.to_lowercase().contains(&term) || record.car_number.to_lowercase().contains(&term)
}

#[derive(Clone)]
pub struct RecordService {
    storage: Arc<dyn RecordStorage>,
    records: Arc<RwLock<Vec<VehicleRecord>>>,
}

impl RecordService {
    /// Read the persisted list once and build the store around it
    pub async fn load(storage: Arc<dyn RecordStorage>) -> Result<Self> {
        let records = storage.load_records().await?;
        info!("Record store initialized with {} records", records.len());
        Ok(Self {
            storage,
            records: Arc::new(RwLock::new(records)),
        })
    }

    /// Apply `change` to a copy of the list, persist it, then publish it
    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut Vec<VehicleRecord>) -> Result<T> + Send,
    ) -> Result<T> {
        let mut guard = self.records.write().await;
        let mut next = guard.clone();
        let output = change(&mut next)?;
        self.storage.save_records(&next).await?;
        *guard = next;
        Ok(output)
    }

    /// Snapshot of every record in list order
    pub async fn list_records(&self) -> Vec<VehicleRecord> {
        self.records.read().await.clone()
    }

    pub async fn get_record(&self, record_id: &str) -> Option<VehicleRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
    }

    /// Records whose name or plate contains `term`; the store is not modified
    pub async fn search_records(&self, term: &str) -> Vec<VehicleRecord> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| matches_search(r, term))
            .cloned()
            .collect()
    }

    /// Append a new intake with a timestamp id and the submitting advisor
    pub async fn create_record(&self, command: CreateRecordCommand) -> Result<VehicleRecord> {
        let fields = command.fields.normalized();
        info!(
            "Creating record: name={}, plate={}, advisor={}",
            fields.name, fields.car_number, command.advisor_id
        );

        let created = self
            .mutate(|records| {
                let mut millis = Utc::now().timestamp_millis();
                while records.iter().any(|r| r.id == VehicleRecord::generate_id(millis)) {
                    millis += 1;
                }

                let record = VehicleRecord {
                    id: VehicleRecord::generate_id(millis),
                    name: fields.name,
                    phone: fields.phone,
                    car_model: fields.car_model,
                    car_number: fields.car_number,
                    service_date: fields.service_date,
                    status: fields.status,
                    is_rental_car: fields.is_rental_car,
                    rental_car_number: fields.rental_car_number,
                    advisor_id: command.advisor_id,
                    expected_end_time: fields.expected_end_time,
                    entry_reason: fields.entry_reason,
                    notes: fields.notes,
                    last_weekly_alert_ack: None,
                };
                records.push(record.clone());
                Ok(record)
            })
            .await?;

        info!("Created record {}", created.id);
        Ok(created)
    }

    /// Overwrite every submitted field. Id, advisor and the weekly
    /// acknowledgement are kept from the stored record.
    pub async fn update_record(&self, command: UpdateRecordCommand) -> Result<VehicleRecord> {
        info!("Updating record {}", command.record_id);
        let fields = command.fields.normalized();
        let record_id = command.record_id;

        self.mutate(|records| {
            let record = find_mut(records, &record_id)?;
            record.name = fields.name;
            record.phone = fields.phone;
            record.car_model = fields.car_model;
            record.car_number = fields.car_number;
            record.service_date = fields.service_date;
            record.status = fields.status;
            record.is_rental_car = fields.is_rental_car;
            record.rental_car_number = fields.rental_car_number;
            record.expected_end_time = fields.expected_end_time;
            record.entry_reason = fields.entry_reason;
            record.notes = fields.notes;
            Ok(record.clone())
        })
        .await
    }

    /// Inline status and/or service date change from the alert dialog
    pub async fn quick_update(&self, command: QuickUpdateCommand) -> Result<VehicleRecord> {
        info!(
            "Quick update for record {}: status={:?}, service_date={:?}",
            command.record_id, command.status, command.service_date
        );

        self.mutate(|records| {
            let record = find_mut(records, &command.record_id)?;
            if let Some(status) = command.status {
                record.status = status;
            }
            if let Some(service_date) = command.service_date {
                record.service_date = service_date;
            }
            Ok(record.clone())
        })
        .await
    }

    /// Change only the expected completion time
    pub async fn set_expected_end_time(
        &self,
        record_id: &str,
        expected_end_time: Option<NaiveTime>,
    ) -> Result<VehicleRecord> {
        info!("Setting expected time of record {} to {:?}", record_id, expected_end_time);

        self.mutate(|records| {
            let record = find_mut(records, record_id)?;
            record.expected_end_time = expected_end_time;
            Ok(record.clone())
        })
        .await
    }

    /// Stamp the weekly-parts acknowledgement time
    pub async fn acknowledge_weekly_alert(
        &self,
        record_id: &str,
        now: NaiveDateTime,
    ) -> Result<VehicleRecord> {
        info!("Acknowledging weekly parts alert for record {} at {}", record_id, now);

        self.mutate(|records| {
            let record = find_mut(records, record_id)?;
            record.last_weekly_alert_ack = Some(now);
            Ok(record.clone())
        })
        .await
    }

    /// Remove exactly one record, once the delete has been confirmed
    pub async fn delete_record(&self, command: DeleteRecordCommand) -> Result<VehicleRecord> {
        if !command.confirmed {
            warn!("Refusing unconfirmed delete of record {}", command.record_id);
            return Err(RecordError::ConfirmationRequired(command.record_id).into());
        }

        let removed = self
            .mutate(|records| {
                let index = records
                    .iter()
                    .position(|r| r.id == command.record_id)
                    .ok_or_else(|| RecordError::NotFound(command.record_id.clone()))?;
                Ok(records.remove(index))
            })
            .await?;

        info!("Deleted record {} ({})", removed.id, removed.car_number);
        Ok(removed)
    }
}

fn find_mut<'a>(records: &'a mut [VehicleRecord], record_id: &str) -> Result<&'a mut VehicleRecord> {
    records
        .iter_mut()
        .find(|r| r.id == record_id)
        .ok_or_else(|| RecordError::NotFound(record_id.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::commands::records::RecordFields;
    use crate::backend::domain::forms::intake_defaults;
    use crate::backend::storage::json::test_utils::{sample_record, TestEnvironment};
    use crate::backend::storage::RECORDS_KEY;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use shared::VehicleStatus;

    fn fields(name: &str, plate: &str) -> RecordFields {
        let mut fields = intake_defaults(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        fields.name = name.to_string();
        fields.car_number = plate.to_string();
        fields
    }

    async fn create(service: &RecordService, name: &str, plate: &str) -> VehicleRecord {
        service
            .create_record(CreateRecordCommand {
                advisor_id: "advisor34".to_string(),
                fields: fields(name, plate),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_appends_with_unique_ids_and_advisor() {
        let env = TestEnvironment::new().unwrap();
        let service = env.record_service().await.unwrap();

        let a = create(&service, "Dana", "11-111-11").await;
        let b = create(&service, "Avi", "22-222-22").await;
        let c = create(&service, "Noa", "33-333-33").await;

        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_eq!(a.advisor_id, "advisor34");
        assert!(a.id.parse::<i64>().is_ok());

        let names: Vec<_> = service.list_records().await.into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Dana", "Avi", "Noa"]);
    }

    #[tokio::test]
    async fn test_changes_survive_reload() {
        let env = TestEnvironment::new().unwrap();
        let service = env.record_service().await.unwrap();
        let created = create(&service, "Dana", "11-111-11").await;

        let reloaded = env.record_service().await.unwrap();
        assert_eq!(reloaded.list_records().await, vec![created]);
    }

    #[tokio::test]
    async fn test_update_preserves_id_advisor_and_ack() {
        let env = TestEnvironment::new().unwrap();
        let service = env.record_service().await.unwrap();
        let created = create(&service, "Dana", "11-111-11").await;
        let ack = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap().and_hms_opt(9, 0, 0).unwrap();
        service.acknowledge_weekly_alert(&created.id, ack).await.unwrap();

        let mut edited = fields("Dana Levi", "99-999-99");
        edited.status = VehicleStatus::Ready;
        edited.notes = Some("Called customer".to_string());
        let updated = service
            .update_record(UpdateRecordCommand {
                record_id: created.id.clone(),
                fields: edited,
            })
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.advisor_id, created.advisor_id);
        assert_eq!(updated.last_weekly_alert_ack, Some(ack));
        assert_eq!(updated.name, "Dana Levi");
        assert_eq!(updated.car_number, "99-999-99");
        assert_eq!(updated.status, VehicleStatus::Ready);
        assert_eq!(updated.notes.as_deref(), Some("Called customer"));
    }

    #[tokio::test]
    async fn test_update_unknown_record_is_not_found() {
        let env = TestEnvironment::new().unwrap();
        let service = env.record_service().await.unwrap();

        let err = service
            .update_record(UpdateRecordCommand {
                record_id: "missing".to_string(),
                fields: fields("x", "y"),
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<RecordError>(),
            Some(&RecordError::NotFound("missing".to_string()))
        );
    }

    #[tokio::test]
    async fn test_quick_update_changes_only_given_fields() {
        let env = TestEnvironment::new().unwrap();
        let service = env.record_service().await.unwrap();
        let created = create(&service, "Dana", "11-111-11").await;

        let updated = service
            .quick_update(QuickUpdateCommand {
                record_id: created.id.clone(),
                status: Some(VehicleStatus::WaitingForParts),
                service_date: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.status, VehicleStatus::WaitingForParts);
        assert_eq!(updated.service_date, created.service_date);
        assert_eq!(updated.name, created.name);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation_and_removes_exactly_one() {
        let env = TestEnvironment::new().unwrap();
        let service = env.record_service().await.unwrap();
        let a = create(&service, "Dana", "11-111-11").await;
        let b = create(&service, "Avi", "22-222-22").await;
        let c = create(&service, "Noa", "33-333-33").await;

        let err = service
            .delete_record(DeleteRecordCommand {
                record_id: b.id.clone(),
                confirmed: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RecordError>(),
            Some(RecordError::ConfirmationRequired(_))
        ));
        assert_eq!(service.list_records().await.len(), 3);

        service
            .delete_record(DeleteRecordCommand {
                record_id: b.id.clone(),
                confirmed: true,
            })
            .await
            .unwrap();

        assert_eq!(service.list_records().await, vec![a.clone(), c.clone()]);
        let persisted = env.record_service().await.unwrap().list_records().await;
        assert_eq!(persisted, vec![a, c]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_non_destructive() {
        let env = TestEnvironment::new().unwrap();
        let service = env.record_service().await.unwrap();
        create(&service, "Dana Cohen", "11-ABC-11").await;
        create(&service, "Avi", "22-xyz-22").await;

        let by_name = service.search_records("cOhEn").await;
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Dana Cohen");

        let by_plate = service.search_records("XYZ").await;
        assert_eq!(by_plate.len(), 1);
        assert_eq!(by_plate[0].name, "Avi");

        assert_eq!(service.search_records("").await.len(), 2);
        assert!(service.search_records("nobody").await.is_empty());
        assert_eq!(service.list_records().await.len(), 2);
    }

    struct FailingStorage;

    #[async_trait]
    impl RecordStorage for FailingStorage {
        async fn load_records(&self) -> Result<Vec<VehicleRecord>> {
            Ok(vec![sample_record("1", "Dana", "11-111-11")])
        }

        async fn save_records(&self, _records: &[VehicleRecord]) -> Result<()> {
            Err(anyhow::anyhow!("disk full"))
        }
    }

    #[tokio::test]
    async fn test_failed_write_leaves_memory_unchanged() {
        let service = RecordService::load(Arc::new(FailingStorage)).await.unwrap();

        let result = service
            .delete_record(DeleteRecordCommand {
                record_id: "1".to_string(),
                confirmed: true,
            })
            .await;

        assert!(result.is_err());
        assert_eq!(service.list_records().await.len(), 1);
    }

    #[tokio::test]
    async fn test_rental_plate_cleared_when_flag_off() {
        let env = TestEnvironment::new().unwrap();
        let service = env.record_service().await.unwrap();

        let mut submitted = fields("Dana", "11-111-11");
        submitted.rental_car_number = Some("77-777-77".to_string());
        let created = service
            .create_record(CreateRecordCommand {
                advisor_id: "manager".to_string(),
                fields: submitted,
            })
            .await
            .unwrap();

        assert_eq!(created.rental_car_number, None);
        assert!(env.connection.key_path(RECORDS_KEY).exists());
    }
}
