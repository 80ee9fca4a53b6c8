//! Drives the reminder scanner against the record store and applies the
//! user's responses to surfaced alerts.

use anyhow::Result;
use chrono::{NaiveDateTime, NaiveTime};
use log::info;
use shared::AlertChannel;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::alert_scanner::{AlertScanner, ChannelState, ScanEvent};
use super::models::vehicle_record::VehicleRecord;
use super::record_service::{RecordError, RecordService};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AlertError {
    #[error("No {0:?} alert is currently shown")]
    NoActiveAlert(AlertChannel),
}

/// A record currently shown in one of the reminder modals
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveAlert {
    pub channel: AlertChannel,
    pub record: VehicleRecord,
    pub surfaced_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActiveAlerts {
    pub weekly_parts: Option<ActiveAlert>,
    pub pre_completion: Option<ActiveAlert>,
}

#[derive(Clone)]
pub struct AlertService {
    record_service: RecordService,
    scanner: Arc<Mutex<AlertScanner>>,
}

impl AlertService {
    pub fn new(record_service: RecordService) -> Self {
        Self {
            record_service,
            scanner: Arc::new(Mutex::new(AlertScanner::new())),
        }
    }

    /// One scanner tick. The snapshot is taken under the scanner lock so a
    /// tick queued behind an acknowledgement sees the stamped record.
    pub async fn scan(&self, now: NaiveDateTime) -> Vec<ScanEvent> {
        let mut scanner = self.scanner.lock().await;
        let records = self.record_service.list_records().await;
        scanner.scan(&records, now)
    }

    /// Alerts currently shown, with fresh copies of their records
    pub async fn active_alerts(&self) -> ActiveAlerts {
        let (weekly, pre_completion) = {
            let scanner = self.scanner.lock().await;
            (
                scanner.channel(AlertChannel::WeeklyParts).clone(),
                scanner.channel(AlertChannel::PreCompletion).clone(),
            )
        };

        ActiveAlerts {
            weekly_parts: self.resolve(AlertChannel::WeeklyParts, weekly).await,
            pre_completion: self.resolve(AlertChannel::PreCompletion, pre_completion).await,
        }
    }

    async fn resolve(&self, channel: AlertChannel, state: ChannelState) -> Option<ActiveAlert> {
        match state {
            ChannelState::Idle => None,
            ChannelState::Shown {
                record_id,
                surfaced_at,
            } => self
                .record_service
                .get_record(&record_id)
                .await
                .map(|record| ActiveAlert {
                    channel,
                    record,
                    surfaced_at,
                }),
        }
    }

    /// Acknowledge the weekly parts alert: stamp the record and close the channel
    pub async fn acknowledge_weekly_alert(&self, now: NaiveDateTime) -> Result<VehicleRecord> {
        let mut scanner = self.scanner.lock().await;
        let record_id = scanner
            .channel(AlertChannel::WeeklyParts)
            .record_id()
            .map(str::to_string)
            .ok_or(AlertError::NoActiveAlert(AlertChannel::WeeklyParts))?;

        let result = self.record_service.acknowledge_weekly_alert(&record_id, now).await;
        if result.is_ok() || is_not_found(&result) {
            scanner.acknowledge_weekly();
        }
        result
    }

    /// Close the pre-completion alert without changes
    pub async fn dismiss_pre_completion_alert(&self, now: NaiveDateTime) -> Option<String> {
        let mut scanner = self.scanner.lock().await;
        let record = match scanner.channel(AlertChannel::PreCompletion).record_id() {
            Some(record_id) => self.record_service.get_record(record_id).await,
            None => None,
        };

        let dismissed = scanner.dismiss_pre_completion(record.as_ref(), now);
        if let Some(record_id) = &dismissed {
            info!("Pre-completion alert for record {} dismissed", record_id);
        }
        dismissed
    }

    /// Jump-to-edit from the pre-completion alert: set the record's expected
    /// time and close the alert
    pub async fn update_expected_time_from_alert(
        &self,
        expected_end_time: Option<NaiveTime>,
    ) -> Result<VehicleRecord> {
        let mut scanner = self.scanner.lock().await;
        let record_id = scanner
            .channel(AlertChannel::PreCompletion)
            .record_id()
            .map(str::to_string)
            .ok_or(AlertError::NoActiveAlert(AlertChannel::PreCompletion))?;

        let result = self
            .record_service
            .set_expected_end_time(&record_id, expected_end_time)
            .await;
        if result.is_ok() || is_not_found(&result) {
            scanner.close_pre_completion_for_edit();
        }
        result
    }
}

/// The record behind an open modal was deleted
fn is_not_found<T>(result: &Result<T>) -> bool {
    match result {
        Err(e) => matches!(e.downcast_ref::<RecordError>(), Some(RecordError::NotFound(_))),
        Ok(_) => false,
    }
}
