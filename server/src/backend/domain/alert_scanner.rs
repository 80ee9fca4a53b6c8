//! Two-channel reminder state machine.
//!
//! The scanner is ticked on a fixed cadence with the current record list and
//! the local time. Each channel holds at most one surfaced record; a new one
//! can only surface after the current one has been closed.
//!
//! - **Weekly parts**: records waiting for parts for a week or more that were
//!   not acknowledged in the last week. Closing it is an acknowledgement that
//!   the caller persists on the record.
//! - **Pre-completion**: records whose expected completion time of day falls
//!   in the reminder window. Closing it is a dismissal that lives only in
//!   memory, keyed by record, date and expected time.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::{debug, info};
use shared::AlertChannel;

use super::alert_evaluator::{is_within_pre_completion_window, qualifies_for_weekly_parts_alert};
use super::models::vehicle_record::VehicleRecord;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChannelState {
    #[default]
    Idle,
    Shown {
        record_id: String,
        surfaced_at: NaiveDateTime,
    },
}

impl ChannelState {
    pub fn record_id(&self) -> Option<&str> {
        match self {
            ChannelState::Idle => None,
            ChannelState::Shown { record_id, .. } => Some(record_id),
        }
    }
}

/// What changed during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    Surfaced {
        channel: AlertChannel,
        record_id: String,
    },
    /// The shown record no longer exists
    Cleared {
        channel: AlertChannel,
        record_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DismissedReminder {
    record_id: String,
    date: NaiveDate,
    expected_time: NaiveTime,
}

#[derive(Debug, Default)]
pub struct AlertScanner {
    weekly_parts: ChannelState,
    pre_completion: ChannelState,
    dismissed: HashSet<DismissedReminder>,
}

impl AlertScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel(&self, channel: AlertChannel) -> &ChannelState {
        match channel {
            AlertChannel::WeeklyParts => &self.weekly_parts,
            AlertChannel::PreCompletion => &self.pre_completion,
        }
    }

    fn channel_mut(&mut self, channel: AlertChannel) -> &mut ChannelState {
        match channel {
            AlertChannel::WeeklyParts => &mut self.weekly_parts,
            AlertChannel::PreCompletion => &mut self.pre_completion,
        }
    }

    /// Re-evaluates both channels against `records` in list order.
    pub fn scan(&mut self, records: &[VehicleRecord], now: NaiveDateTime) -> Vec<ScanEvent> {
        let today = now.date();
        self.dismissed.retain(|d| d.date == today);

        let mut events = Vec::new();
        for channel in [AlertChannel::WeeklyParts, AlertChannel::PreCompletion] {
            if let Some(event) = self.clear_if_missing(channel, records) {
                events.push(event);
            }
        }

        if self.weekly_parts == ChannelState::Idle {
            if let Some(record) = records
                .iter()
                .find(|r| qualifies_for_weekly_parts_alert(r, now))
            {
                info!("Weekly parts alert raised for record {} ({})", record.id, record.car_number);
                self.weekly_parts = ChannelState::Shown {
                    record_id: record.id.clone(),
                    surfaced_at: now,
                };
                events.push(ScanEvent::Surfaced {
                    channel: AlertChannel::WeeklyParts,
                    record_id: record.id.clone(),
                });
            }
        }

        if self.pre_completion == ChannelState::Idle {
            if let Some(record) = records
                .iter()
                .find(|r| is_within_pre_completion_window(r, now) && !self.is_dismissed(r, today))
            {
                info!("Pre-completion alert raised for record {} ({})", record.id, record.car_number);
                self.pre_completion = ChannelState::Shown {
                    record_id: record.id.clone(),
                    surfaced_at: now,
                };
                events.push(ScanEvent::Surfaced {
                    channel: AlertChannel::PreCompletion,
                    record_id: record.id.clone(),
                });
            }
        }

        debug!("Alert scan over {} records produced {} events", records.len(), events.len());
        events
    }

    fn clear_if_missing(&mut self, channel: AlertChannel, records: &[VehicleRecord]) -> Option<ScanEvent> {
        let state = self.channel_mut(channel);
        let record_id = state.record_id()?.to_string();
        if records.iter().any(|r| r.id == record_id) {
            return None;
        }

        info!("Clearing {:?} alert for deleted record {}", channel, record_id);
        *state = ChannelState::Idle;
        Some(ScanEvent::Cleared { channel, record_id })
    }

    fn is_dismissed(&self, record: &VehicleRecord, today: NaiveDate) -> bool {
        match record.expected_end_time {
            Some(expected_time) => self.dismissed.contains(&DismissedReminder {
                record_id: record.id.clone(),
                date: today,
                expected_time,
            }),
            None => false,
        }
    }

    /// Closes the weekly channel. Returns the record whose acknowledgement
    /// timestamp the caller must stamp.
    pub fn acknowledge_weekly(&mut self) -> Option<String> {
        match std::mem::take(&mut self.weekly_parts) {
            ChannelState::Shown { record_id, .. } => Some(record_id),
            ChannelState::Idle => None,
        }
    }

    /// Closes the pre-completion channel and remembers the dismissal for the
    /// record's current expected time on today's date.
    pub fn dismiss_pre_completion(&mut self, record: Option<&VehicleRecord>, now: NaiveDateTime) -> Option<String> {
        let record_id = match std::mem::take(&mut self.pre_completion) {
            ChannelState::Shown { record_id, .. } => record_id,
            ChannelState::Idle => return None,
        };

        if let Some(expected_time) = record
            .filter(|r| r.id == record_id)
            .and_then(|r| r.expected_end_time)
        {
            self.dismissed.insert(DismissedReminder {
                record_id: record_id.clone(),
                date: now.date(),
                expected_time,
            });
        }

        Some(record_id)
    }

    /// Closes the pre-completion channel because the user went to edit the
    /// record's time. No dismissal is remembered; a new time that still falls
    /// in the window surfaces again.
    pub fn close_pre_completion_for_edit(&mut self) -> Option<String> {
        match std::mem::take(&mut self.pre_completion) {
            ChannelState::Shown { record_id, .. } => Some(record_id),
            ChannelState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::alert_evaluator::tests::{at, record};
    use chrono::Duration;
    use shared::VehicleStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn surfaced(channel: AlertChannel, id: &str) -> ScanEvent {
        ScanEvent::Surfaced {
            channel,
            record_id: id.to_string(),
        }
    }

    #[test]
    fn test_weekly_surfaces_first_match_in_list_order() {
        let mut scanner = AlertScanner::new();
        let records = vec![
            record("a", date(2024, 6, 9), VehicleStatus::WaitingForParts),
            record("b", date(2024, 6, 1), VehicleStatus::WaitingForParts),
            record("c", date(2024, 5, 20), VehicleStatus::WaitingForParts),
        ];

        let events = scanner.scan(&records, at(2024, 6, 10, 9, 0));
        assert_eq!(events, vec![surfaced(AlertChannel::WeeklyParts, "b")]);
        assert_eq!(scanner.channel(AlertChannel::WeeklyParts).record_id(), Some("b"));
    }

    #[test]
    fn test_weekly_does_not_rearm_while_shown() {
        let mut scanner = AlertScanner::new();
        let records = vec![
            record("b", date(2024, 6, 1), VehicleStatus::WaitingForParts),
            record("c", date(2024, 5, 20), VehicleStatus::WaitingForParts),
        ];

        scanner.scan(&records, at(2024, 6, 10, 9, 0));
        let events = scanner.scan(&records, at(2024, 6, 10, 9, 1));
        assert!(events.is_empty());
        assert_eq!(scanner.channel(AlertChannel::WeeklyParts).record_id(), Some("b"));
    }

    #[test]
    fn test_weekly_acknowledge_then_rescan_cycle() {
        let mut scanner = AlertScanner::new();
        let now = at(2024, 6, 10, 9, 0);
        let mut records = vec![record("r", date(2024, 5, 31), VehicleStatus::WaitingForParts)];

        assert_eq!(scanner.scan(&records, now), vec![surfaced(AlertChannel::WeeklyParts, "r")]);

        let acked = scanner.acknowledge_weekly();
        assert_eq!(acked.as_deref(), Some("r"));
        records[0].last_weekly_alert_ack = Some(now);
        assert_eq!(scanner.channel(AlertChannel::WeeklyParts), &ChannelState::Idle);

        assert!(scanner.scan(&records, now + Duration::days(2)).is_empty());
        assert_eq!(
            scanner.scan(&records, now + Duration::days(8)),
            vec![surfaced(AlertChannel::WeeklyParts, "r")]
        );
    }

    #[test]
    fn test_acknowledge_when_idle_is_noop() {
        let mut scanner = AlertScanner::new();
        assert_eq!(scanner.acknowledge_weekly(), None);
    }

    #[test]
    fn test_pre_completion_surfaces_and_dismissal_sticks_for_the_day() {
        let mut scanner = AlertScanner::new();
        let mut r = record("p", date(2024, 6, 10), VehicleStatus::InProgress);
        r.expected_end_time = NaiveTime::from_hms_opt(12, 0, 0);
        let records = vec![r];

        assert!(scanner.scan(&records, at(2024, 6, 10, 11, 50)).is_empty());
        assert_eq!(
            scanner.scan(&records, at(2024, 6, 10, 11, 56)),
            vec![surfaced(AlertChannel::PreCompletion, "p")]
        );

        let dismissed = scanner.dismiss_pre_completion(records.first(), at(2024, 6, 10, 11, 57));
        assert_eq!(dismissed.as_deref(), Some("p"));
        assert!(scanner.scan(&records, at(2024, 6, 10, 11, 58)).is_empty());

        // Next day the same time of day opens the window again
        assert_eq!(
            scanner.scan(&records, at(2024, 6, 11, 12, 0)),
            vec![surfaced(AlertChannel::PreCompletion, "p")]
        );
    }

    #[test]
    fn test_pre_completion_edit_allows_new_time_to_surface() {
        let mut scanner = AlertScanner::new();
        let mut r = record("p", date(2024, 6, 10), VehicleStatus::InProgress);
        r.expected_end_time = NaiveTime::from_hms_opt(12, 0, 0);
        let mut records = vec![r];

        scanner.scan(&records, at(2024, 6, 10, 12, 0));
        assert_eq!(scanner.close_pre_completion_for_edit().as_deref(), Some("p"));

        records[0].expected_end_time = NaiveTime::from_hms_opt(12, 3, 0);
        assert_eq!(
            scanner.scan(&records, at(2024, 6, 10, 12, 1)),
            vec![surfaced(AlertChannel::PreCompletion, "p")]
        );
    }

    #[test]
    fn test_channels_are_independent() {
        let mut scanner = AlertScanner::new();
        let parts = record("w", date(2024, 6, 1), VehicleStatus::WaitingForParts);
        let mut timed = record("t", date(2024, 6, 10), VehicleStatus::Testing);
        timed.expected_end_time = NaiveTime::from_hms_opt(10, 0, 0);
        let records = vec![parts, timed];

        let events = scanner.scan(&records, at(2024, 6, 10, 10, 0));
        assert_eq!(
            events,
            vec![
                surfaced(AlertChannel::WeeklyParts, "w"),
                surfaced(AlertChannel::PreCompletion, "t"),
            ]
        );

        scanner.acknowledge_weekly();
        assert_eq!(scanner.channel(AlertChannel::PreCompletion).record_id(), Some("t"));
    }

    #[test]
    fn test_deleted_record_clears_channel() {
        let mut scanner = AlertScanner::new();
        let records = vec![record("w", date(2024, 6, 1), VehicleStatus::WaitingForParts)];
        scanner.scan(&records, at(2024, 6, 10, 9, 0));

        let events = scanner.scan(&[], at(2024, 6, 10, 9, 1));
        assert_eq!(
            events,
            vec![ScanEvent::Cleared {
                channel: AlertChannel::WeeklyParts,
                record_id: "w".to_string(),
            }]
        );
        assert_eq!(scanner.channel(AlertChannel::WeeklyParts), &ChannelState::Idle);
    }
}
