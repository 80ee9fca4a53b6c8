//! Alert rules for vehicle records.
//!
//! Every function here is a pure function of a record and the current local
//! wall-clock time. Day counts use calendar subtraction from local midnight
//! of the service date truncated to whole days, so results move at local
//! midnight rather than on rolling 24-hour windows.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use shared::VehicleStatus;

use super::models::vehicle_record::VehicleRecord;

/// Days a record may wait for parts before it is flagged
pub const PARTS_STALL_DAYS: i64 = 7;

/// Days between repeated weekly-parts reminders for the same record
pub const WEEKLY_REMINDER_DAYS: i64 = 7;

/// How long before the expected completion time the reminder opens
pub const PRE_COMPLETION_LEAD_MINUTES: i64 = 5;

/// How long after the expected completion time the reminder stays open
pub const PRE_COMPLETION_GRACE_MINUTES: i64 = 30;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}

/// Whole days until `date`, rounded up. Zero or negative once the day has begun.
pub fn days_until(date: NaiveDate, now: NaiveDateTime) -> i64 {
    let millis = (start_of_day(date) - now).num_milliseconds();
    -((-millis).div_euclid(MILLIS_PER_DAY))
}

/// Whole days elapsed since the start of `date`, rounded down.
pub fn days_elapsed(date: NaiveDate, now: NaiveDateTime) -> i64 {
    days_since(start_of_day(date), now)
}

/// Whole days elapsed since `timestamp`, rounded down.
pub fn days_since(timestamp: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (now - timestamp).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

/// Service date reached while the vehicle is not ready.
pub fn is_service_date_due(record: &VehicleRecord, now: NaiveDateTime) -> bool {
    days_until(record.service_date, now) <= 0 && !record.status.is_complete()
}

/// `now` is strictly past today's expected completion time.
pub fn is_expected_time_passed(record: &VehicleRecord, now: NaiveDateTime) -> bool {
    match record.expected_end_time {
        Some(time) => now > now.date().and_time(time),
        None => false,
    }
}

/// Marker shown next to the plate number on the dashboard.
pub fn has_alert(record: &VehicleRecord, now: NaiveDateTime) -> bool {
    is_service_date_due(record, now) || is_expected_time_passed(record, now)
}

/// Waiting for parts for at least a week. Drives the highlighted row.
pub fn is_overdue_waiting_for_parts(record: &VehicleRecord, now: NaiveDateTime) -> bool {
    record.status == VehicleStatus::WaitingForParts
        && days_elapsed(record.service_date, now) >= PARTS_STALL_DAYS
}

/// Overdue for parts and not acknowledged within the last week.
pub fn qualifies_for_weekly_parts_alert(record: &VehicleRecord, now: NaiveDateTime) -> bool {
    if !is_overdue_waiting_for_parts(record, now) {
        return false;
    }

    match record.last_weekly_alert_ack {
        None => true,
        Some(ack) => days_since(ack, now) >= WEEKLY_REMINDER_DAYS,
    }
}

/// Expected completion time of day falls within
/// [now - 30 min, now + 5 min] on the current date.
///
/// Only the time of day is compared; the record's service date plays no part.
pub fn is_within_pre_completion_window(record: &VehicleRecord, now: NaiveDateTime) -> bool {
    let Some(time) = record.expected_end_time else {
        return false;
    };

    let expected = now.date().and_time(time);
    let window_start = now - Duration::minutes(PRE_COMPLETION_GRACE_MINUTES);
    let window_end = now + Duration::minutes(PRE_COMPLETION_LEAD_MINUTES);

    expected >= window_start && expected <= window_end
}
