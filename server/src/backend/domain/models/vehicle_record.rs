//! Domain model for a vehicle-service intake record.
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use shared::VehicleStatus;

pub const SERVICE_DATE_FORMAT: &str = "%Y-%m-%d";
pub const EXPECTED_TIME_FORMAT: &str = "%H:%M";
pub const ACK_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleRecord {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub car_model: String,
    /// Plate number
    pub car_number: String,
    pub service_date: NaiveDate,
    pub status: VehicleStatus,
    pub is_rental_car: bool,
    /// Only kept while `is_rental_car` is set
    pub rental_car_number: Option<String>,
    pub advisor_id: String,
    pub expected_end_time: Option<NaiveTime>,
    pub entry_reason: Option<String>,
    pub notes: Option<String>,
    pub last_weekly_alert_ack: Option<NaiveDateTime>,
}

impl VehicleRecord {
    /// Record ids are the creation time in epoch milliseconds
    pub fn generate_id(epoch_millis: i64) -> String {
        epoch_millis.to_string()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecordMappingError {
    #[error("Invalid service date '{0}', expected YYYY-MM-DD")]
    InvalidServiceDate(String),
    #[error("Invalid expected completion time '{0}', expected HH:MM")]
    InvalidExpectedTime(String),
    #[error("Invalid acknowledgement timestamp '{0}'")]
    InvalidAckTimestamp(String),
}

pub fn parse_service_date(value: &str) -> Result<NaiveDate, RecordMappingError> {
    NaiveDate::parse_from_str(value.trim(), SERVICE_DATE_FORMAT)
        .map_err(|_| RecordMappingError::InvalidServiceDate(value.to_string()))
}

/// Parses an HH:MM time of day. Blank input means "no time set".
pub fn parse_expected_time(value: Option<&str>) -> Result<Option<NaiveTime>, RecordMappingError> {
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return Ok(None),
    };

    NaiveTime::parse_from_str(value, EXPECTED_TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map(Some)
        .map_err(|_| RecordMappingError::InvalidExpectedTime(value.to_string()))
}

/// Parses an acknowledgement timestamp. Local wall-clock values are taken
/// as-is; RFC 3339 values with an offset or `Z` are converted to local time.
pub fn parse_ack_timestamp(value: Option<&str>) -> Result<Option<NaiveDateTime>, RecordMappingError> {
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return Ok(None),
    };

    NaiveDateTime::parse_from_str(value, ACK_TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| {
            DateTime::parse_from_rfc3339(value).map(|t| t.with_timezone(&Local).naive_local())
        })
        .map(Some)
        .map_err(|_| RecordMappingError::InvalidAckTimestamp(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expected_time() {
        assert_eq!(
            parse_expected_time(Some("14:30")).unwrap(),
            NaiveTime::from_hms_opt(14, 30, 0)
        );
        assert_eq!(
            parse_expected_time(Some("09:05:00")).unwrap(),
            NaiveTime::from_hms_opt(9, 5, 0)
        );
        assert_eq!(parse_expected_time(Some("")).unwrap(), None);
        assert_eq!(parse_expected_time(Some("   ")).unwrap(), None);
        assert_eq!(parse_expected_time(None).unwrap(), None);
        assert!(parse_expected_time(Some("25:00")).is_err());
    }

    #[test]
    fn test_parse_service_date() {
        assert_eq!(
            parse_service_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_service_date("29/02/2024").is_err());
    }

    #[test]
    fn test_parse_ack_timestamp_accepts_fractional_seconds() {
        let parsed = parse_ack_timestamp(Some("2024-06-01T08:15:00.250")).unwrap().unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn test_parse_ack_timestamp_accepts_utc_and_offsets() {
        let utc = parse_ack_timestamp(Some("2024-06-03T08:15:00.000Z")).unwrap().unwrap();
        let expected = DateTime::parse_from_rfc3339("2024-06-03T08:15:00Z")
            .unwrap()
            .with_timezone(&Local)
            .naive_local();
        assert_eq!(utc, expected);

        let offset = parse_ack_timestamp(Some("2024-06-03T11:15:00+03:00")).unwrap().unwrap();
        assert_eq!(offset, expected);

        assert!(parse_ack_timestamp(Some("last monday")).is_err());
    }
}
