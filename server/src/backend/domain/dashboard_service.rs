//! Dashboard view model: the filtered record table with status badges and
//! alert markers, ready to render.

use chrono::NaiveDateTime;
use shared::VehicleStatus;

use super::alert_evaluator::{has_alert, is_overdue_waiting_for_parts};
use super::models::vehicle_record::VehicleRecord;
use super::record_service::{matches_search, RecordService};

pub const EMPTY_SEARCH_MESSAGE: &str = "No matching records found";
pub const EMPTY_STORE_MESSAGE: &str = "No records yet. Add the first vehicle!";

/// Badge colors for a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusColors {
    pub text_class: &'static str,
    pub background_class: &'static str,
}

/// Fixed status → color lookup
pub fn status_colors(status: VehicleStatus) -> StatusColors {
    let (text_class, background_class) = match status {
        VehicleStatus::WaitingForEntry => ("text-gray-600", "bg-gray-100"),
        VehicleStatus::InProgress => ("text-orange-600", "bg-orange-100"),
        VehicleStatus::Testing => ("text-blue-600", "bg-blue-100"),
        VehicleStatus::Ready => ("text-green-600", "bg-green-100"),
        VehicleStatus::Wash => ("text-cyan-600", "bg-cyan-100"),
        VehicleStatus::WaitingForParts => ("text-purple-600", "bg-purple-100"),
    };
    StatusColors {
        text_class,
        background_class,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardRow {
    pub record: VehicleRecord,
    pub has_alert: bool,
    pub overdue_waiting_for_parts: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub search_term: String,
    pub rows: Vec<DashboardRow>,
    pub total_records: usize,
    pub empty_message: Option<&'static str>,
}

#[derive(Clone)]
pub struct DashboardService {
    record_service: RecordService,
}

impl DashboardService {
    pub fn new(record_service: RecordService) -> Self {
        Self { record_service }
    }

    pub async fn build_dashboard(&self, search_term: &str, now: NaiveDateTime) -> Dashboard {
        let records = self.record_service.list_records().await;
        build_rows(&records, search_term, now)
    }
}

/// Rows for the records matching `search_term`, in list order
pub fn build_rows(records: &[VehicleRecord], search_term: &str, now: NaiveDateTime) -> Dashboard {
    let rows: Vec<DashboardRow> = records
        .iter()
        .filter(|r| matches_search(r, search_term))
        .map(|r| DashboardRow {
            record: r.clone(),
            has_alert: has_alert(r, now),
            overdue_waiting_for_parts: is_overdue_waiting_for_parts(r, now),
        })
        .collect();

    let empty_message = match (rows.is_empty(), search_term.is_empty()) {
        (false, _) => None,
        (true, false) => Some(EMPTY_SEARCH_MESSAGE),
        (true, true) => Some(EMPTY_STORE_MESSAGE),
    };

    Dashboard {
        search_term: search_term.to_string(),
        rows,
        total_records: records.len(),
        empty_message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::alert_evaluator::tests::{at, record};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_every_status_has_a_distinct_color() {
        let mut seen = std::collections::HashSet::new();
        for status in VehicleStatus::ALL {
            assert!(seen.insert(status_colors(status).text_class));
        }
    }

    #[test]
    fn test_rows_carry_alert_markers() {
        let now = at(2024, 6, 20, 9, 0);
        let records = vec![
            record("due", date(2024, 6, 20), VehicleStatus::InProgress),
            record("future", date(2024, 6, 25), VehicleStatus::InProgress),
            record("stuck", date(2024, 6, 1), VehicleStatus::WaitingForParts),
            record("done", date(2024, 6, 1), VehicleStatus::Ready),
        ];

        let dashboard = build_rows(&records, "", now);
        let flags: Vec<_> = dashboard
            .rows
            .iter()
            .map(|r| (r.record.id.as_str(), r.has_alert, r.overdue_waiting_for_parts))
            .collect();

        assert_eq!(
            flags,
            vec![
                ("due", true, false),
                ("future", false, false),
                ("stuck", true, true),
                ("done", false, false),
            ]
        );
        assert_eq!(dashboard.empty_message, None);
    }

    #[test]
    fn test_search_filters_rows_but_not_total() {
        let now = at(2024, 6, 20, 9, 0);
        let mut a = record("a", date(2024, 6, 25), VehicleStatus::Wash);
        a.name = "Dana Cohen".to_string();
        let b = record("b", date(2024, 6, 25), VehicleStatus::Wash);
        let records = vec![a, b];

        let dashboard = build_rows(&records, "COHEN", now);
        assert_eq!(dashboard.rows.len(), 1);
        assert_eq!(dashboard.total_records, 2);

        let dashboard = build_rows(&records, "plate-b", now);
        assert_eq!(dashboard.rows[0].record.id, "b");
    }

    #[test]
    fn test_empty_messages() {
        let now = at(2024, 6, 20, 9, 0);
        assert_eq!(build_rows(&[], "", now).empty_message, Some(EMPTY_STORE_MESSAGE));

        let records = vec![record("a", date(2024, 6, 25), VehicleStatus::Wash)];
        assert_eq!(
            build_rows(&records, "zzz", now).empty_message,
            Some(EMPTY_SEARCH_MESSAGE)
        );
    }
}
