//! Conversions from the alert and dashboard view models to shared DTOs.

use shared::{
    AlertsResponse, DashboardResponse, DashboardRow as SharedDashboardRow, SurfacedAlert,
    User as SharedUser,
};

use super::record_mapper::RecordMapper;
use crate::backend::domain::alert_service::{ActiveAlert, ActiveAlerts};
use crate::backend::domain::dashboard_service::{Dashboard, DashboardRow};
use crate::backend::domain::models::user::User;
use crate::backend::domain::models::vehicle_record::ACK_TIMESTAMP_FORMAT;

pub struct AlertMapper;

impl AlertMapper {
    pub fn to_surfaced_alert(alert: ActiveAlert) -> SurfacedAlert {
        SurfacedAlert {
            channel: alert.channel,
            record: RecordMapper::to_dto(alert.record),
            surfaced_at: alert.surfaced_at.format(ACK_TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn to_alerts_response(alerts: ActiveAlerts) -> AlertsResponse {
        AlertsResponse {
            weekly_parts: alerts.weekly_parts.map(Self::to_surfaced_alert),
            pre_completion: alerts.pre_completion.map(Self::to_surfaced_alert),
        }
    }

    pub fn to_user_dto(user: User) -> SharedUser {
        SharedUser {
            id: user.id,
            name: user.name,
        }
    }

    fn to_row_dto(row: DashboardRow) -> SharedDashboardRow {
        SharedDashboardRow {
            badge: RecordMapper::to_status_badge(row.record.status),
            record: RecordMapper::to_dto(row.record),
            has_alert: row.has_alert,
            overdue_waiting_for_parts: row.overdue_waiting_for_parts,
        }
    }

    pub fn to_dashboard_response(dashboard: Dashboard, current_user: Option<User>) -> DashboardResponse {
        DashboardResponse {
            current_user: current_user.map(Self::to_user_dto),
            search_term: dashboard.search_term,
            rows: dashboard.rows.into_iter().map(Self::to_row_dto).collect(),
            total_records: dashboard.total_records,
            empty_message: dashboard.empty_message.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::alert_evaluator::tests::{at, record};
    use crate::backend::domain::dashboard_service::{build_rows, EMPTY_STORE_MESSAGE};
    use chrono::NaiveDate;
    use shared::{AlertChannel, VehicleStatus};

    #[test]
    fn test_alert_timestamp_is_local_iso() {
        let alert = ActiveAlert {
            channel: AlertChannel::WeeklyParts,
            record: record("r", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), VehicleStatus::WaitingForParts),
            surfaced_at: at(2024, 6, 10, 9, 5),
        };

        let dto = AlertMapper::to_surfaced_alert(alert);
        assert_eq!(dto.surfaced_at, "2024-06-10T09:05:00");
        assert_eq!(dto.record.service_date, "2024-06-01");
    }

    #[test]
    fn test_dashboard_rows_get_badges() {
        let records = vec![record("r", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), VehicleStatus::Ready)];
        let dashboard = build_rows(&records, "", at(2024, 6, 10, 9, 0));
        let user = User {
            id: "manager".to_string(),
            name: "Manager".to_string(),
        };

        let dto = AlertMapper::to_dashboard_response(dashboard, Some(user));
        assert_eq!(dto.current_user.unwrap().id, "manager");
        assert_eq!(dto.rows[0].badge.label, "Ready");
        assert_eq!(dto.rows[0].badge.text_class, "text-green-600");
        assert_eq!(dto.empty_message, None);

        let empty = AlertMapper::to_dashboard_response(build_rows(&[], "", at(2024, 6, 10, 9, 0)), None);
        assert_eq!(empty.empty_message.as_deref(), Some(EMPTY_STORE_MESSAGE));
    }
}
