use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of a vehicle in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleStatus {
    /// Customer booked, vehicle not yet on the floor
    #[default]
    WaitingForEntry,
    InProgress,
    /// Road test / inspection
    Testing,
    /// Work complete, ready for pickup
    Ready,
    Wash,
    /// Stalled until ordered parts arrive
    WaitingForParts,
}

impl VehicleStatus {
    /// Every status in the order the intake form lists them
    pub const ALL: [VehicleStatus; 6] = [
        VehicleStatus::WaitingForEntry,
        VehicleStatus::InProgress,
        VehicleStatus::Testing,
        VehicleStatus::Ready,
        VehicleStatus::Wash,
        VehicleStatus::WaitingForParts,
    ];

    /// Human-readable label shown in badges and dropdowns
    pub fn label(&self) -> &'static str {
        match self {
            VehicleStatus::WaitingForEntry => "Waiting for entry",
            VehicleStatus::InProgress => "In progress",
            VehicleStatus::Testing => "Testing",
            VehicleStatus::Ready => "Ready",
            VehicleStatus::Wash => "Wash",
            VehicleStatus::WaitingForParts => "Waiting for parts",
        }
    }

    /// Whether the vehicle has finished its workflow
    pub fn is_complete(&self) -> bool {
        matches!(self, VehicleStatus::Ready)
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One vehicle-service intake, as persisted and as sent over the wire.
///
/// Field names are camelCase so the stored array stays readable by the
/// browser front end. Older stored arrays may lack the optional fields;
/// they default to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    /// Opaque id derived from the creation timestamp (epoch millis)
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub car_model: String,
    /// Plate number
    #[serde(default)]
    pub car_number: String,
    /// Calendar date, YYYY-MM-DD
    pub service_date: String,
    pub status: VehicleStatus,
    #[serde(default)]
    pub is_rental_car: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental_car_number: Option<String>,
    #[serde(default)]
    pub advisor_id: String,
    /// Time of day, HH:MM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Local timestamp, YYYY-MM-DDTHH:MM:SS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_weekly_alert_ack: Option<String>,
}

/// Display colors for a status badge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBadge {
    pub status: VehicleStatus,
    pub label: String,
    pub text_class: String,
    pub background_class: String,
}

/// A staff user who can log in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: User,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub current_user: Option<User>,
}

/// Intake / edit form payload. Used for both create and full edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFormRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub car_model: String,
    #[serde(default)]
    pub car_number: String,
    /// YYYY-MM-DD
    pub service_date: String,
    #[serde(default)]
    pub status: VehicleStatus,
    #[serde(default)]
    pub is_rental_car: bool,
    #[serde(default)]
    pub rental_car_number: Option<String>,
    /// HH:MM, empty string means none
    #[serde(default)]
    pub expected_end_time: Option<String>,
    #[serde(default)]
    pub entry_reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Inline change from the alert dialog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuickUpdateRequest {
    #[serde(default)]
    pub status: Option<VehicleStatus>,
    /// YYYY-MM-DD
    #[serde(default)]
    pub service_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordResponse {
    pub record: VehicleRecord,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordListResponse {
    pub records: Vec<VehicleRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRecordResponse {
    pub deleted_id: String,
    pub success_message: String,
}

/// One row of the dashboard table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRow {
    pub record: VehicleRecord,
    pub badge: StatusBadge,
    /// Red marker next to the plate and the "show alert" button
    pub has_alert: bool,
    /// Highlighted row: waiting for parts for a week or more
    pub overdue_waiting_for_parts: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub current_user: Option<User>,
    pub search_term: String,
    pub rows: Vec<DashboardRow>,
    pub total_records: usize,
    /// Set when `rows` is empty
    pub empty_message: Option<String>,
}

/// Which reminder modal an alert belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertChannel {
    WeeklyParts,
    PreCompletion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfacedAlert {
    pub channel: AlertChannel,
    pub record: VehicleRecord,
    /// Local timestamp the alert was raised
    pub surfaced_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertsResponse {
    pub weekly_parts: Option<SurfacedAlert>,
    pub pre_completion: Option<SurfacedAlert>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgeAlertResponse {
    pub record: VehicleRecord,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DismissAlertResponse {
    pub dismissed_record_id: Option<String>,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpectedTimeRequest {
    /// HH:MM, `None` or empty clears it
    #[serde(default)]
    pub expected_end_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDataResponse {
    pub csv_data: String,
    pub filename: String,
    pub record_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportToPathRequest {
    pub directory_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportToPathResponse {
    pub success: bool,
    pub message: String,
    pub file_path: String,
}

/// Option lists and defaults for the intake form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOptionsResponse {
    pub statuses: Vec<StatusBadge>,
    pub car_models: Vec<String>,
    pub defaults: RecordFormRequest,
}
