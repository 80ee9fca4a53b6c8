//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the DTOs defined in the
//! `shared` crate to these internal types.

pub mod records {
    use chrono::{NaiveDate, NaiveTime};
    use shared::VehicleStatus;

    /// Every field the intake/edit form submits.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordFields {
        pub name: String,
        pub phone: String,
        pub car_model: String,
        pub car_number: String,
        pub service_date: NaiveDate,
        pub status: VehicleStatus,
        pub is_rental_car: bool,
        pub rental_car_number: Option<String>,
        pub expected_end_time: Option<NaiveTime>,
        pub entry_reason: Option<String>,
        pub notes: Option<String>,
    }

    /// Input for logging a new intake.
    #[derive(Debug, Clone)]
    pub struct CreateRecordCommand {
        pub advisor_id: String,
        pub fields: RecordFields,
    }

    /// Input for a full edit from the record form.
    #[derive(Debug, Clone)]
    pub struct UpdateRecordCommand {
        pub record_id: String,
        pub fields: RecordFields,
    }

    /// Inline status/date change from the alert dialog.
    #[derive(Debug, Clone, Default)]
    pub struct QuickUpdateCommand {
        pub record_id: String,
        pub status: Option<VehicleStatus>,
        pub service_date: Option<NaiveDate>,
    }

    /// Delete only goes through once the destructive-action dialog is confirmed.
    #[derive(Debug, Clone)]
    pub struct DeleteRecordCommand {
        pub record_id: String,
        pub confirmed: bool,
    }
}

pub mod auth {
    #[derive(Debug, Clone)]
    pub struct LoginCommand {
        pub user_id: String,
        pub password: String,
    }
}
