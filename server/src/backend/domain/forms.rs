//! Intake/edit form model.
//!
//! Holds the option lists and defaults the record form offers, and the
//! normalization applied to whatever the form hands back before it reaches
//! the record store.

use chrono::NaiveDate;
use shared::VehicleStatus;

use super::commands::records::RecordFields;
use super::models::vehicle_record::VehicleRecord;

/// Makes offered by the model dropdown
pub const CAR_MODELS: [&str; 6] = ["Peugeot", "Citroen", "MG", "DS", "Opel", "MI"];

pub const DEFAULT_CAR_MODEL: &str = "Peugeot";

/// Blank form for a new intake on `today`
pub fn intake_defaults(today: NaiveDate) -> RecordFields {
    RecordFields {
        name: String::new(),
        phone: String::new(),
        car_model: DEFAULT_CAR_MODEL.to_string(),
        car_number: String::new(),
        service_date: today,
        status: VehicleStatus::WaitingForEntry,
        is_rental_car: false,
        rental_car_number: None,
        expected_end_time: None,
        entry_reason: None,
        notes: None,
    }
}

impl RecordFields {
    /// Pre-fills the edit form from an existing record
    pub fn from_record(record: &VehicleRecord) -> Self {
        Self {
            name: record.name.clone(),
            phone: record.phone.clone(),
            car_model: record.car_model.clone(),
            car_number: record.car_number.clone(),
            service_date: record.service_date,
            status: record.status,
            is_rental_car: record.is_rental_car,
            rental_car_number: record.rental_car_number.clone(),
            expected_end_time: record.expected_end_time,
            entry_reason: record.entry_reason.clone(),
            notes: record.notes.clone(),
        }
    }

    /// Drops the rental plate when the rental flag is off and turns blank
    /// optional text into `None`. Required text fields may stay empty.
    pub fn normalized(mut self) -> Self {
        if !self.is_rental_car {
            self.rental_car_number = None;
        }
        self.rental_car_number = blank_to_none(self.rental_car_number);
        self.entry_reason = blank_to_none(self.entry_reason);
        self.notes = blank_to_none(self.notes);
        self
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
