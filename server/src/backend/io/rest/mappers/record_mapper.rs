//! Conversions between shared record DTOs and domain records.

use anyhow::{Context, Result};
use log::warn;
use shared::{
    RecordFormRequest, RecordListResponse, StatusBadge, VehicleRecord as SharedRecord,
    VehicleStatus,
};

use crate::backend::domain::commands::records::RecordFields;
use crate::backend::domain::dashboard_service::status_colors;
use crate::backend::domain::models::vehicle_record::{
    parse_ack_timestamp, parse_expected_time, parse_service_date, RecordMappingError,
    VehicleRecord as DomainRecord, ACK_TIMESTAMP_FORMAT, EXPECTED_TIME_FORMAT,
    SERVICE_DATE_FORMAT,
};

/// Mapper to convert between shared record DTOs and domain records.
pub struct RecordMapper;

impl RecordMapper {
    /// Converts a stored record DTO to a domain record. A bad service date
    /// rejects the record; a bad optional time is dropped.
    pub fn to_domain(dto: SharedRecord) -> Result<DomainRecord> {
        let service_date = parse_service_date(&dto.service_date)
            .with_context(|| format!("Record {} has an invalid service date", dto.id))?;
        let expected_end_time = parse_expected_time(dto.expected_end_time.as_deref())
            .unwrap_or_else(|e| {
                warn!("Record {}: {}, clearing it", dto.id, e);
                None
            });
        let last_weekly_alert_ack = parse_ack_timestamp(dto.last_weekly_alert_ack.as_deref())
            .unwrap_or_else(|e| {
                warn!("Record {}: {}, clearing it", dto.id, e);
                None
            });

        Ok(DomainRecord {
            id: dto.id,
            name: dto.name,
            phone: dto.phone,
            car_model: dto.car_model,
            car_number: dto.car_number,
            service_date,
            status: dto.status,
            rental_car_number: dto.rental_car_number.filter(|_| dto.is_rental_car),
            is_rental_car: dto.is_rental_car,
            advisor_id: dto.advisor_id,
            expected_end_time,
            entry_reason: dto.entry_reason,
            notes: dto.notes,
            last_weekly_alert_ack,
        })
    }

    /// Converts a domain record to a shared record DTO.
    pub fn to_dto(domain: DomainRecord) -> SharedRecord {
        SharedRecord {
            id: domain.id,
            name: domain.name,
            phone: domain.phone,
            car_model: domain.car_model,
            car_number: domain.car_number,
            service_date: domain.service_date.format(SERVICE_DATE_FORMAT).to_string(),
            status: domain.status,
            is_rental_car: domain.is_rental_car,
            rental_car_number: domain.rental_car_number,
            advisor_id: domain.advisor_id,
            expected_end_time: domain
                .expected_end_time
                .map(|t| t.format(EXPECTED_TIME_FORMAT).to_string()),
            entry_reason: domain.entry_reason,
            notes: domain.notes,
            last_weekly_alert_ack: domain
                .last_weekly_alert_ack
                .map(|t| t.format(ACK_TIMESTAMP_FORMAT).to_string()),
        }
    }

    pub fn to_record_list_dto(records: Vec<DomainRecord>) -> RecordListResponse {
        RecordListResponse {
            records: records.into_iter().map(Self::to_dto).collect(),
        }
    }

    /// Parses a submitted form into domain fields.
    pub fn form_to_fields(form: RecordFormRequest) -> Result<RecordFields, RecordMappingError> {
        Ok(RecordFields {
            service_date: parse_service_date(&form.service_date)?,
            expected_end_time: parse_expected_time(form.expected_end_time.as_deref())?,
            name: form.name,
            phone: form.phone,
            car_model: form.car_model,
            car_number: form.car_number,
            status: form.status,
            is_rental_car: form.is_rental_car,
            rental_car_number: form.rental_car_number,
            entry_reason: form.entry_reason,
            notes: form.notes,
        })
    }

    pub fn fields_to_form(fields: RecordFields) -> RecordFormRequest {
        RecordFormRequest {
            name: fields.name,
            phone: fields.phone,
            car_model: fields.car_model,
            car_number: fields.car_number,
            service_date: fields.service_date.format(SERVICE_DATE_FORMAT).to_string(),
            status: fields.status,
            is_rental_car: fields.is_rental_car,
            rental_car_number: fields.rental_car_number,
            expected_end_time: fields
                .expected_end_time
                .map(|t| t.format(EXPECTED_TIME_FORMAT).to_string()),
            entry_reason: fields.entry_reason,
            notes: fields.notes,
        }
    }

    pub fn to_status_badge(status: VehicleStatus) -> StatusBadge {
        let colors = status_colors(status);
        StatusBadge {
            status,
            label: status.label().to_string(),
            text_class: colors.text_class.to_string(),
            background_class: colors.background_class.to_string(),
        }
    }
}
