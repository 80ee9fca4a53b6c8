pub mod alert_mapper;
pub mod record_mapper;
