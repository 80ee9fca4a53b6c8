pub mod user;
pub mod vehicle_record;
