pub mod connection;
pub mod record_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::JsonConnection;
pub use record_repository::{RecordRepository, RECORDS_KEY};
