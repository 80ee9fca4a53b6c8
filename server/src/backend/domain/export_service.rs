//! Export service domain logic for the service tracker.
//!
//! Builds the spreadsheet (CSV) rendition of the record list and writes it to
//! a user-chosen directory.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{error, info};
use std::fs;
use std::path::PathBuf;

use super::models::vehicle_record::{VehicleRecord, EXPECTED_TIME_FORMAT, SERVICE_DATE_FORMAT};

const CSV_HEADERS: [&str; 11] = [
    "Name",
    "Phone",
    "Car Model",
    "Plate Number",
    "Service Date",
    "Status",
    "Rental Car",
    "Rental Plate",
    "Expected Time",
    "Entry Reason",
    "Notes",
];

/// A generated export, not yet written anywhere
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub csv_data: String,
    pub filename: String,
    pub record_count: usize,
}

#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    pub fn export_filename(today: NaiveDate) -> String {
        format!("vehicle_records_{}.csv", today.format(SERVICE_DATE_FORMAT))
    }

    /// One row per record, in list order
    pub fn export_records_csv(&self, records: &[VehicleRecord], today: NaiveDate) -> Result<ExportedFile> {
        info!("Exporting {} records as CSV", records.len());

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADERS)?;

        for record in records {
            let expected_time = record
                .expected_end_time
                .map(|t| t.format(EXPECTED_TIME_FORMAT).to_string())
                .unwrap_or_default();
            let service_date = record.service_date.format(SERVICE_DATE_FORMAT).to_string();

            writer.write_record([
                record.name.as_str(),
                record.phone.as_str(),
                record.car_model.as_str(),
                record.car_number.as_str(),
                service_date.as_str(),
                record.status.label(),
                if record.is_rental_car { "yes" } else { "no" },
                record.rental_car_number.as_deref().unwrap_or_default(),
                expected_time.as_str(),
                record.entry_reason.as_deref().unwrap_or_default(),
                record.notes.as_deref().unwrap_or_default(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to finish CSV export: {}", e))?;
        let csv_data = String::from_utf8(bytes).context("CSV export produced invalid UTF-8")?;

        Ok(ExportedFile {
            csv_data,
            filename: Self::export_filename(today),
            record_count: records.len(),
        })
    }

    /// Write the export into `directory` (Documents when blank) and return
    /// the full path of the file
    pub fn export_to_path(
        &self,
        records: &[VehicleRecord],
        directory: &str,
        today: NaiveDate,
    ) -> Result<(PathBuf, ExportedFile)> {
        let export = self.export_records_csv(records, today)?;

        let export_dir = if directory.trim().is_empty() {
            dirs::document_dir()
                .or_else(dirs::home_dir)
                .ok_or_else(|| anyhow::anyhow!("Could not determine default export directory"))?
        } else {
            PathBuf::from(self.sanitize_path(directory))
        };

        fs::create_dir_all(&export_dir).with_context(|| {
            error!("Failed to create export directory {:?}", export_dir);
            format!("Failed to create export directory {}", export_dir.display())
        })?;

        let file_path = export_dir.join(&export.filename);
        fs::write(&file_path, &export.csv_data)
            .with_context(|| format!("Failed to write export file {}", file_path.display()))?;

        info!("Exported {} records to {}", export.record_count, file_path.display());
        Ok((file_path, export))
    }

    /// Basic cleanup of a pasted directory path
    fn sanitize_path(&self, path: &str) -> String {
        let mut cleaned = path.trim().to_string();

        if cleaned.len() >= 2
            && ((cleaned.starts_with('"') && cleaned.ends_with('"'))
                || (cleaned.starts_with('\'') && cleaned.ends_with('\'')))
        {
            cleaned = cleaned[1..cleaned.len() - 1].trim().to_string();
        }

        cleaned = cleaned.replace("\\ ", " ");

        while cleaned.len() > 1 && (cleaned.ends_with('/') || cleaned.ends_with('\\')) {
            cleaned.pop();
        }

        if cleaned.starts_with('~') {
            if let Some(home) = dirs::home_dir() {
                if cleaned == "~" {
                    cleaned = home.to_string_lossy().to_string();
                } else if cleaned.starts_with("~/") || cleaned.starts_with("~\\") {
                    cleaned = home.join(&cleaned[2..]).to_string_lossy().to_string();
                }
            }
        }

        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::json::test_utils::sample_record;
    use chrono::NaiveTime;
    use shared::VehicleStatus;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[test]
    fn test_csv_rows_follow_list_order() {
        let mut rental = sample_record("2", "Avi, Jr.", "22-222-22");
        rental.is_rental_car = true;
        rental.rental_car_number = Some("77-777-77".to_string());
        rental.expected_end_time = NaiveTime::from_hms_opt(16, 30, 0);
        rental.status = VehicleStatus::WaitingForParts;
        let records = vec![sample_record("1", "Dana", "11-111-11"), rental];

        let export = ExportService::new().export_records_csv(&records, today()).unwrap();
        let lines: Vec<&str> = export.csv_data.lines().collect();

        assert_eq!(export.record_count, 2);
        assert_eq!(export.filename, "vehicle_records_2024-06-10.csv");
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Name,Phone,Car Model,Plate Number"));
        assert!(lines[1].starts_with("Dana,050-1234567,Citroen,11-111-11,2024-06-10,"));
        assert!(lines[1].contains(",no,,"));
        assert!(lines[2].starts_with("\"Avi, Jr.\""));
        assert!(lines[2].contains(",yes,77-777-77,16:30,"));
    }

    #[test]
    fn test_empty_export_has_only_headers() {
        let export = ExportService::new().export_records_csv(&[], today()).unwrap();
        assert_eq!(export.record_count, 0);
        assert_eq!(export.csv_data.lines().count(), 1);
    }

    #[test]
    fn test_export_to_path_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("exports");
        let records = vec![sample_record("1", "Dana", "11-111-11")];

        let (path, export) = ExportService::new()
            .export_to_path(&records, &format!("\"{}/\"", target.display()), today())
            .unwrap();

        assert_eq!(path, target.join("vehicle_records_2024-06-10.csv"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), export.csv_data);
    }

    #[test]
    fn test_sanitize_path() {
        let service = ExportService::new();
        let home_dir = dirs::home_dir().unwrap();
        let expected_documents = home_dir.join("Documents").to_string_lossy().to_string();

        assert_eq!(service.sanitize_path("\"~/Documents\""), expected_documents);
        assert_eq!(service.sanitize_path("'~/Documents'"), expected_documents);
        assert_eq!(service.sanitize_path("  /path/to/dir  "), "/path/to/dir");
        assert_eq!(service.sanitize_path("/path\\ to\\ dir"), "/path to dir");
        assert_eq!(service.sanitize_path("/path/to/dir/"), "/path/to/dir");
    }
}
