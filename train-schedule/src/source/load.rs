//! Reading wide records from JSON.
//!
//! The timetable export is a JSON array of objects, one per service. This is
//! the thin adapter the binary uses; tabular formats are left to whatever
//! produces the array.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::domain::ServiceRecord;

use super::{RawServiceRecord, decode_services};

/// Errors reading a record file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened or read
    #[error("failed to read records: {0}")]
    Io(#[from] std::io::Error),

    /// The content is not a JSON array of objects
    #[error("failed to parse records: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read a JSON array of wide records.
///
/// Only a document that is not a JSON array fails. Elements that are not
/// records are logged and skipped.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RawServiceRecord>, LoadError> {
    let rows: Vec<serde_json::Value> = serde_json::from_reader(reader)?;

    let records = rows
        .into_iter()
        .enumerate()
        .filter_map(|(row, value)| match RawServiceRecord::deserialize(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(row, error = %e, "skipping unreadable record");
                None
            }
        })
        .collect();

    Ok(records)
}

/// Read and decode every service in a JSON record file.
///
/// Records that fail to decode are logged and skipped; only I/O and JSON
/// syntax errors fail the load.
pub fn load_services(path: &Path, config: &EngineConfig) -> Result<Vec<ServiceRecord>, LoadError> {
    let file = File::open(path)?;
    let records = read_records(BufReader::new(file))?;
    debug!(path = %path.display(), records = records.len(), "read record file");

    Ok(decode_services(&records, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const RECORDS: &str = r#"[
        {
            "trainNumber": "12302",
            "trainName": "Howrah Rajdhani",
            "runningOn": "YYYYYYY",
            "train_type": "RAJ",
            "journeyClasses": "1A, 2A, 3A",
            "station1_code": "NDLS", "station1_name": "New Delhi",
            "station1_arr": null, "station1_dep": "16:55", "station1_day": 1, "station1_dist": 0,
            "station2_code": "HWH", "station2_name": "Howrah Jn",
            "station2_arr": "09:55", "station2_dep": null, "station2_day": 2, "station2_dist": 1447
        },
        {
            "trainNumber": "00000X",
            "station1_code": "AAA"
        },
        {
            "trainNumber": 12951,
            "trainName": "Mumbai Rajdhani",
            "runningOn": [true, true, true, true, true, true, true],
            "station1_code": "MMCT", "station1_dep": "17:00",
            "station2_code": "NDLS", "station2_arr": "08:32", "station2_day": 1
        }
    ]"#;

    #[test]
    fn read_records_from_reader() {
        let records = read_records(RECORDS.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn read_records_skips_rows_that_are_not_records() {
        let json = r#"[
            {"trainNumber": "12302", "station1_code": "NDLS"},
            42,
            "12301",
            {"trainNumber": "12951", "station1_code": "MMCT"}
        ]"#;

        let records = read_records(json.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn odd_cells_do_not_hide_other_records() {
        let json = r#"[
            {"trainNumber": "12302", "station1_code": "NDLS", "station2_code": "HWH"},
            {"trainNumber": "12951", "station1_code": "MMCT", "meta": {"zone": "WR"}},
            {"trainNumber": "12953", "station1_code": "MMCT", "tags": ["mail"]},
            [1, 2, 3],
            {"trainNumber": "12301", "station1_code": "HWH", "station2_code": "NDLS"}
        ]"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let services = load_services(file.path(), &EngineConfig::default()).unwrap();

        let numbers: Vec<_> = services.iter().map(|s| s.number().as_str()).collect();
        assert_eq!(numbers, vec!["12302", "12951", "12953", "12301"]);
    }

    #[test]
    fn read_records_rejects_non_array() {
        let err = read_records(r#"{"trainNumber": "1"}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
        assert!(err.to_string().starts_with("failed to parse records"));
    }

    #[test]
    fn load_services_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(RECORDS.as_bytes()).unwrap();

        let services = load_services(file.path(), &EngineConfig::default()).unwrap();

        // The malformed train number is skipped
        let numbers: Vec<_> = services.iter().map(|s| s.number().as_str()).collect();
        assert_eq!(numbers, vec!["12302", "12951"]);
        assert_eq!(services[0].stops()[1].day_offset, 2);
        assert!(services[1].running_days().is_daily());
    }

    #[test]
    fn load_services_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_services(&dir.path().join("absent.json"), &EngineConfig::default())
            .unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
