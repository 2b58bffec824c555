//! File-backed attendance storage.
//!
//! Attendance is kept in one JSON file per calendar year
//! (`attendance_YYYY.json`), each an object mapping ISO dates to a status:
//!
//! ```json
//! {
//!   "2025-08-15": "in-office",
//!   "2025-08-18": "remote"
//! }
//! ```
//!
//! Writes go to a temporary file that is then renamed over the target, so a
//! crash mid-write never leaves a truncated year file behind.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceStatus};

/// Reads and writes attendance records under a data directory.
///
/// # Example
///
/// ```no_run
/// use rto_engine::models::AttendanceRecord;
/// use rto_engine::storage::AttendanceStore;
/// use chrono::NaiveDate;
///
/// let store = AttendanceStore::open("./data")?;
/// let date = NaiveDate::from_ymd_opt(2025, 8, 18).unwrap();
/// store.save_record(&AttendanceRecord::in_office(date))?;
///
/// let records = store.load_records(date, date)?;
/// assert_eq!(records.len(), 1);
/// # Ok::<(), rto_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AttendanceStore {
    data_dir: PathBuf,
}

impl AttendanceStore {
    /// Opens a store, creating the data directory if it does not exist.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> EngineResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).map_err(|e| storage_error(&data_dir, e))?;
        Ok(Self { data_dir })
    }

    /// The directory holding the year files.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file holding the given year's records.
    pub fn year_file_path(&self, year: i32) -> PathBuf {
        self.data_dir.join(format!("attendance_{}.json", year))
    }

    /// Saves a record, replacing any existing record for the same date.
    pub fn save_record(&self, record: &AttendanceRecord) -> EngineResult<()> {
        let path = self.year_file_path(record.date.year());
        let mut year = self.records_for_year(record.date.year())?;
        let previous = year.insert(record.date, record.status);

        write_atomically(&path, &year)?;

        debug!(
            date = %record.date,
            status = %record.status,
            replaced = previous.is_some(),
            file = %path.display(),
            "Saved attendance record"
        );
        Ok(())
    }

    /// All records stored for a year, keyed by date.
    ///
    /// A missing year file is an empty year, not an error.
    pub fn records_for_year(&self, year: i32) -> EngineResult<BTreeMap<NaiveDate, AttendanceStatus>> {
        let path = self.year_file_path(year);
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&path).map_err(|e| storage_error(&path, e))?;
        let raw: BTreeMap<String, String> =
            serde_json::from_str(&content).map_err(|e| storage_error(&path, e))?;

        raw.into_iter()
            .map(|(date_str, status_str)| {
                let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
                    EngineError::InvalidRecord {
                        message: format!(
                            "invalid date '{}' in {}: {}",
                            date_str,
                            path.display(),
                            e
                        ),
                    }
                })?;
                let status = status_str.parse::<AttendanceStatus>()?;
                Ok((date, status))
            })
            .collect()
    }

    /// Records dated within `[start, end]`, sorted by date.
    pub fn load_records(&self, start: NaiveDate, end: NaiveDate) -> EngineResult<Vec<AttendanceRecord>> {
        if start > end {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for year in start.year()..=end.year() {
            records.extend(
                self.records_for_year(year)?
                    .into_iter()
                    .filter(|(date, _)| *date >= start && *date <= end)
                    .map(|(date, status)| AttendanceRecord::new(date, status)),
            );
        }
        records.sort_by_key(|r| r.date);
        Ok(records)
    }
}

fn write_atomically(path: &Path, year: &BTreeMap<NaiveDate, AttendanceStatus>) -> EngineResult<()> {
    let tmp_path = path.with_extension("json.tmp");

    let mut json = serde_json::to_string_pretty(year).map_err(|e| storage_error(path, e))?;
    json.push('\n');

    let result = fs::write(&tmp_path, json).and_then(|_| fs::rename(&tmp_path, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(storage_error(path, e));
    }
    Ok(())
}

fn storage_error(path: &Path, error: impl std::fmt::Display) -> EngineError {
    EngineError::Storage {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}
