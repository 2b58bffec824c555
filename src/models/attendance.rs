//! Attendance record models.
//!
//! This module contains the [`AttendanceRecord`] and [`AttendanceStatus`] types
//! that describe where the user worked on a given day.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Where the user worked on a given day.
///
/// Serialized in kebab-case (`"in-office"`, `"remote"`), which is also the
/// format used in attendance files and on the command line.
///
/// # Example
///
/// ```
/// use rto_engine::models::AttendanceStatus;
///
/// let status: AttendanceStatus = "in-office".parse().unwrap();
/// assert_eq!(status, AttendanceStatus::InOffice);
/// assert_eq!(status.to_string(), "in-office");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    /// Worked from the office.
    InOffice,
    /// Worked remotely.
    Remote,
}

impl AttendanceStatus {
    /// Returns the canonical string form used in files and output.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::InOffice => "in-office",
            AttendanceStatus::Remote => "remote",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in-office" => Ok(AttendanceStatus::InOffice),
            "remote" => Ok(AttendanceStatus::Remote),
            other => Err(EngineError::InvalidRecord {
                message: format!(
                    "Invalid attendance status '{}'. Must be one of: in-office, remote",
                    other
                ),
            }),
        }
    }
}

/// A single day's attendance.
///
/// There is at most one record per date; saving a record for a date that
/// already has one replaces it.
///
/// # Example
///
/// ```
/// use rto_engine::models::{AttendanceRecord, AttendanceStatus};
/// use chrono::NaiveDate;
///
/// let record = AttendanceRecord::new(
///     NaiveDate::from_ymd_opt(2025, 8, 18).unwrap(),
///     AttendanceStatus::InOffice,
/// );
/// assert!(record.is_in_office());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The day the record applies to.
    pub date: NaiveDate,
    /// Where the user worked.
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// Creates a new attendance record.
    pub fn new(date: NaiveDate, status: AttendanceStatus) -> Self {
        Self { date, status }
    }

    /// Creates an in-office record for the given date.
    pub fn in_office(date: NaiveDate) -> Self {
        Self::new(date, AttendanceStatus::InOffice)
    }

    /// Creates a remote record for the given date.
    pub fn remote(date: NaiveDate) -> Self {
        Self::new(date, AttendanceStatus::Remote)
    }

    /// Returns `true` if this record counts toward the in-office requirement.
    pub fn is_in_office(&self) -> bool {
        self.status == AttendanceStatus::InOffice
    }
}
