//! Core data models for the RTO compliance engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod compliance_status;
mod period;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use compliance_status::{ComplianceRisk, ComplianceStatus};
pub use period::{PeriodDefinition, ReportingPeriod};
