//! Attendance record persistence.
//!
//! The compliance core treats attendance as plain input; this module is the
//! collaborator that keeps it on disk between runs.

mod store;

pub use store::AttendanceStore;
