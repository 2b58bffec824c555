//! Compliance calculation logic for the RTO compliance engine.
//!
//! This module contains the pure core of the engine: workday classification
//! and counting over a holiday calendar, reporting period resolution with
//! holiday-adjusted requirements, risk classification, and compliance
//! evaluation including what-if prediction. Nothing here performs I/O or
//! reads the clock.

mod calendar;
mod evaluator;
mod period_resolver;
mod risk;

pub use calendar::WorkdayCalendar;
pub use evaluator::ComplianceEvaluator;
pub use period_resolver::PeriodResolver;
pub use risk::{at_risk_threshold, classify_risk};
