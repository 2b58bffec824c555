//! Compliance risk classification.
//!
//! This module maps a shortfall and the workdays left to cover it onto the
//! five [`ComplianceRisk`] levels.

use rust_decimal::Decimal;

use crate::models::ComplianceRisk;

/// Share of the remaining workdays above which a shortfall is at risk (75%).
pub fn at_risk_threshold() -> Decimal {
    Decimal::new(75, 2)
}

/// Classifies compliance risk.
///
/// Rules are applied in order and the first match wins:
///
/// 1. compliant → [`ComplianceRisk::Achieved`]
/// 2. `days_short > workdays_remaining` → [`ComplianceRisk::Impossible`]
/// 3. `days_short == workdays_remaining` → [`ComplianceRisk::Critical`]
/// 4. `days_short > 0.75 × workdays_remaining` → [`ComplianceRisk::AtRisk`]
/// 5. otherwise → [`ComplianceRisk::Possible`]
///
/// A finished period that is still short has no workdays remaining and is
/// therefore impossible by rule 2.
///
/// # Example
///
/// ```
/// use rto_engine::calculation::classify_risk;
/// use rto_engine::models::ComplianceRisk;
///
/// assert_eq!(classify_risk(6, 35, false), ComplianceRisk::Possible);
/// assert_eq!(classify_risk(5, 5, false), ComplianceRisk::Critical);
/// assert_eq!(classify_risk(10, 3, false), ComplianceRisk::Impossible);
/// ```
pub fn classify_risk(days_short: u32, workdays_remaining: u32, is_compliant: bool) -> ComplianceRisk {
    if is_compliant {
        return ComplianceRisk::Achieved;
    }
    if days_short > workdays_remaining {
        return ComplianceRisk::Impossible;
    }
    if days_short == workdays_remaining {
        return ComplianceRisk::Critical;
    }
    if Decimal::from(days_short) > at_risk_threshold() * Decimal::from(workdays_remaining) {
        return ComplianceRisk::AtRisk;
    }
    ComplianceRisk::Possible
}
