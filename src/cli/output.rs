//! Text and JSON rendering of command results.
//!
//! Every function returns the full text to print; nothing here writes to
//! stdout directly.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::ComplianceConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, ComplianceRisk, ComplianceStatus};

const RULE: &str = "======================================================================";

/// Serializes any result as pretty-printed JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> EngineResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| EngineError::Serialization {
        message: e.to_string(),
    })
}

/// Confirmation printed after a record is saved.
pub fn format_recorded(record: &AttendanceRecord) -> String {
    format!("Recorded {} for {}", record.status, record.date)
}

/// Compliance summary for the `status` command.
pub fn format_status(status: &ComplianceStatus) -> String {
    status_lines(status).join("\n")
}

/// One or more period summaries, each under a header.
pub fn format_report(statuses: &[ComplianceStatus]) -> String {
    statuses
        .iter()
        .map(|status| {
            let mut lines = vec![
                RULE.to_string(),
                format!("COMPLIANCE REPORT: Reporting Period {}", status.period.period_number()),
                RULE.to_string(),
            ];
            lines.extend(status_lines(status));
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Prediction summary for the `plan` command.
///
/// `counted` are the planned dates that were applied; `planned` is how many
/// dates the user supplied.
pub fn format_plan(status: &ComplianceStatus, counted: &[NaiveDate], planned: usize) -> String {
    let mut lines = vec![
        format!(
            "Prediction for Reporting Period {}",
            status.period.period_number()
        ),
        format!("Planned In-Office Days Counted: {} of {}", counted.len(), planned),
    ];
    lines.extend(counted.iter().map(|date| format!("  {}", date)));
    if counted.len() < planned {
        lines.push(
            "  (dates in the past, outside the period, on non-workdays, or already recorded are ignored)"
                .to_string(),
        );
    }
    lines.push(String::new());
    lines.extend(status_lines(status));
    lines.join("\n")
}

/// Loaded settings for `config show`.
pub fn format_settings(config: &ComplianceConfig) -> String {
    let settings = config.settings();
    [
        "Configuration Settings".to_string(),
        RULE.to_string(),
        String::new(),
        "Policy Settings:".to_string(),
        format!(
            "  Required Days Per Period: {}",
            settings.policy.required_days_per_period
        ),
        String::new(),
        "Data Settings:".to_string(),
        format!(
            "  Attendance Data Dir: {}",
            settings.data.attendance_data_dir.display()
        ),
        format!("  Resolved Data Dir: {}", config.attendance_dir().display()),
    ]
    .join("\n")
}

/// Summary for a successful `config validate`.
pub fn format_validation(config: &ComplianceConfig) -> String {
    [
        "Configuration valid ✓".to_string(),
        format!("  Reporting Periods: {}", config.periods().len()),
        format!("  Exclusion Days: {}", config.holidays().len()),
    ]
    .join("\n")
}

/// Advice line for statuses that need attention.
pub fn risk_warning(status: &ComplianceStatus) -> Option<String> {
    match status.compliance_risk {
        ComplianceRisk::Impossible => Some(format!(
            "WARNING: Compliance cannot be achieved. Short by {} days with only {} workdays remaining.",
            status.days_short.saturating_sub(status.workdays_remaining),
            status.workdays_remaining
        )),
        ComplianceRisk::Critical => Some(format!(
            "CRITICAL: You must be in-office for all {} remaining workdays to achieve compliance.",
            status.workdays_remaining
        )),
        ComplianceRisk::AtRisk => {
            let rate = status.required_attendance_rate()?.round_dp(0);
            Some(format!(
                "AT RISK: You need {} more in-office days out of {} remaining workdays ({}% attendance required).",
                status.days_short, status.workdays_remaining, rate
            ))
        }
        ComplianceRisk::Achieved | ComplianceRisk::Possible => None,
    }
}

fn status_lines(status: &ComplianceStatus) -> Vec<String> {
    let period = &status.period;
    let mut lines = vec![
        format!("Reporting Period {}", period.period_number()),
        format!("Period: {} to {}", period.start_date(), period.end_date()),
        format!("Report Due: {}", period.report_date()),
        format!("As Of: {}", status.as_of_date),
        String::new(),
        format!(
            "Required Days: {} (baseline {}, {} exclusion days in period)",
            status.required_count,
            period.baseline_required_days(),
            period.exclusion_days().len()
        ),
        format!("In-Office Days: {}", status.in_office_count),
    ];

    if status.is_compliant {
        lines.push(format!("Days Ahead: {}", status.days_ahead));
    } else {
        lines.push(format!("Days Short: {}", status.days_short));
    }
    lines.push(format!("Workdays Remaining: {}", status.workdays_remaining));
    lines.push(String::new());

    let compliance = if status.is_compliant {
        "✓ COMPLIANT"
    } else {
        "✗ NOT COMPLIANT"
    };
    lines.push(format!("Status: {}", compliance));
    lines.push(format!(
        "Risk Level: {}",
        status.compliance_risk.as_str().to_uppercase()
    ));

    if let Some(warning) = risk_warning(status) {
        lines.push(String::new());
        lines.push(warning);
    }
    lines
}
