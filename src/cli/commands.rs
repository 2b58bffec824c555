//! Command handlers.
//!
//! Handlers return the text to print and never read the clock themselves;
//! the binary passes in today's date.

use chrono::NaiveDate;
use serde_json::json;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceStatus, ComplianceStatus, ReportingPeriod};

use super::args::{Cli, Command, ConfigCommand};
use super::context::AppContext;
use super::output;

/// Runs a parsed command line, returning the output to print.
pub fn run(cli: Cli, today: NaiveDate) -> EngineResult<String> {
    let ctx = AppContext::load(&cli.config)?;

    match cli.command {
        Command::Record { status, date } => record(&ctx, status, date.unwrap_or(today), today),
        Command::Status { as_of, json } => status(&ctx, as_of.unwrap_or(today), json),
        Command::Report {
            period,
            all,
            as_of,
            json,
        } => report(&ctx, period, all, as_of.unwrap_or(today), json),
        Command::Plan {
            dates,
            period,
            as_of,
            json,
        } => plan(&ctx, &dates, period, as_of.unwrap_or(today), json),
        Command::Config { action } => match action {
            ConfigCommand::Show => Ok(output::format_settings(ctx.config())),
            ConfigCommand::Validate => Ok(output::format_validation(ctx.config())),
        },
    }
}

/// Saves a record for `date`. Dates after `today` are rejected.
pub fn record(
    ctx: &AppContext,
    status: AttendanceStatus,
    date: NaiveDate,
    today: NaiveDate,
) -> EngineResult<String> {
    if date > today {
        return Err(EngineError::InvalidInput {
            message: format!("Cannot record attendance for future date {}", date),
        });
    }

    let record = AttendanceRecord::new(date, status);
    ctx.store().save_record(&record)?;
    info!(date = %date, status = %status, "Recorded attendance");

    Ok(output::format_recorded(&record))
}

/// Evaluates the period containing `as_of`.
pub fn status(ctx: &AppContext, as_of: NaiveDate, json: bool) -> EngineResult<String> {
    let period = ctx.resolver().current_period(as_of)?;
    let status = evaluate(ctx, &period, as_of)?;
    info!(period_number = period.period_number(), as_of = %as_of, "Evaluated status");

    if json {
        output::to_json(&status)
    } else {
        Ok(output::format_status(&status))
    }
}

/// Evaluates the selected periods: one by number, all, or the one containing
/// `as_of`.
pub fn report(
    ctx: &AppContext,
    period_number: Option<u32>,
    all: bool,
    as_of: NaiveDate,
    json: bool,
) -> EngineResult<String> {
    let periods = if all {
        ctx.resolver().all_periods()
    } else {
        vec![select_period(ctx, period_number, as_of)?]
    };

    let statuses = periods
        .iter()
        .map(|period| evaluate(ctx, period, as_of))
        .collect::<EngineResult<Vec<_>>>()?;
    info!(periods = statuses.len(), as_of = %as_of, "Generated report");

    if json {
        output::to_json(&statuses)
    } else {
        Ok(output::format_report(&statuses))
    }
}

/// Predicts compliance assuming in-office attendance on `planned`.
pub fn plan(
    ctx: &AppContext,
    planned: &[NaiveDate],
    period_number: Option<u32>,
    as_of: NaiveDate,
    json: bool,
) -> EngineResult<String> {
    let period = select_period(ctx, period_number, as_of)?;
    let records = records_as_of(ctx, &period, as_of)?;

    let evaluator = ctx.evaluator();
    let counted = evaluator.plannable_dates(&period, &records, planned, as_of);
    let prediction = evaluator.predict(&period, &records, planned, as_of);
    info!(
        period_number = period.period_number(),
        planned = planned.len(),
        counted = counted.len(),
        "Predicted compliance"
    );

    if json {
        output::to_json(&json!({
            "planned_dates": planned,
            "counted_dates": counted,
            "prediction": prediction,
        }))
    } else {
        Ok(output::format_plan(&prediction, &counted, planned.len()))
    }
}

fn select_period(
    ctx: &AppContext,
    period_number: Option<u32>,
    as_of: NaiveDate,
) -> EngineResult<ReportingPeriod> {
    match period_number {
        Some(number) => ctx
            .resolver()
            .period_by_number(number)
            .ok_or_else(|| EngineError::InvalidInput {
                message: format!("Invalid period number: {}", number),
            }),
        None => ctx.resolver().current_period(as_of),
    }
}

fn evaluate(
    ctx: &AppContext,
    period: &ReportingPeriod,
    as_of: NaiveDate,
) -> EngineResult<ComplianceStatus> {
    let records = records_as_of(ctx, period, as_of)?;
    Ok(ctx.evaluator().evaluate(period, &records, as_of))
}

/// Stored records of the period dated on or before `as_of`. Later records
/// did not exist yet as of that date.
fn records_as_of(
    ctx: &AppContext,
    period: &ReportingPeriod,
    as_of: NaiveDate,
) -> EngineResult<Vec<AttendanceRecord>> {
    ctx.store()
        .load_records(period.start_date(), as_of.min(period.end_date()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::ComplianceRisk;
    use crate::storage::AttendanceStore;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn test_context() -> (tempfile::TempDir, AppContext) {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load("./config").unwrap().into_config();
        let store = AttendanceStore::open(dir.path()).unwrap();
        (dir, AppContext::new(config, store))
    }

    #[test]
    fn test_record_saves_to_store() {
        let (_dir, ctx) = test_context();
        let date = make_date("2025-08-18");

        let text = record(&ctx, AttendanceStatus::InOffice, date, date).unwrap();
        assert_eq!(text, "Recorded in-office for 2025-08-18");
        assert_eq!(
            ctx.store().load_records(date, date).unwrap(),
            vec![AttendanceRecord::in_office(date)]
        );
    }

    #[test]
    fn test_record_rejects_future_date() {
        let (_dir, ctx) = test_context();
        let result = record(
            &ctx,
            AttendanceStatus::InOffice,
            make_date("2025-08-19"),
            make_date("2025-08-18"),
        );

        match result {
            Err(EngineError::InvalidInput { message }) => assert!(message.contains("future")),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_status_json_counts_recorded_days() {
        let (_dir, ctx) = test_context();
        let today = make_date("2025-08-20");
        for date in ["2025-08-18", "2025-08-19"] {
            record(&ctx, AttendanceStatus::InOffice, make_date(date), today).unwrap();
        }
        record(&ctx, AttendanceStatus::Remote, today, today).unwrap();

        let json = status(&ctx, today, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["in_office_count"], 2);
        assert_eq!(value["required_count"], 19);
        assert_eq!(value["period"]["period_number"], 1);
    }

    #[test]
    fn test_status_ignores_records_after_as_of() {
        let (_dir, ctx) = test_context();
        let today = make_date("2025-10-08");
        for date in ["2025-09-30", "2025-10-06", "2025-10-07", "2025-10-08"] {
            record(&ctx, AttendanceStatus::InOffice, make_date(date), today).unwrap();
        }

        let json = status(&ctx, make_date("2025-10-01"), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["in_office_count"], 1);
        assert_eq!(value["days_short"], 18);
        assert_eq!(value["workdays_remaining"], 33);
    }

    #[test]
    fn test_report_as_of_before_period_start_counts_nothing() {
        let (_dir, ctx) = test_context();
        let today = make_date("2025-11-20");
        record(&ctx, AttendanceStatus::InOffice, make_date("2025-11-17"), today).unwrap();

        let json = report(&ctx, Some(2), false, make_date("2025-10-01"), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["in_office_count"], 0);
    }

    #[test]
    fn test_plan_ignores_records_after_as_of() {
        let (_dir, ctx) = test_context();
        let today = make_date("2025-10-08");
        record(&ctx, AttendanceStatus::InOffice, make_date("2025-10-07"), today).unwrap();

        let json = plan(&ctx, &[make_date("2025-10-02")], None, make_date("2025-10-01"), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["counted_dates"], json!(["2025-10-02"]));
        assert_eq!(value["prediction"]["in_office_count"], 1);
    }

    #[test]
    fn test_status_outside_all_periods_fails() {
        let (_dir, ctx) = test_context();
        assert!(matches!(
            status(&ctx, make_date("2030-01-01"), false),
            Err(EngineError::NoPeriodDefined { .. })
        ));
    }

    #[test]
    fn test_report_unknown_period_number() {
        let (_dir, ctx) = test_context();
        let err = report(&ctx, Some(99), false, make_date("2025-10-01"), false).unwrap_err();
        assert_eq!(err.to_string(), "Invalid period number: 99");
    }

    #[test]
    fn test_report_all_covers_every_period() {
        let (_dir, ctx) = test_context();
        let json = report(&ctx, None, true, make_date("2025-10-01"), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), ctx.config().periods().len());
    }

    #[test]
    fn test_report_by_number_text() {
        let (_dir, ctx) = test_context();
        let text = report(&ctx, Some(2), false, make_date("2025-10-01"), false).unwrap();
        assert!(text.contains("COMPLIANCE REPORT: Reporting Period 2"));
    }

    #[test]
    fn test_plan_counts_only_eligible_dates() {
        let (_dir, ctx) = test_context();
        let as_of = make_date("2025-11-10");
        record(&ctx, AttendanceStatus::InOffice, as_of, as_of).unwrap();

        let planned = [
            make_date("2025-11-10"), // already recorded
            make_date("2025-11-11"),
            make_date("2025-11-15"), // Saturday, next period
            make_date("2025-11-07"), // past
        ];
        let json = plan(&ctx, &planned, None, as_of, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["counted_dates"], json!(["2025-11-11"]));
        assert_eq!(value["prediction"]["in_office_count"], 2);
    }

    #[test]
    fn test_plan_does_not_persist() {
        let (_dir, ctx) = test_context();
        let as_of = make_date("2025-11-10");
        plan(&ctx, &[make_date("2025-11-12")], Some(1), as_of, false).unwrap();

        assert!(
            ctx.store()
                .load_records(make_date("2025-08-15"), make_date("2025-11-14"))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_plan_can_reach_compliance() {
        let (_dir, ctx) = test_context();
        let as_of = make_date("2025-10-20");
        let planned: Vec<NaiveDate> = as_of
            .iter_days()
            .take_while(|d| *d <= make_date("2025-11-14"))
            .filter(|d| ctx.calendar().is_workday(*d))
            .take(19)
            .collect();

        let json = plan(&ctx, &planned, None, as_of, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["prediction"]["compliance_risk"], ComplianceRisk::Achieved.as_str());
    }
}
