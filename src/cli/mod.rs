//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod balance;
pub mod chore;
pub mod expense;
pub mod export;
pub mod member;
pub mod report;
pub mod settle;

pub use audit::handle_audit_command;
pub use balance::{handle_balance_command, BalanceCommands};
pub use chore::{handle_chore_command, ChoreCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use member::{handle_member_command, MemberCommands};
pub use report::{handle_report_command, ReportCommands};
pub use settle::{handle_settle_command, SettleCommands};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{Datelike, NaiveDate};

use crate::error::{HearthError, HearthResult};
use crate::models::Money;

/// Today's date in local time
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a YYYY-MM-DD date argument
pub(crate) fn parse_date(value: &str) -> HearthResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        HearthError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", value))
    })
}

/// Parse an optional date argument, defaulting to today
pub(crate) fn parse_date_or_today(value: Option<&str>) -> HearthResult<NaiveDate> {
    value.map(parse_date).unwrap_or_else(|| Ok(today()))
}

/// Parse a money argument such as "12.50" or "$12.50"
pub(crate) fn parse_money(value: &str) -> HearthResult<Money> {
    Money::parse(value).map_err(|e| {
        HearthError::Validation(format!(
            "Invalid amount '{}'. Use a format like '12.50'. Error: {}",
            value, e
        ))
    })
}

/// Resolve a report range; defaults to the start of this month through today
pub(crate) fn date_range(
    start: Option<&str>,
    end: Option<&str>,
) -> HearthResult<(NaiveDate, NaiveDate)> {
    let today = today();
    let start_date = match start {
        Some(s) => parse_date(s)?,
        None => NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today),
    };
    let end_date = match end {
        Some(e) => parse_date(e)?,
        None => today,
    };

    if start_date > end_date {
        return Err(HearthError::Validation(format!(
            "Start date {} is after end date {}",
            start_date, end_date
        )));
    }

    Ok((start_date, end_date))
}

/// Create a buffered output file for exports
pub(crate) fn create_output_file(path: &Path) -> HearthResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        HearthError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
