//! Report CLI commands
//!
//! Implements CLI commands for generating household reports. Each report
//! prints to the terminal or, with `--output`, writes CSV to a file.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::config::settings::Settings;
use crate::display::OutputStyle;
use crate::error::HearthResult;
use crate::reports::{CategoryReport, ChoreReport, ContributionReport};
use crate::storage::Storage;

use super::{create_output_file, date_range};

/// Date range and output options shared by every report
#[derive(Args, Debug, Clone, Default)]
pub struct ReportRange {
    /// Start date (YYYY-MM-DD, defaults to the first of this month)
    #[arg(short, long)]
    pub start: Option<String>,
    /// End date (YYYY-MM-DD, defaults to today)
    #[arg(short, long)]
    pub end: Option<String>,
    /// Write CSV to this file instead of printing
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// What each member paid against their share
    Contributions {
        #[command(flatten)]
        range: ReportRange,
    },
    /// Spending by category
    Categories {
        #[command(flatten)]
        range: ReportRange,
    },
    /// Chores completed and outstanding per member
    Chores {
        #[command(flatten)]
        range: ReportRange,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> HearthResult<()> {
    let style = OutputStyle::from_settings(settings);

    match cmd {
        ReportCommands::Contributions { range } => {
            let (start, end) = date_range(range.start.as_deref(), range.end.as_deref())?;
            let report = ContributionReport::generate(storage, start, end)?;

            if let Some(path) = range.output {
                report.export_csv(create_output_file(&path)?)?;
                println!("Contribution report exported to: {}", path.display());
            } else {
                println!("{}", report.format_terminal(&style));
            }
        }

        ReportCommands::Categories { range } => {
            let (start, end) = date_range(range.start.as_deref(), range.end.as_deref())?;
            let report = CategoryReport::generate(storage, start, end)?;

            if let Some(path) = range.output {
                report.export_csv(create_output_file(&path)?)?;
                println!("Category report exported to: {}", path.display());
            } else {
                println!("{}", report.format_terminal(&style));
            }
        }

        ReportCommands::Chores { range } => {
            let (start, end) = date_range(range.start.as_deref(), range.end.as_deref())?;
            let report = ChoreReport::generate(storage, start, end)?;

            if let Some(path) = range.output {
                report.export_csv(create_output_file(&path)?)?;
                println!("Chore report exported to: {}", path.display());
            } else {
                println!("{}", report.format_terminal(&style));
            }
        }
    }

    Ok(())
}
