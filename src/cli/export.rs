//! CLI commands for data export
//!
//! Provides commands for exporting household data as JSON or CSV.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::error::HearthResult;
use crate::export::{
    export_balances_csv, export_expenses_csv, export_full_json, export_settlements_csv,
    FullExport,
};
use crate::storage::Storage;

use super::create_output_file;

/// Which table a CSV export contains
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CsvTable {
    /// Expenses, one row per split
    Expenses,
    /// Current pairwise balances
    Balances,
    /// Recorded payments
    Settlements,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the whole household to JSON
    Json {
        /// Output file path (defaults to stdout)
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export one table to CSV
    Csv {
        /// Table to export
        #[arg(value_enum)]
        table: CsvTable,

        /// Output file path (defaults to stdout)
        output: Option<PathBuf>,
    },

    /// Show export information without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> HearthResult<()> {
    match cmd {
        ExportCommands::Json { output, pretty } => match output {
            Some(path) => {
                let mut writer = create_output_file(&path)?;
                export_full_json(storage, &mut writer, pretty)?;
                writer.flush()?;
                println!("Household exported to: {}", path.display());
            }
            None => {
                let mut stdout = io::stdout().lock();
                export_full_json(storage, &mut stdout, pretty)?;
            }
        },

        ExportCommands::Csv { table, output } => match output {
            Some(path) => {
                write_csv(storage, table, create_output_file(&path)?)?;
                println!("Exported {:?} to: {}", table, path.display());
            }
            None => write_csv(storage, table, io::stdout().lock())?,
        },

        ExportCommands::Info => {
            let export = FullExport::from_storage(storage)?;
            export.validate()?;

            println!("Export Information");
            println!("==================");
            println!("Schema version: {}", export.schema_version);
            println!("Members:        {}", export.metadata.member_count);
            println!(
                "Expenses:       {} ({} pending)",
                export.metadata.expense_count, export.metadata.pending_expense_count
            );
            println!("Settlements:    {}", export.metadata.settlement_count);
            println!("Chores:         {}", export.metadata.chore_count);
            if let (Some(first), Some(last)) = (
                &export.metadata.earliest_expense,
                &export.metadata.latest_expense,
            ) {
                println!("Expense dates:  {} to {}", first, last);
            }
            println!("Balances:       {}", export.balances.len());
            println!("To settle up:   {} payment(s)", export.suggested_settlements.len());
        }
    }

    Ok(())
}

fn write_csv<W: Write>(storage: &Storage, table: CsvTable, writer: W) -> HearthResult<()> {
    match table {
        CsvTable::Expenses => export_expenses_csv(storage, writer),
        CsvTable::Balances => export_balances_csv(storage, writer),
        CsvTable::Settlements => export_settlements_csv(storage, writer),
    }
}
