use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use hearth::cli::{
    handle_audit_command, handle_balance_command, handle_chore_command, handle_expense_command,
    handle_export_command, handle_member_command, handle_report_command, handle_settle_command,
    BalanceCommands, ChoreCommands, ExpenseCommands, ExportCommands, MemberCommands,
    ReportCommands, SettleCommands,
};
use hearth::config::{paths::HearthPaths, settings::Settings};
use hearth::storage::file_io::json_file_valid;
use hearth::storage::init::{initialize_storage, needs_initialization};
use hearth::storage::Storage;

#[derive(Parser)]
#[command(
    name = "hearth",
    author = "Kaylee Beyene",
    version,
    about = "Household shared-expense ledger",
    long_about = "Hearth tracks shared household expenses. Record who paid for \
                  what and who shares the cost, then see who owes whom and the \
                  fewest payments that settle everyone up."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new household
    Init {
        /// Household name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Show current configuration and paths
    Config,

    /// Member management commands
    #[command(subcommand)]
    Member(MemberCommands),

    /// Shared expense commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Who owes whom
    #[command(subcommand)]
    Balance(BalanceCommands),

    /// Record payments and settle up
    #[command(subcommand)]
    Settle(SettleCommands),

    /// Chore tracking commands
    #[command(subcommand)]
    Chore(ChoreCommands),

    /// Generate reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export household data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    hearth::init_tracing();
    let cli = Cli::parse();

    let paths = HearthPaths::new()?;

    let command = match cli.command {
        Some(Commands::Init { name }) => {
            println!("Initializing Hearth at: {}", paths.base_dir().display());
            initialize_storage(&paths, name.as_deref())?;
            let settings = Settings::load_or_create(&paths)?;
            println!("Household '{}' is ready.", settings.household_name);
            println!();
            println!("Add members with 'hearth member add <name>'.");
            return Ok(());
        }
        Some(Commands::Config) => {
            let settings = Settings::load_or_create(&paths)?;
            print_config(&paths, &settings);
            return Ok(());
        }
        Some(command) => command,
        None => {
            println!("Hearth - household shared-expense ledger");
            println!();
            println!("Run 'hearth init' to set up a household.");
            println!("Run 'hearth --help' for usage information.");
            return Ok(());
        }
    };

    if needs_initialization(&paths) {
        bail!("No household found. Run 'hearth init' first.");
    }

    let settings = Settings::load_or_create(&paths)?;
    let mut storage = Storage::new(paths)?;
    storage.load_all()?;

    match command {
        Commands::Member(cmd) => handle_member_command(&storage, &settings, cmd)?,
        Commands::Expense(cmd) => handle_expense_command(&storage, &settings, cmd)?,
        Commands::Balance(cmd) => handle_balance_command(&storage, &settings, cmd)?,
        Commands::Settle(cmd) => handle_settle_command(&storage, &settings, cmd)?,
        Commands::Chore(cmd) => handle_chore_command(&storage, &settings, cmd)?,
        Commands::Report(cmd) => handle_report_command(&storage, &settings, cmd)?,
        Commands::Export(cmd) => handle_export_command(&storage, cmd)?,
        Commands::Audit { limit } => handle_audit_command(&storage, limit)?,
        Commands::Init { .. } | Commands::Config => {}
    }

    Ok(())
}

fn print_config(paths: &HearthPaths, settings: &Settings) {
    println!("Hearth Configuration");
    println!("====================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Data directory:   {}", paths.data_dir().display());
    println!("Export directory: {}", paths.export_dir().display());
    println!("Audit log:        {}", paths.audit_log().display());
    println!();
    println!("Data files:");
    for file in [
        paths.members_file(),
        paths.expenses_file(),
        paths.settlements_file(),
        paths.chores_file(),
    ] {
        let state = if !file.exists() {
            "missing"
        } else if json_file_valid(&file) {
            "ok"
        } else {
            "invalid"
        };
        println!("  {:<40} {}", file.display(), state);
    }
    println!();
    println!("Settings:");
    println!("  Household:        {}", settings.household_name);
    println!("  Currency symbol:  {}", settings.currency_symbol);
    println!("  Date format:      {}", settings.date_format);
    println!("  Default category: {}", settings.default_category);
    println!("  Show settled:     {}", settings.show_settled);
}
