//! Balance CLI commands
//!
//! Shows who owes whom and how to settle with the fewest payments.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{
    format_balances, format_member_summary, format_settlements, MemberNames, OutputStyle,
};
use crate::error::HearthResult;
use crate::models::Settlement;
use crate::services::{BalanceService, MemberService};
use crate::storage::Storage;

/// Balance subcommands
#[derive(Subcommand, Debug)]
pub enum BalanceCommands {
    /// Show pairwise balances
    Show {
        /// List the splits behind each balance
        #[arg(short, long)]
        detailed: bool,
    },
    /// Suggest payments that clear every balance
    Suggest,
    /// Show one member's position
    Member {
        /// Member name or ID
        member: String,
    },
}

/// Handle a balance command
pub fn handle_balance_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BalanceCommands,
) -> HearthResult<()> {
    let service = BalanceService::new(storage);
    let members = MemberService::new(storage);
    let names = MemberNames::new(&members.list()?);
    let style = OutputStyle::from_settings(settings);

    match cmd {
        BalanceCommands::Show { detailed } => {
            let balances = service.compute()?;
            println!("{}", format_balances(&balances, &names, &style, detailed).trim_end());
        }

        BalanceCommands::Suggest => {
            let suggestions = service.suggest()?;
            if suggestions.is_empty() {
                println!("Everyone is settled up.");
            } else {
                println!("Suggested payments ({}):", suggestions.len());
                for s in &suggestions {
                    println!(
                        "  {} pays {} {}",
                        names.name_of(s.from),
                        names.name_of(s.to),
                        style.money(s.amount)
                    );
                }
            }
        }

        BalanceCommands::Member { member } => {
            let found = members.require(&member)?;
            let summary = service.member_summary(found.id)?;
            print!("{}", format_member_summary(&summary, &names, &style));
        }
    }

    Ok(())
}

/// Print a settlement table, used by the settle commands
pub(crate) fn print_settlements(
    storage: &Storage,
    style: &OutputStyle,
    settlements: &[Settlement],
) -> HearthResult<()> {
    let names = MemberNames::new(&storage.members.get_all()?);
    println!("{}", format_settlements(settlements, &names, style).trim_end());
    Ok(())
}
