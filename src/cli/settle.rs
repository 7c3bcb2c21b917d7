//! Settlement CLI commands
//!
//! Records payments between members and settles the household up.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::OutputStyle;
use crate::error::HearthResult;
use crate::services::{MemberService, SettlementService};
use crate::storage::Storage;

use super::balance::print_settlements;
use super::{parse_date_or_today, parse_money};

/// Settlement subcommands
#[derive(Subcommand, Debug)]
pub enum SettleCommands {
    /// Record a payment from one member to another
    Record {
        /// Member who paid (name or ID)
        from: String,
        /// Member who received the money (name or ID)
        to: String,
        /// Amount paid
        amount: String,
        /// Payment date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Note
        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// List recorded payments
    List {
        /// Only payments involving this member
        #[arg(short, long)]
        member: Option<String>,
    },
    /// Record the suggested payments that clear every balance
    Up {
        /// Payment date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Show the payments without recording them
        #[arg(long)]
        dry_run: bool,
    },
}

/// Handle a settle command
pub fn handle_settle_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SettleCommands,
) -> HearthResult<()> {
    let service = SettlementService::new(storage);
    let members = MemberService::new(storage);
    let style = OutputStyle::from_settings(settings);

    match cmd {
        SettleCommands::Record {
            from,
            to,
            amount,
            date,
            note,
        } => {
            let payer = members.require(&from)?;
            let payee = members.require(&to)?;
            let settlement = service.record(
                payer.id,
                payee.id,
                parse_money(&amount)?,
                parse_date_or_today(date.as_deref())?,
                &note,
            )?;
            println!(
                "Recorded payment: {} paid {} {}",
                payer.name,
                payee.name,
                style.money(settlement.amount)
            );
            println!("  ID: {}", settlement.id);
        }

        SettleCommands::List { member } => {
            let member = member.map(|m| members.require(&m)).transpose()?;
            let settlements = service.list(member.map(|m| m.id))?;
            print_settlements(storage, &style, &settlements)?;
        }

        SettleCommands::Up { date, dry_run } => {
            let date = parse_date_or_today(date.as_deref())?;
            if dry_run {
                let suggestions = service.suggest()?;
                if suggestions.is_empty() {
                    println!("Everyone is settled up.");
                } else {
                    print_settlements(storage, &style, &suggestions)?;
                }
                return Ok(());
            }

            let recorded = service.settle_up(date)?;
            if recorded.is_empty() {
                println!("Everyone is settled up.");
            } else {
                println!("Recorded {} payment(s):", recorded.len());
                print_settlements(storage, &style, &recorded)?;
            }
        }
    }

    Ok(())
}
