//! Member CLI commands
//!
//! Implements CLI commands for household member management.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_member_list, format_member_summary, MemberNames, OutputStyle};
use crate::error::HearthResult;
use crate::services::{BalanceService, MemberService};
use crate::storage::Storage;

/// Member subcommands
#[derive(Subcommand, Debug)]
pub enum MemberCommands {
    /// Add a member to the household
    Add {
        /// Display name
        name: String,
    },
    /// List all members
    List,
    /// Show a member and what they owe or are owed
    Show {
        /// Member name or ID
        member: String,
    },
    /// Rename a member
    Rename {
        /// Member name or ID
        member: String,
        /// New name
        new_name: String,
    },
    /// Remove a member with no expenses, settlements or chores
    Remove {
        /// Member name or ID
        member: String,
    },
}

/// Handle a member command
pub fn handle_member_command(
    storage: &Storage,
    settings: &Settings,
    cmd: MemberCommands,
) -> HearthResult<()> {
    let service = MemberService::new(storage);
    let style = OutputStyle::from_settings(settings);

    match cmd {
        MemberCommands::Add { name } => {
            let member = service.add(&name)?;
            println!("Added member: {}", member.name);
            println!("  ID: {}", member.id);
        }

        MemberCommands::List => {
            print!("{}", format_member_list(&service.list()?, &style));
        }

        MemberCommands::Show { member } => {
            let found = service.require(&member)?;
            let summary = BalanceService::new(storage).member_summary(found.id)?;
            let names = MemberNames::new(&service.list()?);
            print!("{}", format_member_summary(&summary, &names, &style));
        }

        MemberCommands::Rename { member, new_name } => {
            let found = service.require(&member)?;
            let renamed = service.rename(found.id, &new_name)?;
            println!("Renamed {} to {}", found.name, renamed.name);
        }

        MemberCommands::Remove { member } => {
            let found = service.require(&member)?;
            let removed = service.remove(found.id)?;
            println!("Removed member: {}", removed.name);
        }
    }

    Ok(())
}
