//! Chore CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_chore_list, MemberNames, OutputStyle};
use crate::error::HearthResult;
use crate::services::{ChoreService, MemberService};
use crate::storage::Storage;

use super::{parse_date, today};

/// Chore subcommands
#[derive(Subcommand, Debug)]
pub enum ChoreCommands {
    /// Assign a chore to a member
    Add {
        /// What needs doing
        title: String,
        /// Member responsible (name or ID)
        #[arg(short, long)]
        assignee: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },
    /// Mark a chore as done
    Done {
        /// Chore ID
        chore: String,
    },
    /// Mark a done chore as open again
    Reopen {
        /// Chore ID
        chore: String,
    },
    /// List chores
    List {
        /// Only chores assigned to this member
        #[arg(short, long)]
        member: Option<String>,
        /// Hide completed chores
        #[arg(short, long)]
        pending: bool,
    },
}

/// Handle a chore command
pub fn handle_chore_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ChoreCommands,
) -> HearthResult<()> {
    let service = ChoreService::new(storage);
    let members = MemberService::new(storage);
    let style = OutputStyle::from_settings(settings);

    match cmd {
        ChoreCommands::Add { title, assignee, due } => {
            let member = members.require(&assignee)?;
            let due = due.as_deref().map(parse_date).transpose()?;
            let chore = service.add(&title, member.id, due)?;
            println!("Added chore for {}: {}", member.name, chore.title);
            println!("  ID: {}", chore.id);
        }

        ChoreCommands::Done { chore } => {
            let chore = service.require(&chore)?;
            let done = service.complete(chore.id)?;
            println!("Done: {}", done.title);
        }

        ChoreCommands::Reopen { chore } => {
            let chore = service.require(&chore)?;
            let reopened = service.reopen(chore.id)?;
            println!("Reopened: {}", reopened.title);
        }

        ChoreCommands::List { member, pending } => {
            let member = member.map(|m| members.require(&m)).transpose()?;
            let chores = service.list(member.map(|m| m.id), pending)?;
            let names = MemberNames::new(&members.list()?);
            print!("{}", format_chore_list(&chores, &names, &style, today()));
        }
    }

    Ok(())
}
