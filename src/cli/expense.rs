//! Expense CLI commands
//!
//! Implements CLI commands for recording and managing shared expenses.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_list, MemberNames, OutputStyle};
use crate::error::{HearthError, HearthResult};
use crate::models::{ExpenseStatus, MemberId, Money};
use crate::services::{ExpenseFilter, ExpenseService, MemberService, NewExpense};
use crate::storage::Storage;

use super::{parse_date, parse_date_or_today, parse_money};

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a shared expense
    Add {
        /// Amount paid (e.g., "42.50")
        amount: String,
        /// Member who paid (name or ID)
        #[arg(short, long)]
        paid_by: String,
        /// What the money was spent on
        #[arg(short, long, default_value = "")]
        description: String,
        /// Category (defaults to the household setting)
        #[arg(short, long)]
        category: Option<String>,
        /// Expense date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Split evenly among these members (defaults to everyone)
        #[arg(short, long, value_delimiter = ',')]
        split: Vec<String>,
        /// Explicit share as MEMBER=AMOUNT; repeat for each member
        #[arg(long = "share", conflicts_with = "split")]
        shares: Vec<String>,
    },
    /// List expenses
    List {
        /// Filter by status (pending or settled)
        #[arg(long)]
        status: Option<String>,
        /// Include settled expenses
        #[arg(short, long)]
        all: bool,
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Only expenses paid by or shared with this member
        #[arg(short, long)]
        member: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Show only the most recent N expenses
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show expense details
    Show {
        /// Expense ID
        expense: String,
    },
    /// Mark an expense as settled
    Settle {
        /// Expense ID
        expense: String,
    },
    /// Mark a settled expense as pending again
    Reopen {
        /// Expense ID
        expense: String,
    },
    /// Delete a pending expense
    Delete {
        /// Expense ID
        expense: String,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> HearthResult<()> {
    let service = ExpenseService::new(storage);
    let members = MemberService::new(storage);
    let style = OutputStyle::from_settings(settings);

    match cmd {
        ExpenseCommands::Add {
            amount,
            paid_by,
            description,
            category,
            date,
            split,
            shares,
        } => {
            let input = NewExpense {
                description,
                amount: parse_money(&amount)?,
                paid_by: members.require(&paid_by)?.id,
                category: category.or_else(|| Some(settings.default_category.clone())),
                date: parse_date_or_today(date.as_deref())?,
            };

            let expense = if shares.is_empty() {
                let participants = split
                    .iter()
                    .map(|name| members.require(name).map(|m| m.id))
                    .collect::<HearthResult<Vec<MemberId>>>()?;
                service.add_even(input, &participants)?
            } else {
                let parsed = shares
                    .iter()
                    .map(|share| parse_share(&members, share))
                    .collect::<HearthResult<Vec<_>>>()?;
                service.add_custom(input, &parsed)?
            };

            let names = MemberNames::new(&members.list()?);
            println!(
                "Recorded expense: {} paid {} for {}",
                names.name_of(expense.paid_by),
                style.money(expense.amount),
                if expense.description.is_empty() {
                    expense.category.as_str()
                } else {
                    expense.description.as_str()
                }
            );
            println!("  ID: {}", expense.id);
            for split in &expense.splits {
                println!(
                    "  {} owes {}",
                    names.name_of(split.owed_by),
                    style.money(split.amount)
                );
            }
        }

        ExpenseCommands::List {
            status,
            all,
            category,
            member,
            from,
            to,
            limit,
        } => {
            let mut filter = ExpenseFilter::new();

            match status {
                Some(s) => {
                    let status = ExpenseStatus::parse(&s).ok_or_else(|| {
                        HearthError::Validation(format!(
                            "Invalid status '{}'. Use pending or settled",
                            s
                        ))
                    })?;
                    filter = filter.status(status);
                }
                None if !all && !settings.show_settled => {
                    filter = filter.status(ExpenseStatus::Pending);
                }
                None => {}
            }

            if let Some(category) = category {
                filter = filter.category(category);
            }
            if let Some(member) = member {
                filter = filter.member(members.require(&member)?.id);
            }
            if let Some(from) = from {
                filter.start_date = Some(parse_date(&from)?);
            }
            if let Some(to) = to {
                filter.end_date = Some(parse_date(&to)?);
            }
            if let Some(limit) = limit {
                filter = filter.limit(limit);
            }

            let expenses = service.list(filter)?;
            let names = MemberNames::new(&members.list()?);
            print!("{}", format_expense_list(&expenses, &names, &style));
        }

        ExpenseCommands::Show { expense } => {
            let expense = service.require(&expense)?;
            let names = MemberNames::new(&members.list()?);
            print!("{}", format_expense_details(&expense, &names, &style));
        }

        ExpenseCommands::Settle { expense } => {
            let expense = service.require(&expense)?;
            let settled = service.settle(expense.id)?;
            println!("Settled expense {}", settled.id);
        }

        ExpenseCommands::Reopen { expense } => {
            let expense = service.require(&expense)?;
            let reopened = service.reopen(expense.id)?;
            println!("Reopened expense {}", reopened.id);
        }

        ExpenseCommands::Delete { expense } => {
            let expense = service.require(&expense)?;
            let deleted = service.delete(expense.id)?;
            println!("Deleted expense {}", deleted.id);
        }
    }

    Ok(())
}

/// Parse a `MEMBER=AMOUNT` share argument
fn parse_share(members: &MemberService, share: &str) -> HearthResult<(MemberId, Money)> {
    let (member, amount) = share.split_once('=').ok_or_else(|| {
        HearthError::Validation(format!("Invalid share '{}'. Use MEMBER=AMOUNT", share))
    })?;

    Ok((members.require(member.trim())?.id, parse_money(amount)?))
}
