//! Member display formatting

use crate::models::Member;
use crate::services::MemberSummary;

use super::{MemberNames, OutputStyle};

/// Format a list of members as a table
pub fn format_member_list(members: &[Member], style: &OutputStyle) -> String {
    if members.is_empty() {
        return "No members yet. Add one with `hearth member add <name>`.".to_string();
    }

    let name_width = members
        .iter()
        .map(|m| m.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {}\n",
        "ID", "Name", "Joined",
    ));
    output.push_str(&format!("{:-<12}  {:-<name_width$}  {:-<10}\n", "", "", ""));

    for member in members {
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {}\n",
            member.id.to_string(),
            member.name,
            style.date(member.created_at.date_naive()),
        ));
    }

    output
}

/// Format one member's position and the balances that involve them
pub fn format_member_summary(
    summary: &MemberSummary,
    names: &MemberNames,
    style: &OutputStyle,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Member: {}\n", summary.member.name));
    output.push_str(&format!("  ID:   {}\n", summary.member.id));

    let position = if summary.net.is_positive() {
        format!("is owed {}", style.money(summary.net))
    } else if summary.net.is_negative() {
        format!("owes {}", style.money(summary.net.abs()))
    } else {
        "is settled up".to_string()
    };
    output.push_str(&format!("  Net:  {} {}\n", summary.member.name, position));

    if !summary.owes.is_empty() {
        output.push_str("\n  Owes:\n");
        for balance in &summary.owes {
            output.push_str(&format!(
                "    {:<20} {:>12}\n",
                names.name_of(balance.creditor),
                style.money(balance.amount)
            ));
        }
    }

    if !summary.owed.is_empty() {
        output.push_str("\n  Owed by:\n");
        for balance in &summary.owed {
            output.push_str(&format!(
                "    {:<20} {:>12}\n",
                names.name_of(balance.debtor),
                style.money(balance.amount)
            ));
        }
    }

    output
}
