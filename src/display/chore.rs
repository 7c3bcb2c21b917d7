//! Chore display formatting

use chrono::NaiveDate;

use crate::models::Chore;

use super::report::truncate;
use super::{MemberNames, OutputStyle};

/// Format a list of chores as a checklist
///
/// Open chores due before `today` are flagged as overdue.
pub fn format_chore_list(
    chores: &[Chore],
    names: &MemberNames,
    style: &OutputStyle,
    today: NaiveDate,
) -> String {
    if chores.is_empty() {
        return "No chores found.".to_string();
    }

    let width = names.widest().max(8);
    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<3}  {:<30}  {:<width$}  {:<10}\n",
        "ID", "", "Title", "Assignee", "Due",
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<3}  {:-<30}  {:-<width$}  {:-<10}\n",
        "", "", "", "", "",
    ));

    for chore in chores {
        let mark = if chore.is_completed() { "[x]" } else { "[ ]" };
        let due = chore
            .due_date
            .map(|d| style.date(d))
            .unwrap_or_default();
        let flag = if chore.is_overdue(today) { "  OVERDUE" } else { "" };

        output.push_str(&format!(
            "{:<12}  {:<3}  {:<30}  {:<width$}  {:<10}{}\n",
            chore.id.to_string(),
            mark,
            truncate(&chore.title, 30),
            names.name_of(chore.assigned_to),
            due,
            flag,
        ));
    }

    output
}
