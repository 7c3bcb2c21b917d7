//! Expense display formatting
//!
//! Formats expenses for terminal output in table and detail views.

use crate::models::{Expense, Money};

use super::report::truncate;
use super::{MemberNames, OutputStyle};

/// Format a list of expenses as a table
pub fn format_expense_list(
    expenses: &[Expense],
    names: &MemberNames,
    style: &OutputStyle,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let payer_width = expenses
        .iter()
        .map(|e| names.name_of(e.paid_by).chars().count())
        .max()
        .unwrap_or(5)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<24}  {:<12}  {:<payer_width$}  {:>12}  {}\n",
        "ID", "Date", "Description", "Category", "Payer", "Amount", "Status",
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<24}  {:-<12}  {:-<payer_width$}  {:->12}  {:-<8}\n",
        "", "", "", "", "", "", "",
    ));

    for expense in expenses {
        output.push_str(&format!(
            "{:<12}  {:<10}  {:<24}  {:<12}  {:<payer_width$}  {:>12}  {}\n",
            expense.id.to_string(),
            style.date(expense.date),
            truncate(&expense.description, 24),
            truncate(&expense.category, 12),
            names.name_of(expense.paid_by),
            style.money(expense.amount),
            expense.status,
        ));
    }

    let total: Money = expenses.iter().map(|e| e.amount).sum();
    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<24}  {:-<12}  {:-<payer_width$}  {:->12}\n",
        "", "", "", "", "", "",
    ));
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<24}  {:<12}  {:<payer_width$}  {:>12}\n",
        "TOTAL",
        "",
        format!("{} expense(s)", expenses.len()),
        "",
        "",
        style.money(total),
    ));

    output
}

/// Format a single expense with its splits
pub fn format_expense_details(
    expense: &Expense,
    names: &MemberNames,
    style: &OutputStyle,
) -> String {
    let mut output = String::new();

    let title = if expense.description.is_empty() {
        "(no description)"
    } else {
        expense.description.as_str()
    };
    output.push_str(&format!("Expense: {}\n", title));
    output.push_str(&format!("  ID:        {}\n", expense.id));
    output.push_str(&format!("  Date:      {}\n", style.date(expense.date)));
    output.push_str(&format!("  Amount:    {}\n", style.money(expense.amount)));
    output.push_str(&format!("  Paid by:   {}\n", names.name_of(expense.paid_by)));
    output.push_str(&format!("  Category:  {}\n", expense.category));
    output.push_str(&format!("  Status:    {}\n", expense.status));
    output.push_str("\n  Splits:\n");

    for split in &expense.splits {
        let note = if split.owed_by == expense.paid_by {
            " (payer)"
        } else {
            ""
        };
        output.push_str(&format!(
            "    {:<20} {:>12}{}\n",
            names.name_of(split.owed_by),
            style.money(split.amount),
            note
        ));
    }

    output
}
