//! CSV Export functionality
//!
//! Exports expenses, balances and recorded settlements to CSV. Expenses are
//! written one row per split so shares can be summed in a spreadsheet.

use std::io::Write;

use crate::display::MemberNames;
use crate::error::HearthResult;
use crate::services::BalanceService;
use crate::storage::Storage;

/// Export all expenses to CSV, one row per split
pub fn export_expenses_csv<W: Write>(storage: &Storage, writer: W) -> HearthResult<()> {
    let names = MemberNames::new(&storage.members.get_all()?);
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record([
        "Expense ID",
        "Date",
        "Description",
        "Category",
        "Paid By",
        "Amount",
        "Status",
        "Owed By",
        "Share",
    ])?;

    for expense in storage.expenses.get_all()? {
        for split in &expense.splits {
            csv.write_record([
                expense.id.as_uuid().to_string(),
                expense.date.to_string(),
                expense.description.clone(),
                expense.category.clone(),
                names.name_of(expense.paid_by),
                expense.amount.to_decimal_string(),
                expense.status.to_string(),
                names.name_of(split.owed_by),
                split.amount.to_decimal_string(),
            ])?;
        }
    }

    csv.flush()?;
    Ok(())
}

/// Export current balances to CSV
pub fn export_balances_csv<W: Write>(storage: &Storage, writer: W) -> HearthResult<()> {
    let names = MemberNames::new(&storage.members.get_all()?);
    let balances = BalanceService::new(storage).compute()?;
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(["Debtor", "Creditor", "Amount", "Splits"])?;
    for balance in &balances {
        csv.write_record([
            names.name_of(balance.debtor),
            names.name_of(balance.creditor),
            balance.amount.to_decimal_string(),
            balance.splits.len().to_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Export recorded settlements to CSV
pub fn export_settlements_csv<W: Write>(storage: &Storage, writer: W) -> HearthResult<()> {
    let names = MemberNames::new(&storage.members.get_all()?);
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(["Settlement ID", "Date", "From", "To", "Amount", "Status", "Note"])?;
    for settlement in storage.settlements.get_all()? {
        csv.write_record([
            settlement.id.as_uuid().to_string(),
            settlement.date.to_string(),
            names.name_of(settlement.from),
            names.name_of(settlement.to),
            settlement.amount.to_decimal_string(),
            settlement.status.to_string(),
            settlement.description.clone(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}
