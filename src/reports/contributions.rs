//! Contribution Report
//!
//! How much each member paid versus how much they owed over a date range.
//! Settled expenses count here even though they no longer affect balances.

use std::collections::HashMap;
use std::io::Write;

use chrono::NaiveDate;

use crate::display::OutputStyle;
use crate::error::HearthResult;
use crate::models::{MemberId, Money};
use crate::storage::Storage;

/// One member's contribution row
#[derive(Debug, Clone)]
pub struct MemberContribution {
    pub member_id: MemberId,
    pub member_name: String,
    /// Total of expenses this member paid for
    pub paid: Money,
    /// Total of the shares this member owed
    pub share: Money,
    /// Number of expenses this member paid for
    pub expense_count: usize,
}

impl MemberContribution {
    /// Paid minus owed; positive means the member carried others
    pub fn net(&self) -> Money {
        self.paid - self.share
    }
}

/// Contribution Report
#[derive(Debug, Clone)]
pub struct ContributionReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// One row per member, in household order
    pub rows: Vec<MemberContribution>,
    /// Total spent by the household in the range
    pub total: Money,
    pub expense_count: usize,
}

impl ContributionReport {
    /// Generate a contribution report for `[start_date, end_date]`
    pub fn generate(
        storage: &Storage,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> HearthResult<Self> {
        let members = storage.members.get_all()?;
        let expenses = storage.expenses.get_by_date_range(start_date, end_date)?;

        let mut rows: Vec<MemberContribution> = members
            .iter()
            .map(|m| MemberContribution {
                member_id: m.id,
                member_name: m.name.clone(),
                paid: Money::zero(),
                share: Money::zero(),
                expense_count: 0,
            })
            .collect();
        let index: HashMap<MemberId, usize> =
            rows.iter().enumerate().map(|(i, r)| (r.member_id, i)).collect();

        let mut total = Money::zero();
        for expense in &expenses {
            total += expense.amount;
            if let Some(&i) = index.get(&expense.paid_by) {
                rows[i].paid += expense.amount;
                rows[i].expense_count += 1;
            }
            for split in &expense.splits {
                if let Some(&i) = index.get(&split.owed_by) {
                    rows[i].share += split.amount;
                }
            }
        }

        Ok(Self {
            start_date,
            end_date,
            rows,
            total,
            expense_count: expenses.len(),
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, style: &OutputStyle) -> String {
        let name_width = self
            .rows
            .iter()
            .map(|r| r.member_name.chars().count())
            .max()
            .unwrap_or(6)
            .max(6);

        let mut output = String::new();
        output.push_str(&format!(
            "Contribution Report: {} to {}\n",
            style.date(self.start_date),
            style.date(self.end_date)
        ));
        output.push_str(&"=".repeat(name_width + 44));
        output.push('\n');

        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {:>12}  {:>12}  {:>4}\n",
            "Member", "Paid", "Share", "Net", "#",
        ));
        output.push_str(&"-".repeat(name_width + 44));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<name_width$}  {:>12}  {:>12}  {:>12}  {:>4}\n",
                row.member_name,
                style.money(row.paid),
                style.money(row.share),
                style.money(row.net()),
                row.expense_count,
            ));
        }

        output.push_str(&"-".repeat(name_width + 44));
        output.push('\n');
        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {:>12}  {:>12}  {:>4}\n",
            "TOTAL",
            style.money(self.total),
            "",
            "",
            self.expense_count,
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> HearthResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Start Date", "End Date", "Member", "Paid", "Share", "Net", "Expenses"])?;

        for row in &self.rows {
            csv.write_record([
                self.start_date.to_string(),
                self.end_date.to_string(),
                row.member_name.clone(),
                row.paid.to_decimal_string(),
                row.share.to_decimal_string(),
                row.net().to_decimal_string(),
                row.expense_count.to_string(),
            ])?;
        }

        csv.write_record([
            self.start_date.to_string(),
            self.end_date.to_string(),
            "TOTAL".to_string(),
            self.total.to_decimal_string(),
            String::new(),
            String::new(),
            self.expense_count.to_string(),
        ])?;

        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::HearthPaths;
    use crate::models::{Expense, Member};
    use tempfile::TempDir;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn create_test_storage() -> (TempDir, Storage, MemberId, MemberId) {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let ana = Member::new("Ana");
        let ben = Member::new("Ben");
        let ids = (ana.id, ben.id);
        storage.members.upsert(ana).unwrap();
        storage.members.upsert(ben).unwrap();
        (temp_dir, storage, ids.0, ids.1)
    }

    #[test]
    fn test_settled_expenses_are_counted() {
        let (_temp_dir, storage, ana, ben) = create_test_storage();

        let mut settled = Expense::split_evenly(ana, Money::from_cents(5000), date(10), &[ana, ben]);
        settled.settle();
        storage.expenses.upsert(settled).unwrap();
        storage
            .expenses
            .upsert(Expense::split_evenly(ben, Money::from_cents(1000), date(12), &[ana, ben]))
            .unwrap();
        // Outside the range
        storage
            .expenses
            .upsert(Expense::split_evenly(ben, Money::from_cents(9999), date(28), &[ana, ben]))
            .unwrap();

        let report = ContributionReport::generate(&storage, date(1), date(20)).unwrap();

        assert_eq!(report.total, Money::from_cents(6000));
        assert_eq!(report.expense_count, 2);

        let ana_row = report.rows.iter().find(|r| r.member_id == ana).unwrap();
        assert_eq!(ana_row.paid, Money::from_cents(5000));
        assert_eq!(ana_row.share, Money::from_cents(3000));
        assert_eq!(ana_row.net(), Money::from_cents(2000));

        let ben_row = report.rows.iter().find(|r| r.member_id == ben).unwrap();
        assert_eq!(ben_row.net(), Money::from_cents(-2000));
    }

    #[test]
    fn test_format_and_csv() {
        let (_temp_dir, storage, ana, ben) = create_test_storage();
        storage
            .expenses
            .upsert(Expense::split_evenly(ana, Money::from_cents(1234), date(3), &[ana, ben]))
            .unwrap();

        let report = ContributionReport::generate(&storage, date(1), date(31)).unwrap();

        let text = report.format_terminal(&OutputStyle::default());
        assert!(text.contains("Contribution Report"));
        assert!(text.contains("Ana"));
        assert!(text.contains("$12.34"));

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert!(csv.starts_with("Start Date,End Date,Member,Paid,Share,Net,Expenses"));
        assert!(csv.contains("Ana,12.34,6.17,6.17,1"));
        assert!(csv.contains("TOTAL,12.34,,,1"));
    }
}
