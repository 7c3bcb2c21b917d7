//! Category Report
//!
//! Household spending grouped by expense category for a date range.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::NaiveDate;

use crate::display::report::{format_bar, format_percentage};
use crate::display::OutputStyle;
use crate::error::HearthResult;
use crate::models::Money;
use crate::storage::Storage;

/// Spending in one category
#[derive(Debug, Clone)]
pub struct CategorySpending {
    pub category: String,
    pub total: Money,
    pub expense_count: usize,
    /// Share of the report total, 0-100
    pub percentage: f64,
}

/// Category Report
#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Categories, largest spend first
    pub categories: Vec<CategorySpending>,
    pub total: Money,
    pub expense_count: usize,
}

impl CategoryReport {
    /// Generate a category report for `[start_date, end_date]`
    ///
    /// Settled and pending expenses both count.
    pub fn generate(
        storage: &Storage,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> HearthResult<Self> {
        let expenses = storage.expenses.get_by_date_range(start_date, end_date)?;

        let mut by_category: BTreeMap<String, (Money, usize)> = BTreeMap::new();
        let mut total = Money::zero();
        for expense in &expenses {
            let entry = by_category.entry(expense.category.clone()).or_default();
            entry.0 += expense.amount;
            entry.1 += 1;
            total += expense.amount;
        }

        let mut categories: Vec<CategorySpending> = by_category
            .into_iter()
            .map(|(category, (amount, count))| CategorySpending {
                category,
                total: amount,
                expense_count: count,
                percentage: percentage_of(amount, total),
            })
            .collect();

        // Stable sort, so equal totals stay alphabetical
        categories.sort_by(|a, b| b.total.cmp(&a.total));

        Ok(Self {
            start_date,
            end_date,
            categories,
            total,
            expense_count: expenses.len(),
        })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, style: &OutputStyle) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Category Report: {} to {}\n",
            style.date(self.start_date),
            style.date(self.end_date)
        ));
        output.push_str(&"=".repeat(72));
        output.push('\n');

        output.push_str(&format!(
            "{:<20} {:>12} {:>6} {:>7}  {}\n",
            "Category", "Amount", "Count", "%", ""
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        let max = self
            .categories
            .first()
            .map(|c| c.total.cents() as f64)
            .unwrap_or(0.0);

        for row in &self.categories {
            output.push_str(&format!(
                "{:<20} {:>12} {:>6} {:>7}  {}\n",
                row.category,
                style.money(row.total),
                row.expense_count,
                format_percentage(row.percentage),
                format_bar(row.total.cents() as f64, max, 20),
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>12} {:>6}\n",
            "TOTAL",
            style.money(self.total),
            self.expense_count
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> HearthResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Start Date", "End Date", "Category", "Amount", "Count", "Percentage"])?;

        for row in &self.categories {
            csv.write_record([
                self.start_date.to_string(),
                self.end_date.to_string(),
                row.category.clone(),
                row.total.to_decimal_string(),
                row.expense_count.to_string(),
                format!("{:.2}", row.percentage),
            ])?;
        }

        csv.write_record([
            self.start_date.to_string(),
            self.end_date.to_string(),
            "TOTAL".to_string(),
            self.total.to_decimal_string(),
            self.expense_count.to_string(),
            "100.00".to_string(),
        ])?;

        csv.flush()?;
        Ok(())
    }
}

fn percentage_of(part: Money, total: Money) -> f64 {
    if total.is_zero() {
        0.0
    } else {
        part.cents() as f64 / total.cents() as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::HearthPaths;
    use crate::models::{Expense, Member};
    use tempfile::TempDir;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, day).unwrap()
    }

    #[test]
    fn test_generate_category_report() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let ana = Member::new("Ana");
        let id = ana.id;
        storage.members.upsert(ana).unwrap();

        for (cents, category, day) in [
            (3000, "utilities", 1),
            (6000, "groceries", 2),
            (1000, "groceries", 3),
            (3000, "internet", 4),
        ] {
            let mut expense = Expense::split_evenly(id, Money::from_cents(cents), date(day), &[id]);
            expense.category = category.to_string();
            storage.expenses.upsert(expense).unwrap();
        }

        let report = CategoryReport::generate(&storage, date(1), date(28)).unwrap();
        assert_eq!(report.total, Money::from_cents(13000));

        let names: Vec<_> = report.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["groceries", "internet", "utilities"]);
        assert_eq!(report.categories[0].expense_count, 2);

        let pct_sum: f64 = report.categories.iter().map(|c| c.percentage).sum();
        assert!((pct_sum - 100.0).abs() < 0.001);

        assert!(report
            .format_terminal(&OutputStyle::default())
            .contains("groceries"));

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert_eq!(csv.lines().count(), 5);
        assert!(csv.contains("groceries,70.00,2,53.85"));
    }

    #[test]
    fn test_empty_range() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let report = CategoryReport::generate(&storage, date(1), date(2)).unwrap();
        assert!(report.categories.is_empty());
        assert!(report.total.is_zero());
    }
}
