//! Chore Report
//!
//! Completed chores per member over a date range, with what is still open.

use std::collections::HashMap;
use std::io::Write;

use chrono::NaiveDate;

use crate::display::OutputStyle;
use crate::error::HearthResult;
use crate::models::MemberId;
use crate::storage::Storage;

/// One member's chore tally
#[derive(Debug, Clone)]
pub struct MemberChores {
    pub member_id: MemberId,
    pub member_name: String,
    /// Chores completed within the range
    pub completed: usize,
    /// Chores still open
    pub pending: usize,
    /// Open chores whose due date is before the end of the range
    pub overdue: usize,
}

/// Chore Report
#[derive(Debug, Clone)]
pub struct ChoreReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rows: Vec<MemberChores>,
}

impl ChoreReport {
    /// Generate a chore report for `[start_date, end_date]`
    pub fn generate(
        storage: &Storage,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> HearthResult<Self> {
        let members = storage.members.get_all()?;
        let mut rows: Vec<MemberChores> = members
            .iter()
            .map(|m| MemberChores {
                member_id: m.id,
                member_name: m.name.clone(),
                completed: 0,
                pending: 0,
                overdue: 0,
            })
            .collect();
        let index: HashMap<MemberId, usize> =
            rows.iter().enumerate().map(|(i, r)| (r.member_id, i)).collect();

        for chore in storage.chores.get_all()? {
            let Some(&i) = index.get(&chore.assigned_to) else {
                continue;
            };
            match chore.completed_on() {
                Some(day) if day >= start_date && day <= end_date => rows[i].completed += 1,
                Some(_) => {}
                None => {
                    rows[i].pending += 1;
                    if chore.is_overdue(end_date) {
                        rows[i].overdue += 1;
                    }
                }
            }
        }

        Ok(Self {
            start_date,
            end_date,
            rows,
        })
    }

    /// Total completed chores in the range
    pub fn total_completed(&self) -> usize {
        self.rows.iter().map(|r| r.completed).sum()
    }

    /// Total open chores
    pub fn total_pending(&self) -> usize {
        self.rows.iter().map(|r| r.pending).sum()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, style: &OutputStyle) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Chore Report: {} to {}\n",
            style.date(self.start_date),
            style.date(self.end_date)
        ));
        output.push_str(&"=".repeat(52));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>10} {:>10} {:>8}\n",
            "Member", "Completed", "Pending", "Overdue"
        ));
        output.push_str(&"-".repeat(52));
        output.push('\n');

        for row in &self.rows {
            output.push_str(&format!(
                "{:<20} {:>10} {:>10} {:>8}\n",
                row.member_name, row.completed, row.pending, row.overdue
            ));
        }

        output.push_str(&"-".repeat(52));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>10} {:>10}\n",
            "TOTAL",
            self.total_completed(),
            self.total_pending()
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> HearthResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Start Date", "End Date", "Member", "Completed", "Pending", "Overdue"])?;

        for row in &self.rows {
            csv.write_record([
                self.start_date.to_string(),
                self.end_date.to_string(),
                row.member_name.clone(),
                row.completed.to_string(),
                row.pending.to_string(),
                row.overdue.to_string(),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::HearthPaths;
    use crate::models::{Chore, Member};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
    }

    #[test]
    fn test_generate_chore_report() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let ana = Member::new("Ana");
        let ben = Member::new("Ben");
        let (a, b) = (ana.id, ben.id);
        storage.members.upsert(ana).unwrap();
        storage.members.upsert(ben).unwrap();

        let mut done_in_range = Chore::new("Dishes", a);
        done_in_range.complete_at(Utc.with_ymd_and_hms(2025, 5, 10, 9, 0, 0).unwrap());
        let mut done_before = Chore::new("Bins", a);
        done_before.complete_at(Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap());
        let mut overdue = Chore::new("Hoover", b);
        overdue.due_date = Some(date(3));
        let open = Chore::new("Windows", b);

        for chore in [done_in_range, done_before, overdue, open] {
            storage.chores.upsert(chore).unwrap();
        }

        let report = ChoreReport::generate(&storage, date(1), date(31)).unwrap();
        let row_a = report.rows.iter().find(|r| r.member_id == a).unwrap();
        assert_eq!((row_a.completed, row_a.pending, row_a.overdue), (1, 0, 0));
        let row_b = report.rows.iter().find(|r| r.member_id == b).unwrap();
        assert_eq!((row_b.completed, row_b.pending, row_b.overdue), (0, 2, 1));

        assert_eq!(report.total_completed(), 1);
        assert_eq!(report.total_pending(), 2);
        assert!(report
            .format_terminal(&OutputStyle::default())
            .contains("Overdue"));

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert_eq!(csv.lines().count(), 3);
    }
}
