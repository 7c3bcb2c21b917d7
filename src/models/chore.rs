//! Chore model
//!
//! Household chores assigned to members. Only completion data is used, by the
//! chore report.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ChoreId, MemberId};

/// A household chore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chore {
    /// Unique identifier
    pub id: ChoreId,

    /// What needs doing
    pub title: String,

    /// Member responsible
    pub assigned_to: MemberId,

    /// Optional due date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// When the chore was completed, if it has been
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// When the chore was created
    pub created_at: DateTime<Utc>,
}

impl Chore {
    /// Create a new, open chore
    pub fn new(title: impl Into<String>, assigned_to: MemberId) -> Self {
        Self {
            id: ChoreId::new(),
            title: title.into(),
            assigned_to,
            due_date: None,
            completed_at: None,
            created_at: Utc::now(),
        }
    }

    /// Check if the chore has been done
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Mark the chore done at `when`
    pub fn complete_at(&mut self, when: DateTime<Utc>) {
        self.completed_at = Some(when);
    }

    /// Mark the chore done now
    pub fn complete(&mut self) {
        self.complete_at(Utc::now());
    }

    /// Mark the chore as not done
    pub fn reopen(&mut self) {
        self.completed_at = None;
    }

    /// Check if the chore is open and past its due date
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_completed() && self.due_date.is_some_and(|due| due < today)
    }

    /// Completion date, if completed
    pub fn completed_on(&self) -> Option<NaiveDate> {
        self.completed_at.map(|at| at.date_naive())
    }
}

impl fmt::Display for Chore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.is_completed() { "x" } else { " " };
        write!(f, "[{}] {}", mark, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_complete_and_reopen() {
        let mut chore = Chore::new("Take out bins", MemberId::new());
        assert!(!chore.is_completed());
        assert_eq!(chore.to_string(), "[ ] Take out bins");

        let when = Utc.with_ymd_and_hms(2025, 5, 6, 18, 30, 0).unwrap();
        chore.complete_at(when);
        assert!(chore.is_completed());
        assert_eq!(chore.completed_on(), NaiveDate::from_ymd_opt(2025, 5, 6));
        assert_eq!(chore.to_string(), "[x] Take out bins");

        chore.reopen();
        assert!(chore.completed_on().is_none());
    }

    #[test]
    fn test_overdue() {
        let mut chore = Chore::new("Descale kettle", MemberId::new());
        let today = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        assert!(!chore.is_overdue(today));

        chore.due_date = NaiveDate::from_ymd_opt(2025, 5, 9);
        assert!(chore.is_overdue(today));

        chore.complete();
        assert!(!chore.is_overdue(today));
    }
}
