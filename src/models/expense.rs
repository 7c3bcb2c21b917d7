//! Expense model
//!
//! A shared expense paid by one member and owed in parts (splits) by one or
//! more members. Pending expenses feed the balance engine; settled ones only
//! count toward historical reports.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseId, MemberId};
use super::money::Money;
use crate::error::IntegrityError;

/// Category used when none is given
pub const DEFAULT_CATEGORY: &str = "general";

/// Allowed drift between an expense amount and its splits total, per split
pub const SPLIT_TOLERANCE_CENTS: i64 = 1;

/// Settlement status of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    /// Still contributes to outstanding balances
    #[default]
    Pending,
    /// Paid back; excluded from balances
    Settled,
}

impl ExpenseStatus {
    /// Parse a status from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "open" => Some(Self::Pending),
            "settled" | "closed" => Some(Self::Settled),
            _ => None,
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Settled => write!(f, "Settled"),
        }
    }
}

/// One member's owed share of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    /// The expense this split belongs to
    pub expense_id: ExpenseId,

    /// The member who owes this share
    pub owed_by: MemberId,

    /// Owed amount
    pub amount: Money,
}

impl Split {
    /// Create a new split
    pub fn new(expense_id: ExpenseId, owed_by: MemberId, amount: Money) -> Self {
        Self {
            expense_id,
            owed_by,
            amount,
        }
    }
}

/// A shared household expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// What was bought
    #[serde(default)]
    pub description: String,

    /// Total amount paid (always positive)
    pub amount: Money,

    /// Member who paid
    pub paid_by: MemberId,

    /// Free-form category (groceries, utilities, ...)
    #[serde(default = "default_category")]
    pub category: String,

    /// Date of the expense
    pub date: NaiveDate,

    /// Settlement status
    #[serde(default)]
    pub status: ExpenseStatus,

    /// Per-member shares
    #[serde(default)]
    pub splits: Vec<Split>,

    /// When the expense was created
    pub created_at: DateTime<Utc>,

    /// When the expense was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Expense {
    /// Create a new expense with no splits
    pub fn new(paid_by: MemberId, amount: Money, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            description: String::new(),
            amount,
            paid_by,
            category: default_category(),
            date,
            status: ExpenseStatus::Pending,
            splits: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an expense split evenly among `participants`
    ///
    /// Remainder cents go to the leading participants in the given order.
    pub fn split_evenly(
        paid_by: MemberId,
        amount: Money,
        date: NaiveDate,
        participants: &[MemberId],
    ) -> Self {
        let mut expense = Self::new(paid_by, amount, date);
        let shares = amount.split_evenly(participants.len());
        for (member, share) in participants.iter().zip(shares) {
            expense.add_split(*member, share);
        }
        expense
    }

    /// Add a split owed by `member`
    pub fn add_split(&mut self, member: MemberId, amount: Money) {
        self.splits.push(Split::new(self.id, member, amount));
        self.updated_at = Utc::now();
    }

    /// Check if the expense still counts toward balances
    pub fn is_pending(&self) -> bool {
        self.status == ExpenseStatus::Pending
    }

    /// Set the status
    pub fn set_status(&mut self, status: ExpenseStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Mark as settled
    pub fn settle(&mut self) {
        self.set_status(ExpenseStatus::Settled);
    }

    /// Mark as pending again
    pub fn reopen(&mut self) {
        self.set_status(ExpenseStatus::Pending);
    }

    /// Total of all splits, or `None` if the sum overflows
    pub fn splits_total(&self) -> Option<Money> {
        self.splits
            .iter()
            .try_fold(Money::zero(), |total, s| total.checked_add(s.amount))
    }

    /// Share owed by `member` (zero if they have no split)
    pub fn share_of(&self, member: MemberId) -> Money {
        self.splits
            .iter()
            .filter(|s| s.owed_by == member)
            .map(|s| s.amount)
            .sum()
    }

    /// Check that the expense is internally consistent
    ///
    /// Membership of the payer and split members is checked by the engine,
    /// which knows the member set.
    pub fn check_integrity(&self) -> Result<(), IntegrityError> {
        if !self.amount.is_positive() {
            return Err(IntegrityError::NonPositiveAmount {
                expense: self.id,
                amount: self.amount,
            });
        }

        if self.splits.is_empty() {
            return Err(IntegrityError::NoSplits(self.id));
        }

        if let Some(split) = self.splits.iter().find(|s| s.amount.is_negative()) {
            return Err(IntegrityError::NegativeSplit {
                expense: self.id,
                member: split.owed_by,
                amount: split.amount,
            });
        }

        let splits_total = self.splits_total().ok_or(IntegrityError::AmountOverflow)?;
        let tolerance = SPLIT_TOLERANCE_CENTS * self.splits.len() as i64;
        if (splits_total - self.amount).abs().cents() > tolerance {
            return Err(IntegrityError::SplitsMismatch {
                expense: self.id,
                amount: self.amount,
                splits_total,
            });
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.amount
        )
    }
}
