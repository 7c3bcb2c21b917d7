//! Settlement model
//!
//! A payment from one member to another. The engine proposes settlements
//! with `Pending` status; recording a payment stores it as `Completed`.
//! Recorded settlements are append-only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{MemberId, SettlementId};
use super::money::Money;

/// Status of a settlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    /// Suggested but not paid
    #[default]
    Pending,
    /// Paid; reduces outstanding balances
    Completed,
}

impl fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// A payment instruction between two members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Unique identifier
    pub id: SettlementId,

    /// Member paying
    pub from: MemberId,

    /// Member receiving
    pub to: MemberId,

    /// Amount paid (always positive)
    pub amount: Money,

    /// Settlement status
    #[serde(default)]
    pub status: SettlementStatus,

    /// Free-form note
    #[serde(default)]
    pub description: String,

    /// Date of the payment (or of the suggestion)
    pub date: NaiveDate,
}

impl Settlement {
    /// Create a suggested (pending) settlement
    pub fn suggested(from: MemberId, to: MemberId, amount: Money, date: NaiveDate) -> Self {
        Self {
            id: SettlementId::new(),
            from,
            to,
            amount,
            status: SettlementStatus::Pending,
            description: String::new(),
            date,
        }
    }

    /// Create a completed settlement
    pub fn completed(
        from: MemberId,
        to: MemberId,
        amount: Money,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: SettlementId::new(),
            from,
            to,
            amount,
            status: SettlementStatus::Completed,
            description: description.into(),
            date,
        }
    }

    /// Check if the payment has been made
    pub fn is_completed(&self) -> bool {
        self.status == SettlementStatus::Completed
    }

    /// Turn a suggestion into a recorded payment
    pub fn complete(&mut self) {
        self.status = SettlementStatus::Completed;
    }

    /// Validate the settlement
    pub fn validate(&self) -> Result<(), SettlementValidationError> {
        if self.from == self.to {
            return Err(SettlementValidationError::SelfPayment);
        }
        if !self.amount.is_positive() {
            return Err(SettlementValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} {}", self.from, self.to, self.amount)
    }
}

/// Validation errors for settlements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementValidationError {
    SelfPayment,
    NonPositiveAmount(Money),
}

impl fmt::Display for SettlementValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfPayment => write!(f, "A member cannot pay themselves"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Settlement amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for SettlementValidationError {}
