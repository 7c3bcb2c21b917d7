//! Custom error types for Hearth
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Data-quality problems found by the balance
//! engine are reported as [`IntegrityError`] and wrapped in [`HearthError`].

use thiserror::Error;

use crate::models::{ExpenseId, MemberId, Money, SettlementId};

/// Data-integrity failures detected while validating a batch of records
///
/// Any one of these aborts the whole computation; the engine never repairs
/// or skips bad records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("member {0} appears more than once in the member set")]
    DuplicateMember(MemberId),

    #[error("expense {expense} is paid by unknown member {member}")]
    UnknownPayer { expense: ExpenseId, member: MemberId },

    #[error("expense {expense} has a split owed by unknown member {member}")]
    UnknownSplitMember { expense: ExpenseId, member: MemberId },

    #[error("settlement {settlement} references unknown member {member}")]
    UnknownSettlementMember {
        settlement: SettlementId,
        member: MemberId,
    },

    #[error("expense {expense} has non-positive amount {amount}")]
    NonPositiveAmount { expense: ExpenseId, amount: Money },

    #[error("expense {0} has no splits")]
    NoSplits(ExpenseId),

    #[error("expense {expense} has a negative split of {amount} for {member}")]
    NegativeSplit {
        expense: ExpenseId,
        member: MemberId,
        amount: Money,
    },

    #[error("expense {expense} splits total {splits_total}, expected {amount}")]
    SplitsMismatch {
        expense: ExpenseId,
        amount: Money,
        splits_total: Money,
    },

    #[error("amounts in the batch overflow the supported total")]
    AmountOverflow,
}

/// The main error type for Hearth operations
#[derive(Error, Debug)]
pub enum HearthError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Inconsistent household data
    #[error("Integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Entity cannot be changed in its current state
    #[error("{0}")]
    Conflict(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl HearthError {
    /// Create a "not found" error for members
    pub fn member_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Member",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for chores
    pub fn chore_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Chore",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a data-integrity error
    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::Integrity(_))
    }
}

impl From<std::io::Error> for HearthError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for HearthError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for HearthError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for Hearth operations
pub type HearthResult<T> = Result<T, HearthError>;
