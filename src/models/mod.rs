//! Core data models for Hearth
//!
//! This module contains the data structures of the household ledger:
//! members, expenses with their splits, settlements, derived balances and
//! chores, plus the `Money` and ID newtypes they are built from.

pub mod balance;
pub mod chore;
pub mod expense;
pub mod ids;
pub mod member;
pub mod money;
pub mod settlement;

pub use balance::Balance;
pub use chore::Chore;
pub use expense::{Expense, ExpenseStatus, Split, DEFAULT_CATEGORY};
pub use ids::{ChoreId, ExpenseId, MemberId, SettlementId};
pub use member::Member;
pub use money::Money;
pub use settlement::{Settlement, SettlementStatus};
