//! Service layer for Hearth
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, audit logging and calls into the balance engine.

pub mod balance;
pub mod chore;
pub mod expense;
pub mod member;
pub mod settlement;

pub use balance::{BalanceService, MemberSummary};
pub use chore::ChoreService;
pub use expense::{ExpenseFilter, ExpenseService, NewExpense};
pub use member::MemberService;
pub use settlement::SettlementService;
