//! Reports module for Hearth
//!
//! Historical views over the household's data: who paid what, where the
//! money went, and who did the chores. Reports read every expense in range,
//! settled or not.

pub mod categories;
pub mod chores;
pub mod contributions;

pub use categories::{CategoryReport, CategorySpending};
pub use chores::{ChoreReport, MemberChores};
pub use contributions::{ContributionReport, MemberContribution};
