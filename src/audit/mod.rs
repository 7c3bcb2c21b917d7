//! Audit logging system for Hearth
//!
//! Records every create, update and delete of household records with
//! before/after snapshots in an append-only JSONL log.
//!
//! - `AuditEntry`: one operation on one entity.
//! - `AuditLogger`: appends entries to and reads them back from the log file.
//! - `generate_diff`: summarises what changed between two snapshots.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
