//! Audit logger for the append-only audit log
//!
//! Each entry is written as a single JSON line and flushed immediately.

use std::path::PathBuf;

use crate::error::HearthResult;
use crate::storage::file_io::{append_json_line, read_json_lines};

use super::entry::AuditEntry;

/// Handles writing audit entries to the audit log file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new AuditLogger that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an audit entry
    pub fn log(&self, entry: &AuditEntry) -> HearthResult<()> {
        append_json_line(&self.log_path, entry)
    }

    /// Read all audit entries, oldest first
    pub fn read_all(&self) -> HearthResult<Vec<AuditEntry>> {
        read_json_lines(&self.log_path)
    }

    /// Read the most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> HearthResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    /// Get the path to the audit log file
    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}
