//! Storage layer for Hearth
//!
//! Provides JSON file storage with atomic writes, per-entity repositories and
//! the audit log.

pub mod chores;
pub mod expenses;
pub mod file_io;
pub mod init;
pub mod members;
pub mod settlements;

pub use chores::ChoreRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use members::MemberRepository;
pub use settlements::SettlementRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::HearthPaths;
use crate::error::HearthResult;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: HearthPaths,
    pub members: MemberRepository,
    pub expenses: ExpenseRepository,
    pub settlements: SettlementRepository,
    pub chores: ChoreRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: HearthPaths) -> HearthResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            members: MemberRepository::new(paths.members_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            settlements: SettlementRepository::new(paths.settlements_file()),
            chores: ChoreRepository::new(paths.chores_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &HearthPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> HearthResult<()> {
        self.members.load()?;
        self.expenses.load()?;
        self.settlements.load()?;
        self.chores.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> HearthResult<()> {
        self.members.save()?;
        self.expenses.save()?;
        self.settlements.save()?;
        self.chores.save()?;
        Ok(())
    }

    /// Check if the household has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record the creation of an entity
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> HearthResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record a change to an entity
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> HearthResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        ))
    }

    /// Record the removal of an entity
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> HearthResult<()> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
