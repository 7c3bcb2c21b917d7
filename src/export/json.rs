//! JSON Export functionality
//!
//! Exports the whole household, including derived balances and suggested
//! settlements, to a single versioned JSON document.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine;
use crate::error::{HearthError, HearthResult};
use crate::models::{Balance, Chore, Expense, Member, Settlement};
use crate::services::BalanceService;
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full household export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub members: Vec<Member>,
    pub expenses: Vec<Expense>,

    /// Recorded payments
    pub settlements: Vec<Settlement>,

    pub chores: Vec<Chore>,

    /// Outstanding balances at export time
    pub balances: Vec<Balance>,

    /// Payments that would clear `balances`
    pub suggested_settlements: Vec<Settlement>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub member_count: usize,
    pub expense_count: usize,
    pub pending_expense_count: usize,
    pub settlement_count: usize,
    pub chore_count: usize,

    /// Date of the earliest expense
    pub earliest_expense: Option<String>,

    /// Date of the latest expense
    pub latest_expense: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    ///
    /// Fails if the stored data does not pass the balance engine's integrity
    /// checks.
    pub fn from_storage(storage: &Storage) -> HearthResult<Self> {
        let members = storage.members.get_all()?;
        let expenses = storage.expenses.get_all()?;
        let settlements = storage.settlements.get_all()?;
        let chores = storage.chores.get_all()?;

        let balance_service = BalanceService::new(storage);
        let balances = balance_service.compute()?;
        let suggested_settlements = engine::simplify_settlements(&balances);

        let metadata = ExportMetadata {
            member_count: members.len(),
            expense_count: expenses.len(),
            pending_expense_count: expenses.iter().filter(|e| e.is_pending()).count(),
            settlement_count: settlements.len(),
            chore_count: chores.len(),
            earliest_expense: expenses.iter().map(|e| e.date).min().map(|d| d.to_string()),
            latest_expense: expenses.iter().map(|e| e.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            members,
            expenses,
            settlements,
            chores,
            balances,
            suggested_settlements,
            metadata,
        })
    }

    /// Validate the export structure
    ///
    /// Checks the schema version and that every record refers to a member
    /// present in the export.
    pub fn validate(&self) -> HearthResult<()> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(HearthError::Export(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            )));
        }

        engine::validate_batch(&self.members, &self.expenses, &self.settlements)?;

        if let Some(chore) = self
            .chores
            .iter()
            .find(|c| !self.members.iter().any(|m| m.id == c.assigned_to))
        {
            return Err(HearthError::Export(format!(
                "Chore {} is assigned to unknown member {}",
                chore.id, chore.assigned_to
            )));
        }

        Ok(())
    }
}

/// Export the full household to JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: &mut W, pretty: bool) -> HearthResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)?;
    } else {
        serde_json::to_writer(&mut *writer, &export)?;
    }
    writeln!(writer)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::HearthPaths;
    use crate::models::{MemberId, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_household() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let ana = Member::new("Ana");
        let ben = Member::new("Ben");
        let ids = [ana.id, ben.id];
        storage.members.upsert(ana).unwrap();
        storage.members.upsert(ben).unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        storage
            .expenses
            .upsert(Expense::split_evenly(ids[0], Money::from_cents(2000), date, &ids))
            .unwrap();
        storage.chores.upsert(Chore::new("Bins", ids[1])).unwrap();

        (temp_dir, storage)
    }

    #[test]
    fn test_full_export() {
        let (_temp_dir, storage) = create_household();
        let export = FullExport::from_storage(&storage).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.metadata.member_count, 2);
        assert_eq!(export.metadata.pending_expense_count, 1);
        assert_eq!(export.balances.len(), 1);
        assert_eq!(export.suggested_settlements.len(), 1);
        assert_eq!(export.metadata.earliest_expense.as_deref(), Some("2025-03-01"));
        assert!(export.validate().is_ok());
    }

    #[test]
    fn test_export_round_trips_through_json() {
        let (_temp_dir, storage) = create_household();

        let mut buffer = Vec::new();
        export_full_json(&storage, &mut buffer, true).unwrap();

        let parsed: FullExport = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.members.len(), 2);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_dangling_chore() {
        let (_temp_dir, storage) = create_household();
        let mut export = FullExport::from_storage(&storage).unwrap();
        export.chores.push(Chore::new("Ghost", MemberId::new()));

        assert!(matches!(export.validate(), Err(HearthError::Export(_))));
    }

    #[test]
    fn test_validate_rejects_wrong_version() {
        let (_temp_dir, storage) = create_household();
        let mut export = FullExport::from_storage(&storage).unwrap();
        export.schema_version = "0.1.0".into();

        assert!(export.validate().is_err());
    }
}
