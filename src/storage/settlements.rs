//! Settlement repository for JSON storage
//!
//! Recorded settlements are append-only: there is no update or delete.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::HearthError;
use crate::models::{MemberId, Settlement, SettlementId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable settlement data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct SettlementData {
    settlements: Vec<Settlement>,
}

/// Repository for recorded settlements
pub struct SettlementRepository {
    path: PathBuf,
    data: RwLock<Vec<Settlement>>,
}

impl SettlementRepository {
    /// Create a new settlement repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load settlements from disk
    pub fn load(&self) -> Result<(), HearthError> {
        let file_data: SettlementData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data.settlements;

        Ok(())
    }

    /// Save settlements to disk in recording order
    pub fn save(&self) -> Result<(), HearthError> {
        let settlements = self.get_all()?;
        write_json_atomic(&self.path, &SettlementData { settlements })
    }

    /// Append a settlement
    ///
    /// Rejects a settlement whose ID has already been recorded.
    pub fn append(&self, settlement: Settlement) -> Result<(), HearthError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if data.iter().any(|s| s.id == settlement.id) {
            return Err(HearthError::Duplicate {
                entity_type: "Settlement",
                identifier: settlement.id.to_string(),
            });
        }

        data.push(settlement);
        Ok(())
    }

    /// Get a settlement by ID
    pub fn get(&self, id: SettlementId) -> Result<Option<Settlement>, HearthError> {
        let data = self
            .data
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|s| s.id == id).cloned())
    }

    /// Get all settlements in recording order
    pub fn get_all(&self) -> Result<Vec<Settlement>, HearthError> {
        let data = self
            .data
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Get settlements paid or received by `member`
    pub fn get_by_member(&self, member: MemberId) -> Result<Vec<Settlement>, HearthError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|s| s.from == member || s.to == member)
            .collect())
    }

    /// Count settlements
    pub fn count(&self) -> Result<usize, HearthError> {
        let data = self
            .data
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}
