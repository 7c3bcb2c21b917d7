//! Chore repository for JSON storage
//!
//! Manages loading and saving chores to chores.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::HearthError;
use crate::models::{Chore, ChoreId, MemberId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable chore data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ChoreData {
    chores: Vec<Chore>,
}

/// Repository for chore persistence
pub struct ChoreRepository {
    path: PathBuf,
    data: RwLock<HashMap<ChoreId, Chore>>,
}

impl ChoreRepository {
    /// Create a new chore repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load chores from disk
    pub fn load(&self) -> Result<(), HearthError> {
        let file_data: ChoreData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for chore in file_data.chores {
            data.insert(chore.id, chore);
        }

        Ok(())
    }

    /// Save chores to disk
    pub fn save(&self) -> Result<(), HearthError> {
        let chores = self.get_all()?;
        write_json_atomic(&self.path, &ChoreData { chores })
    }

    /// Get a chore by ID
    pub fn get(&self, id: ChoreId) -> Result<Option<Chore>, HearthError> {
        let data = self
            .data
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all chores, oldest first
    pub fn get_all(&self) -> Result<Vec<Chore>, HearthError> {
        let data = self
            .data
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut chores: Vec<_> = data.values().cloned().collect();
        chores.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(chores)
    }

    /// Get chores assigned to `member`
    pub fn get_by_member(&self, member: MemberId) -> Result<Vec<Chore>, HearthError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|c| c.assigned_to == member)
            .collect())
    }

    /// Insert or update a chore
    pub fn upsert(&self, chore: Chore) -> Result<(), HearthError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(chore.id, chore);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_upsert_and_filter_by_member() {
        let temp_dir = TempDir::new().unwrap();
        let repo = ChoreRepository::new(temp_dir.path().join("chores.json"));
        let a = MemberId::new();
        let b = MemberId::new();

        repo.upsert(Chore::new("Hoover", a)).unwrap();
        repo.upsert(Chore::new("Dishes", a)).unwrap();
        repo.upsert(Chore::new("Laundry", b)).unwrap();

        assert_eq!(repo.get_all().unwrap().len(), 3);
        assert_eq!(repo.get_by_member(a).unwrap().len(), 2);
    }

    #[test]
    fn test_save_and_reload_keeps_completion() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chores.json");
        let repo = ChoreRepository::new(path.clone());

        let mut chore = Chore::new("Mop", MemberId::new());
        chore.complete();
        repo.upsert(chore.clone()).unwrap();
        repo.save().unwrap();

        let reloaded = ChoreRepository::new(path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.get(chore.id).unwrap(), Some(chore));
    }
}
