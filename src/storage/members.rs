//! Member repository for JSON storage
//!
//! Manages loading and saving household members to members.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::HearthError;
use crate::models::{Member, MemberId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable member data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct MemberData {
    members: Vec<Member>,
}

/// Repository for member persistence
pub struct MemberRepository {
    path: PathBuf,
    data: RwLock<HashMap<MemberId, Member>>,
    /// Index: normalized name -> member_id
    by_name: RwLock<HashMap<String, MemberId>>,
}

impl MemberRepository {
    /// Create a new member repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_name: RwLock::new(HashMap::new()),
        }
    }

    /// Load members from disk
    pub fn load(&self) -> Result<(), HearthError> {
        let file_data: MemberData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_name = self
            .by_name
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_name.clear();

        for member in file_data.members {
            by_name.insert(Member::normalize_name(&member.name), member.id);
            data.insert(member.id, member);
        }

        Ok(())
    }

    /// Save members to disk, in the order they joined
    pub fn save(&self) -> Result<(), HearthError> {
        let members = self.get_all()?;
        write_json_atomic(&self.path, &MemberData { members })
    }

    /// Get a member by ID
    pub fn get(&self, id: MemberId) -> Result<Option<Member>, HearthError> {
        let data = self
            .data
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all members, oldest first
    pub fn get_all(&self) -> Result<Vec<Member>, HearthError> {
        let data = self
            .data
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut members: Vec<_> = data.values().cloned().collect();
        members.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(members)
    }

    /// Get a member by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Member>, HearthError> {
        let data = self
            .data
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_name = self
            .by_name
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(by_name
            .get(&Member::normalize_name(name))
            .and_then(|id| data.get(id).cloned()))
    }

    /// Insert or update a member
    pub fn upsert(&self, member: Member) -> Result<(), HearthError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_name = self
            .by_name
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        // Drop the old name index when renaming
        if let Some(old) = data.get(&member.id) {
            by_name.remove(&Member::normalize_name(&old.name));
        }

        by_name.insert(Member::normalize_name(&member.name), member.id);
        data.insert(member.id, member);
        Ok(())
    }

    /// Delete a member
    pub fn delete(&self, id: MemberId) -> Result<bool, HearthError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_name = self
            .by_name
            .write()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match data.remove(&id) {
            Some(member) => {
                by_name.remove(&Member::normalize_name(&member.name));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Count members
    pub fn count(&self) -> Result<usize, HearthError> {
        let data = self
            .data
            .read()
            .map_err(|e| HearthError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}
