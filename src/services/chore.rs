//! Chore service

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{HearthError, HearthResult};
use crate::models::{Chore, ChoreId, MemberId};
use crate::storage::Storage;

/// Service for chore management
pub struct ChoreService<'a> {
    storage: &'a Storage,
}

impl<'a> ChoreService<'a> {
    /// Create a new chore service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a chore for `assigned_to`
    pub fn add(
        &self,
        title: &str,
        assigned_to: MemberId,
        due_date: Option<NaiveDate>,
    ) -> HearthResult<Chore> {
        let title = title.trim();
        if title.is_empty() {
            return Err(HearthError::Validation("Chore title cannot be empty".into()));
        }

        self.storage
            .members
            .get(assigned_to)?
            .ok_or_else(|| HearthError::member_not_found(assigned_to.to_string()))?;

        let mut chore = Chore::new(title, assigned_to);
        chore.due_date = due_date;

        self.storage.chores.upsert(chore.clone())?;
        self.storage.chores.save()?;

        self.storage.log_create(
            EntityType::Chore,
            chore.id.to_string(),
            Some(chore.title.clone()),
            &chore,
        )?;

        tracing::info!(chore = %chore.id, "added chore");
        Ok(chore)
    }

    /// Find a chore by full or short ID string
    pub fn find(&self, identifier: &str) -> HearthResult<Option<Chore>> {
        if let Ok(id) = identifier.parse::<ChoreId>() {
            return self.storage.chores.get(id);
        }

        Ok(self
            .storage
            .chores
            .get_all()?
            .into_iter()
            .find(|c| c.id.to_string() == identifier))
    }

    /// Find a chore, failing with `NotFound` if there is none
    pub fn require(&self, identifier: &str) -> HearthResult<Chore> {
        self.find(identifier)?
            .ok_or_else(|| HearthError::chore_not_found(identifier))
    }

    /// List chores, optionally for one member and/or only open ones
    pub fn list(&self, member: Option<MemberId>, pending_only: bool) -> HearthResult<Vec<Chore>> {
        let mut chores = match member {
            Some(member) => self.storage.chores.get_by_member(member)?,
            None => self.storage.chores.get_all()?,
        };
        if pending_only {
            chores.retain(|c| !c.is_completed());
        }
        Ok(chores)
    }

    /// Mark a chore done
    pub fn complete(&self, id: ChoreId) -> HearthResult<Chore> {
        self.update(id, true)
    }

    /// Mark a chore as not done
    pub fn reopen(&self, id: ChoreId) -> HearthResult<Chore> {
        self.update(id, false)
    }

    fn update(&self, id: ChoreId, done: bool) -> HearthResult<Chore> {
        let mut chore = self
            .storage
            .chores
            .get(id)?
            .ok_or_else(|| HearthError::chore_not_found(id.to_string()))?;

        if chore.is_completed() == done {
            let state = if done { "done" } else { "open" };
            return Err(HearthError::Conflict(format!(
                "Chore '{}' is already {}",
                chore.title, state
            )));
        }

        let before = chore.clone();
        if done {
            chore.complete();
        } else {
            chore.reopen();
        }

        self.storage.chores.upsert(chore.clone())?;
        self.storage.chores.save()?;

        self.storage.log_update(
            EntityType::Chore,
            chore.id.to_string(),
            Some(chore.title.clone()),
            &before,
            &chore,
        )?;

        tracing::info!(chore = %chore.id, done, "updated chore");
        Ok(chore)
    }
}
