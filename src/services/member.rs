//! Member service
//!
//! Business logic for household members: adding, renaming and removing, with
//! name uniqueness and reference checks.

use crate::audit::EntityType;
use crate::error::{HearthError, HearthResult};
use crate::models::{Member, MemberId};
use crate::storage::Storage;

/// Service for member management
pub struct MemberService<'a> {
    storage: &'a Storage,
}

impl<'a> MemberService<'a> {
    /// Create a new member service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a new member
    pub fn add(&self, name: &str) -> HearthResult<Member> {
        let name = name.trim();
        self.ensure_name_free(name, None)?;

        let member = Member::new(name);
        member
            .validate()
            .map_err(|e| HearthError::Validation(e.to_string()))?;

        self.storage.members.upsert(member.clone())?;
        self.storage.members.save()?;

        self.storage.log_create(
            EntityType::Member,
            member.id.to_string(),
            Some(member.name.clone()),
            &member,
        )?;

        tracing::info!(member = %member.id, name = %member.name, "added member");
        Ok(member)
    }

    /// Get a member by ID
    pub fn get(&self, id: MemberId) -> HearthResult<Option<Member>> {
        self.storage.members.get(id)
    }

    /// Find a member by name or ID string
    pub fn find(&self, identifier: &str) -> HearthResult<Option<Member>> {
        if let Some(member) = self.storage.members.get_by_name(identifier)? {
            return Ok(Some(member));
        }

        if let Ok(id) = identifier.parse::<MemberId>() {
            return self.storage.members.get(id);
        }

        // Short display form, e.g. "mem-1a2b3c4d"
        Ok(self
            .storage
            .members
            .get_all()?
            .into_iter()
            .find(|m| m.id.to_string() == identifier))
    }

    /// Find a member, failing with `NotFound` if there is none
    pub fn require(&self, identifier: &str) -> HearthResult<Member> {
        self.find(identifier)?
            .ok_or_else(|| HearthError::member_not_found(identifier))
    }

    /// List all members, oldest first
    pub fn list(&self) -> HearthResult<Vec<Member>> {
        self.storage.members.get_all()
    }

    /// Rename a member
    pub fn rename(&self, id: MemberId, new_name: &str) -> HearthResult<Member> {
        let mut member = self
            .storage
            .members
            .get(id)?
            .ok_or_else(|| HearthError::member_not_found(id.to_string()))?;

        let new_name = new_name.trim();
        self.ensure_name_free(new_name, Some(id))?;

        let before = member.clone();
        member.name = new_name.to_string();
        member
            .validate()
            .map_err(|e| HearthError::Validation(e.to_string()))?;

        self.storage.members.upsert(member.clone())?;
        self.storage.members.save()?;

        self.storage.log_update(
            EntityType::Member,
            member.id.to_string(),
            Some(member.name.clone()),
            &before,
            &member,
        )?;

        tracing::info!(member = %member.id, from = %before.name, to = %member.name, "renamed member");
        Ok(member)
    }

    /// Remove a member
    ///
    /// Refused while any expense, settlement or chore still refers to them.
    pub fn remove(&self, id: MemberId) -> HearthResult<Member> {
        let member = self
            .storage
            .members
            .get(id)?
            .ok_or_else(|| HearthError::member_not_found(id.to_string()))?;

        let expenses = self.storage.expenses.get_by_member(id)?.len();
        let settlements = self.storage.settlements.get_by_member(id)?.len();
        let chores = self.storage.chores.get_by_member(id)?.len();

        if expenses + settlements + chores > 0 {
            return Err(HearthError::Conflict(format!(
                "Cannot remove '{}': referenced by {} expense(s), {} settlement(s) and {} chore(s)",
                member.name, expenses, settlements, chores
            )));
        }

        self.storage.members.delete(id)?;
        self.storage.members.save()?;

        self.storage.log_delete(
            EntityType::Member,
            member.id.to_string(),
            Some(member.name.clone()),
            &member,
        )?;

        tracing::info!(member = %member.id, "removed member");
        Ok(member)
    }

    fn ensure_name_free(&self, name: &str, exclude: Option<MemberId>) -> HearthResult<()> {
        if name.is_empty() {
            return Err(HearthError::Validation("Member name cannot be empty".into()));
        }

        match self.storage.members.get_by_name(name)? {
            Some(existing) if Some(existing.id) != exclude => Err(HearthError::Duplicate {
                entity_type: "Member",
                identifier: name.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::HearthPaths;
    use crate::models::Chore;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_add_member() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MemberService::new(&storage);

        let member = service.add("  Robin ").unwrap();
        assert_eq!(member.name, "Robin");
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_add_duplicate_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MemberService::new(&storage);

        service.add("Robin").unwrap();
        let result = service.add("ROBIN");
        assert!(matches!(result, Err(HearthError::Duplicate { .. })));
    }

    #[test]
    fn test_add_empty_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MemberService::new(&storage);

        assert!(service.add("   ").unwrap_err().is_validation());
    }

    #[test]
    fn test_find_by_name_or_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MemberService::new(&storage);

        let created = service.add("Sam").unwrap();
        assert_eq!(service.find("sam").unwrap().unwrap().id, created.id);
        assert_eq!(
            service.find(&created.id.as_uuid().to_string()).unwrap().unwrap().id,
            created.id
        );
        assert_eq!(
            service.find(&created.id.to_string()).unwrap().unwrap().id,
            created.id
        );
        assert!(service.find("nobody").unwrap().is_none());
        assert!(service.require("nobody").unwrap_err().is_not_found());
    }

    #[test]
    fn test_rename() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MemberService::new(&storage);

        let jo = service.add("Jo").unwrap();
        service.add("Kai").unwrap();

        let renamed = service.rename(jo.id, "Joanna").unwrap();
        assert_eq!(renamed.name, "Joanna");
        assert!(service.find("Jo").unwrap().is_none());

        // Same name with different case is allowed for the member itself
        assert!(service.rename(jo.id, "JOANNA").is_ok());
        assert!(matches!(
            service.rename(jo.id, "kai"),
            Err(HearthError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_remove_unreferenced() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MemberService::new(&storage);

        let member = service.add("Lee").unwrap();
        service.remove(member.id).unwrap();
        assert!(service.list().unwrap().is_empty());

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_remove_referenced_is_refused() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MemberService::new(&storage);

        let member = service.add("Lee").unwrap();
        storage.chores.upsert(Chore::new("Bins", member.id)).unwrap();

        let result = service.remove(member.id);
        assert!(matches!(result, Err(HearthError::Conflict(_))));
        assert_eq!(service.list().unwrap().len(), 1);
    }
}
