//! Expense service
//!
//! Business logic for shared expenses: recording them with even or custom
//! splits, filtering, settling and deleting.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::engine;
use crate::error::{HearthError, HearthResult};
use crate::models::{Expense, ExpenseId, ExpenseStatus, MemberId, Money, DEFAULT_CATEGORY};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Filter by status
    pub status: Option<ExpenseStatus>,
    /// Filter by category (case-insensitive)
    pub category: Option<String>,
    /// Only expenses paid by or split with this member
    pub member: Option<MemberId>,
    /// Filter by date range start
    pub start_date: Option<NaiveDate>,
    /// Filter by date range end
    pub end_date: Option<NaiveDate>,
    /// Maximum number of expenses to return (most recent first)
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by status
    pub fn status(mut self, status: ExpenseStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filter by category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by member
    pub fn member(mut self, member: MemberId) -> Self {
        self.member = Some(member);
        self
    }

    /// Filter by date range
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for recording a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub description: String,
    pub amount: Money,
    pub paid_by: MemberId,
    pub category: Option<String>,
    pub date: NaiveDate,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record an expense split evenly among `participants`
    ///
    /// An empty participant list means every member of the household.
    pub fn add_even(&self, input: NewExpense, participants: &[MemberId]) -> HearthResult<Expense> {
        check_amount(input.amount)?;

        let participants = if participants.is_empty() {
            self.storage
                .members
                .get_all()?
                .into_iter()
                .map(|m| m.id)
                .collect()
        } else {
            participants.to_vec()
        };
        check_distinct(participants.iter().copied())?;

        if participants.is_empty() {
            return Err(HearthError::Validation(
                "Add members before recording expenses".into(),
            ));
        }

        let mut expense =
            Expense::split_evenly(input.paid_by, input.amount, input.date, &participants);
        apply_details(&mut expense, &input);
        self.store_new(expense)
    }

    /// Record an expense with explicit per-member shares
    pub fn add_custom(
        &self,
        input: NewExpense,
        shares: &[(MemberId, Money)],
    ) -> HearthResult<Expense> {
        check_amount(input.amount)?;
        check_distinct(shares.iter().map(|(member, _)| *member))?;

        let mut expense = Expense::new(input.paid_by, input.amount, input.date);
        for (member, amount) in shares {
            expense.add_split(*member, *amount);
        }
        apply_details(&mut expense, &input);
        self.store_new(expense)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> HearthResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by full or short ID string
    pub fn find(&self, identifier: &str) -> HearthResult<Option<Expense>> {
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return self.storage.expenses.get(id);
        }

        Ok(self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .find(|e| e.id.to_string() == identifier))
    }

    /// Find an expense, failing with `NotFound` if there is none
    pub fn require(&self, identifier: &str) -> HearthResult<Expense> {
        self.find(identifier)?
            .ok_or_else(|| HearthError::expense_not_found(identifier))
    }

    /// List expenses with optional filtering
    ///
    /// Results are ordered oldest first; a limit keeps the most recent ones.
    pub fn list(&self, filter: ExpenseFilter) -> HearthResult<Vec<Expense>> {
        let mut expenses = match filter.member {
            Some(member) => self.storage.expenses.get_by_member(member)?,
            None => self.storage.expenses.get_all()?,
        };

        if let Some(start) = filter.start_date {
            expenses.retain(|e| e.date >= start);
        }
        if let Some(end) = filter.end_date {
            expenses.retain(|e| e.date <= end);
        }
        if let Some(status) = filter.status {
            expenses.retain(|e| e.status == status);
        }
        if let Some(category) = &filter.category {
            let category = normalize_category(category);
            expenses.retain(|e| e.category == category);
        }

        if let Some(limit) = filter.limit {
            let start = expenses.len().saturating_sub(limit);
            expenses.drain(..start);
        }

        Ok(expenses)
    }

    /// Mark an expense as settled
    pub fn settle(&self, id: ExpenseId) -> HearthResult<Expense> {
        self.set_status(id, ExpenseStatus::Settled)
    }

    /// Mark a settled expense as pending again
    pub fn reopen(&self, id: ExpenseId) -> HearthResult<Expense> {
        self.set_status(id, ExpenseStatus::Pending)
    }

    fn set_status(&self, id: ExpenseId, status: ExpenseStatus) -> HearthResult<Expense> {
        let mut expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| HearthError::expense_not_found(id.to_string()))?;

        if expense.status == status {
            return Err(HearthError::Conflict(format!(
                "Expense {} is already {}",
                id,
                status.to_string().to_lowercase()
            )));
        }

        let before = expense.clone();
        expense.set_status(status);

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_update(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &before,
            &expense,
        )?;

        tracing::info!(expense = %expense.id, status = %status, "changed expense status");
        Ok(expense)
    }

    /// Delete a pending expense
    ///
    /// Settled expenses are part of the household's history and cannot be
    /// deleted; reopen them first.
    pub fn delete(&self, id: ExpenseId) -> HearthResult<Expense> {
        let expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| HearthError::expense_not_found(id.to_string()))?;

        if !expense.is_pending() {
            return Err(HearthError::Conflict(format!(
                "Expense {} is settled and cannot be deleted. Reopen it first.",
                id
            )));
        }

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        tracing::info!(expense = %expense.id, "deleted expense");
        Ok(expense)
    }

    /// Count all expenses
    pub fn count(&self) -> HearthResult<usize> {
        self.storage.expenses.count()
    }

    fn store_new(&self, expense: Expense) -> HearthResult<Expense> {
        let members = self.storage.members.get_all()?;
        engine::validate_batch(&members, std::slice::from_ref(&expense), &[])?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        tracing::info!(
            expense = %expense.id,
            amount = %expense.amount,
            splits = expense.splits.len(),
            "recorded expense"
        );
        Ok(expense)
    }
}

fn check_amount(amount: Money) -> HearthResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(HearthError::Validation(format!(
            "Expense amount must be positive, got {}",
            amount
        )))
    }
}

fn check_distinct(members: impl Iterator<Item = MemberId>) -> HearthResult<()> {
    let mut seen = std::collections::BTreeSet::new();
    for member in members {
        if !seen.insert(member) {
            return Err(HearthError::Validation(format!(
                "Member {} is listed more than once",
                member
            )));
        }
    }
    Ok(())
}

fn apply_details(expense: &mut Expense, input: &NewExpense) {
    expense.description = input.description.trim().to_string();
    expense.category = input
        .category
        .as_deref()
        .map(normalize_category)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
}

fn normalize_category(category: &str) -> String {
    category.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::HearthPaths;
    use crate::models::Member;
    use tempfile::TempDir;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn create_test_storage() -> (TempDir, Storage, Vec<MemberId>) {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let ids = ["Ana", "Ben", "Cal"]
            .iter()
            .map(|name| {
                let member = Member::new(*name);
                let id = member.id;
                storage.members.upsert(member).unwrap();
                id
            })
            .collect();
        (temp_dir, storage, ids)
    }

    fn input(paid_by: MemberId, cents: i64, day: u32) -> NewExpense {
        NewExpense {
            description: " Groceries ".into(),
            amount: Money::from_cents(cents),
            paid_by,
            category: Some("Food".into()),
            date: date(day),
        }
    }

    #[test]
    fn test_add_even_defaults_to_everyone() {
        let (_temp_dir, storage, ids) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service.add_even(input(ids[0], 1000, 1), &[]).unwrap();

        assert_eq!(expense.description, "Groceries");
        assert_eq!(expense.category, "food");
        let shares: Vec<i64> = expense.splits.iter().map(|s| s.amount.cents()).collect();
        assert_eq!(shares, vec![334, 333, 333]);
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_add_even_subset() {
        let (_temp_dir, storage, ids) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service
            .add_even(input(ids[0], 1000, 1), &[ids[0], ids[1]])
            .unwrap();
        assert_eq!(expense.splits.len(), 2);
        assert_eq!(expense.share_of(ids[2]), Money::zero());
    }

    #[test]
    fn test_add_custom_mismatch_is_integrity_error() {
        let (_temp_dir, storage, ids) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let result = service.add_custom(
            input(ids[0], 1000, 1),
            &[(ids[1], Money::from_cents(400)), (ids[2], Money::from_cents(400))],
        );
        assert!(result.unwrap_err().is_integrity());
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_add_with_unknown_member_is_rejected() {
        let (_temp_dir, storage, ids) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let stranger = MemberId::new();
        let result = service.add_even(input(ids[0], 900, 1), &[ids[0], stranger]);
        assert!(result.unwrap_err().is_integrity());
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let (_temp_dir, storage, ids) = create_test_storage();
        let service = ExpenseService::new(&storage);

        assert!(service
            .add_even(input(ids[0], 0, 1), &[])
            .unwrap_err()
            .is_validation());
        assert!(service
            .add_even(input(ids[0], 500, 1), &[ids[1], ids[1]])
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_list_filters() {
        let (_temp_dir, storage, ids) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let first = service.add_even(input(ids[0], 900, 1), &[]).unwrap();
        let mut rent = input(ids[1], 3000, 5);
        rent.category = Some("Rent".into());
        service.add_even(rent, &[ids[1], ids[2]]).unwrap();
        service.add_even(input(ids[2], 600, 9), &[ids[2], ids[1]]).unwrap();
        service.settle(first.id).unwrap();

        assert_eq!(service.list(ExpenseFilter::new()).unwrap().len(), 3);
        assert_eq!(
            service
                .list(ExpenseFilter::new().status(ExpenseStatus::Pending))
                .unwrap()
                .len(),
            2
        );
        assert_eq!(
            service.list(ExpenseFilter::new().category("RENT")).unwrap().len(),
            1
        );
        assert_eq!(
            service
                .list(ExpenseFilter::new().member(ids[0]))
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            service
                .list(ExpenseFilter::new().date_range(date(2), date(9)))
                .unwrap()
                .len(),
            2
        );

        let latest = service.list(ExpenseFilter::new().limit(1)).unwrap();
        assert_eq!(latest[0].date, date(9));
    }

    #[test]
    fn test_settle_and_reopen() {
        let (_temp_dir, storage, ids) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service.add_even(input(ids[0], 900, 1), &[]).unwrap();
        let settled = service.settle(expense.id).unwrap();
        assert_eq!(settled.status, ExpenseStatus::Settled);

        assert!(matches!(
            service.settle(expense.id),
            Err(HearthError::Conflict(_))
        ));

        let reopened = service.reopen(expense.id).unwrap();
        assert!(reopened.is_pending());
    }

    #[test]
    fn test_delete_only_pending() {
        let (_temp_dir, storage, ids) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service.add_even(input(ids[0], 900, 1), &[]).unwrap();
        service.settle(expense.id).unwrap();
        assert!(matches!(
            service.delete(expense.id),
            Err(HearthError::Conflict(_))
        ));

        service.reopen(expense.id).unwrap();
        service.delete(expense.id).unwrap();
        assert!(service.get(expense.id).unwrap().is_none());
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp_dir, storage, ids) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service.add_even(input(ids[0], 900, 1), &[]).unwrap();
        let found = service.require(&expense.id.to_string()).unwrap();
        assert_eq!(found.id, expense.id);
        assert!(service.require("exp-00000000").unwrap_err().is_not_found());
    }
}
