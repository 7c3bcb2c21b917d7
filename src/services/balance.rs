//! Balance service
//!
//! Runs the balance engine over the stored household.

use crate::engine;
use crate::error::{HearthError, HearthResult};
use crate::models::{Balance, Member, MemberId, Money, Settlement, SettlementStatus};
use crate::storage::Storage;

/// Service for computing balances from stored data
pub struct BalanceService<'a> {
    storage: &'a Storage,
}

/// One member's position with the balances that involve them
#[derive(Debug, Clone)]
pub struct MemberSummary {
    pub member: Member,
    /// Positive when the household owes this member
    pub net: Money,
    /// Balances where the member is the debtor
    pub owes: Vec<Balance>,
    /// Balances where the member is the creditor
    pub owed: Vec<Balance>,
}

impl<'a> BalanceService<'a> {
    /// Create a new balance service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Current balances: pending expenses less recorded payments
    pub fn compute(&self) -> HearthResult<Vec<Balance>> {
        let members = self.storage.members.get_all()?;
        let expenses = self.storage.expenses.get_all()?;
        let payments: Vec<Settlement> = self
            .storage
            .settlements
            .get_all()?
            .into_iter()
            .filter(|s| s.status == SettlementStatus::Completed)
            .collect();

        let balances =
            engine::compute_balances_with_settlements(&members, &expenses, &payments)?;
        Ok(balances)
    }

    /// Suggested payments that would clear every current balance
    pub fn suggest(&self) -> HearthResult<Vec<Settlement>> {
        Ok(engine::simplify_settlements(&self.compute()?))
    }

    /// Summarise one member's position
    pub fn member_summary(&self, id: MemberId) -> HearthResult<MemberSummary> {
        let member = self
            .storage
            .members
            .get(id)?
            .ok_or_else(|| HearthError::member_not_found(id.to_string()))?;

        let balances = self.compute()?;
        let net = balances.iter().map(|b| b.signed_for(id)).sum();
        let (owes, owed): (Vec<_>, Vec<_>) = balances
            .into_iter()
            .filter(|b| b.involves(id))
            .partition(|b| b.debtor == id);

        Ok(MemberSummary {
            member,
            net,
            owes,
            owed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::HearthPaths;
    use crate::models::{Expense, ExpenseStatus};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    /// Ana pays 30 and Ben pays 60, each split three ways
    fn create_household() -> (TempDir, Storage, [MemberId; 3]) {
        let temp_dir = TempDir::new().unwrap();
        let paths = HearthPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        let members: Vec<Member> = ["Ana", "Ben", "Cal"].iter().map(|n| Member::new(*n)).collect();
        let ids = [members[0].id, members[1].id, members[2].id];
        for member in members {
            storage.members.upsert(member).unwrap();
        }

        for (payer, cents) in [(ids[0], 3000), (ids[1], 6000)] {
            let expense = Expense::split_evenly(payer, Money::from_cents(cents), date(), &ids);
            storage.expenses.upsert(expense).unwrap();
        }

        (temp_dir, storage, ids)
    }

    #[test]
    fn test_compute_scenario() {
        let (_temp_dir, storage, [_, ben, cal]) = create_household();
        let service = BalanceService::new(&storage);

        let balances = service.compute().unwrap();
        assert_eq!(balances.len(), 3);

        let suggestions = service.suggest().unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].from, cal);
        assert_eq!(suggestions[0].to, ben);
        assert_eq!(suggestions[0].amount, Money::from_cents(3000));
    }

    #[test]
    fn test_completed_payment_clears_balance() {
        let (_temp_dir, storage, [_, ben, cal]) = create_household();
        storage
            .settlements
            .append(Settlement::completed(cal, ben, Money::from_cents(3000), date(), ""))
            .unwrap();

        // Pending suggestions in storage must not count as payments
        storage
            .settlements
            .append(Settlement::suggested(cal, ben, Money::from_cents(3000), date()))
            .unwrap();

        let service = BalanceService::new(&storage);
        assert!(service.suggest().unwrap().is_empty());
    }

    #[test]
    fn test_member_summary() {
        let (_temp_dir, storage, [ana, ben, cal]) = create_household();
        let service = BalanceService::new(&storage);

        let summary = service.member_summary(cal).unwrap();
        assert_eq!(summary.net, Money::from_cents(-3000));
        assert_eq!(summary.owes.len(), 2);
        assert!(summary.owed.is_empty());

        let summary = service.member_summary(ana).unwrap();
        assert_eq!(summary.net, Money::zero());
        assert_eq!(summary.owes.len(), 1);
        assert_eq!(summary.owed.len(), 1);

        assert_eq!(service.member_summary(ben).unwrap().net, Money::from_cents(3000));
        assert!(service.member_summary(MemberId::new()).unwrap_err().is_not_found());
    }

    #[test]
    fn test_settled_expenses_ignored() {
        let (_temp_dir, storage, _) = create_household();
        for mut expense in storage.expenses.get_all().unwrap() {
            expense.status = ExpenseStatus::Settled;
            storage.expenses.upsert(expense).unwrap();
        }

        let service = BalanceService::new(&storage);
        assert!(service.compute().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_data_surfaces_integrity_error() {
        let (_temp_dir, storage, ids) = create_household();
        let ghost = Expense::split_evenly(MemberId::new(), Money::from_cents(100), date(), &ids);
        storage.expenses.upsert(ghost).unwrap();

        let service = BalanceService::new(&storage);
        assert!(service.compute().unwrap_err().is_integrity());
    }
}
