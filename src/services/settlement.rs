//! Settlement service
//!
//! Records payments between members and turns balance suggestions into
//! recorded payments. Recorded settlements are never edited or deleted.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{HearthError, HearthResult};
use crate::models::{MemberId, Money, Settlement};
use crate::storage::Storage;

use super::balance::BalanceService;

/// Service for settlement management
pub struct SettlementService<'a> {
    storage: &'a Storage,
}

impl<'a> SettlementService<'a> {
    /// Create a new settlement service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a completed payment from one member to another
    pub fn record(
        &self,
        from: MemberId,
        to: MemberId,
        amount: Money,
        date: NaiveDate,
        description: &str,
    ) -> HearthResult<Settlement> {
        for member in [from, to] {
            self.storage
                .members
                .get(member)?
                .ok_or_else(|| HearthError::member_not_found(member.to_string()))?;
        }

        let settlement = Settlement::completed(from, to, amount, date, description.trim());
        settlement
            .validate()
            .map_err(|e| HearthError::Validation(e.to_string()))?;

        self.append(&settlement)?;
        self.storage.settlements.save()?;

        tracing::info!(
            settlement = %settlement.id,
            from = %from,
            to = %to,
            amount = %amount,
            "recorded settlement"
        );
        Ok(settlement)
    }

    /// List recorded settlements, optionally only those involving `member`
    pub fn list(&self, member: Option<MemberId>) -> HearthResult<Vec<Settlement>> {
        match member {
            Some(member) => self.storage.settlements.get_by_member(member),
            None => self.storage.settlements.get_all(),
        }
    }

    /// Suggested payments for the current balances, not recorded
    pub fn suggest(&self) -> HearthResult<Vec<Settlement>> {
        BalanceService::new(self.storage).suggest()
    }

    /// Record every current suggestion as a completed payment dated `date`
    ///
    /// Returns the recorded settlements; empty when everyone is square.
    pub fn settle_up(&self, date: NaiveDate) -> HearthResult<Vec<Settlement>> {
        let mut recorded = Vec::new();

        for mut settlement in self.suggest()? {
            settlement.complete();
            settlement.date = date;
            settlement.description = "settle up".to_string();
            self.append(&settlement)?;
            recorded.push(settlement);
        }

        if !recorded.is_empty() {
            self.storage.settlements.save()?;
        }

        tracing::info!(count = recorded.len(), "settled up");
        Ok(recorded)
    }

    fn append(&self, settlement: &Settlement) -> HearthResult<()> {
        self.storage.settlements.append(settlement.clone())?;
        self.storage.log_create(
            EntityType::Settlement,
            settlement.id.to_string(),
            Some(format!("{} -> {}", settlement.from, settlement.to)),
            settlement,
        )
    }
}
