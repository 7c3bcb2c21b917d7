//! Balance model
//!
//! A derived, never-stored record of how much one member owes another after
//! netting every unsettled split between them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::Split;
use super::ids::MemberId;
use super::money::Money;

/// Net debt between two members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Member who owes
    pub debtor: MemberId,

    /// Member who is owed
    pub creditor: MemberId,

    /// Net amount owed (always positive)
    pub amount: Money,

    /// Splits between the two members, in both directions
    #[serde(default)]
    pub splits: Vec<Split>,
}

impl Balance {
    /// Check if `member` is on either side of this balance
    pub fn involves(&self, member: MemberId) -> bool {
        self.debtor == member || self.creditor == member
    }

    /// Signed amount from `member`'s point of view (positive when owed to them)
    pub fn signed_for(&self, member: MemberId) -> Money {
        if self.creditor == member {
            self.amount
        } else if self.debtor == member {
            -self.amount
        } else {
            Money::zero()
        }
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} owes {} {}", self.debtor, self.creditor, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_for() {
        let a = MemberId::new();
        let b = MemberId::new();
        let c = MemberId::new();
        let balance = Balance {
            debtor: a,
            creditor: b,
            amount: Money::from_cents(1200),
            splits: Vec::new(),
        };

        assert_eq!(balance.signed_for(a), Money::from_cents(-1200));
        assert_eq!(balance.signed_for(b), Money::from_cents(1200));
        assert_eq!(balance.signed_for(c), Money::zero());
        assert!(balance.involves(a));
        assert!(!balance.involves(c));
    }
}
