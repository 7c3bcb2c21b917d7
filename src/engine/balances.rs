//! Pairwise balance computation
//!
//! Reduces pending expense splits (and, optionally, completed settlements)
//! into at most one directed balance per pair of members.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::IntegrityError;
use crate::models::{Balance, Expense, Member, MemberId, Money, Settlement, Split};

/// Running total for one unordered pair, keyed by (lower id, higher id)
///
/// A positive `net` means the lower id owes the higher id.
#[derive(Debug, Default)]
struct PairEntry {
    net: Money,
    splits: Vec<Split>,
}

/// Compute net balances between members from their shared expenses
///
/// Only pending expenses contribute. Self-splits and zero splits are ignored.
/// The whole batch is validated first; any integrity problem aborts with no
/// partial result. Output is sorted by (debtor, creditor) and does not depend
/// on the order of `expenses`.
pub fn compute_balances(
    members: &[Member],
    expenses: &[Expense],
) -> Result<Vec<Balance>, IntegrityError> {
    compute_balances_with_settlements(members, expenses, &[])
}

/// Like [`compute_balances`], also applying completed settlements as payments
///
/// A completed settlement from X to Y reduces what X owes Y. Pending
/// settlements are ignored.
pub fn compute_balances_with_settlements(
    members: &[Member],
    expenses: &[Expense],
    settlements: &[Settlement],
) -> Result<Vec<Balance>, IntegrityError> {
    validate_batch(members, expenses, settlements)?;

    let mut ledger: BTreeMap<(MemberId, MemberId), PairEntry> = BTreeMap::new();

    for expense in expenses.iter().filter(|e| e.is_pending()) {
        for split in &expense.splits {
            if split.owed_by == expense.paid_by || split.amount.is_zero() {
                continue;
            }
            let entry = accrue(&mut ledger, split.owed_by, expense.paid_by, split.amount);
            entry.splits.push(*split);
        }
    }

    for settlement in settlements.iter().filter(|s| s.is_completed()) {
        if settlement.validate().is_err() {
            tracing::warn!(settlement = %settlement.id, "skipping invalid settlement");
            continue;
        }
        // Paying down a debt is a debt in the opposite direction
        accrue(&mut ledger, settlement.to, settlement.from, settlement.amount);
    }

    let mut balances: Vec<Balance> = ledger
        .into_iter()
        .filter(|(_, entry)| !entry.net.is_zero())
        .map(|((low, high), mut entry)| {
            let (debtor, creditor) = if entry.net.is_positive() {
                (low, high)
            } else {
                (high, low)
            };
            entry
                .splits
                .sort_by_key(|s| (s.expense_id, s.owed_by, s.amount));
            Balance {
                debtor,
                creditor,
                amount: entry.net.abs(),
                splits: entry.splits,
            }
        })
        .collect();

    balances.sort_by_key(|b| (b.debtor, b.creditor));

    tracing::debug!(
        members = members.len(),
        expenses = expenses.len(),
        balances = balances.len(),
        "computed balances"
    );

    Ok(balances)
}

/// Validate a batch of records against the member set without computing
///
/// Besides membership and per-expense checks, the total of everything that
/// feeds the balances must fit in a [`Money`]. Every pair balance and net
/// position is bounded by that total.
pub fn validate_batch(
    members: &[Member],
    expenses: &[Expense],
    settlements: &[Settlement],
) -> Result<(), IntegrityError> {
    let known = member_set(members)?;
    validate_expenses(&known, expenses)?;
    validate_settlements(&known, settlements)?;
    ledger_volume(expenses, settlements).map(|_| ())
}

/// Net position per member: total owed to them minus total they owe
///
/// Members that appear in no balance are absent from the map.
pub fn net_positions(balances: &[Balance]) -> BTreeMap<MemberId, Money> {
    let mut nets: BTreeMap<MemberId, Money> = BTreeMap::new();
    for balance in balances {
        *nets.entry(balance.creditor).or_default() += balance.amount;
        *nets.entry(balance.debtor).or_default() -= balance.amount;
    }
    nets
}

// Cannot overflow once validate_batch has bounded the ledger volume
fn accrue(
    ledger: &mut BTreeMap<(MemberId, MemberId), PairEntry>,
    debtor: MemberId,
    creditor: MemberId,
    amount: Money,
) -> &mut PairEntry {
    let (key, signed) = if debtor < creditor {
        ((debtor, creditor), amount)
    } else {
        ((creditor, debtor), -amount)
    };
    let entry = ledger.entry(key).or_default();
    entry.net += signed;
    entry
}

fn ledger_volume(
    expenses: &[Expense],
    settlements: &[Settlement],
) -> Result<Money, IntegrityError> {
    let splits = expenses
        .iter()
        .filter(|e| e.is_pending())
        .flat_map(|e| e.splits.iter().filter(move |s| s.owed_by != e.paid_by))
        .map(|s| s.amount);
    let payments = settlements
        .iter()
        .filter(|s| s.is_completed() && s.validate().is_ok())
        .map(|s| s.amount);

    splits
        .chain(payments)
        .try_fold(Money::zero(), Money::checked_add)
        .ok_or(IntegrityError::AmountOverflow)
}

fn member_set(members: &[Member]) -> Result<BTreeSet<MemberId>, IntegrityError> {
    let mut known = BTreeSet::new();
    for member in members {
        if !known.insert(member.id) {
            return Err(IntegrityError::DuplicateMember(member.id));
        }
    }
    Ok(known)
}

fn validate_expenses(
    known: &BTreeSet<MemberId>,
    expenses: &[Expense],
) -> Result<(), IntegrityError> {
    for expense in expenses {
        if !known.contains(&expense.paid_by) {
            return Err(IntegrityError::UnknownPayer {
                expense: expense.id,
                member: expense.paid_by,
            });
        }
        if let Some(split) = expense.splits.iter().find(|s| !known.contains(&s.owed_by)) {
            return Err(IntegrityError::UnknownSplitMember {
                expense: expense.id,
                member: split.owed_by,
            });
        }
        expense.check_integrity()?;
    }
    Ok(())
}

fn validate_settlements(
    known: &BTreeSet<MemberId>,
    settlements: &[Settlement],
) -> Result<(), IntegrityError> {
    for settlement in settlements {
        for member in [settlement.from, settlement.to] {
            if !known.contains(&member) {
                return Err(IntegrityError::UnknownSettlementMember {
                    settlement: settlement.id,
                    member,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{abc, even, fixed_member};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn find(balances: &[Balance], debtor: MemberId, creditor: MemberId) -> Option<Money> {
        balances
            .iter()
            .find(|b| b.debtor == debtor && b.creditor == creditor)
            .map(|b| b.amount)
    }

    #[test]
    fn test_three_member_scenario() {
        let (members, a, b, c) = abc();
        let expenses = vec![
            even(a, 3000, &[a, b, c]),
            even(b, 6000, &[a, b, c]),
        ];

        let balances = compute_balances(&members, &expenses).unwrap();

        assert_eq!(balances.len(), 3);
        assert_eq!(find(&balances, a, b), Some(Money::from_cents(1000)));
        assert_eq!(find(&balances, c, a), Some(Money::from_cents(1000)));
        assert_eq!(find(&balances, c, b), Some(Money::from_cents(2000)));

        let nets = net_positions(&balances);
        assert_eq!(nets[&a], Money::zero());
        assert_eq!(nets[&b], Money::from_cents(3000));
        assert_eq!(nets[&c], Money::from_cents(-3000));
    }

    #[test]
    fn test_netted_pair_keeps_splits_from_both_directions() {
        let (members, a, b, c) = abc();
        let expenses = vec![
            even(a, 3000, &[a, b, c]),
            even(b, 6000, &[a, b, c]),
        ];
        let balances = compute_balances(&members, &expenses).unwrap();
        let ab = balances
            .iter()
            .find(|bal| bal.debtor == a && bal.creditor == b)
            .unwrap();

        assert_eq!(ab.splits.len(), 2);
        assert!(ab.splits.iter().any(|s| s.owed_by == a));
        assert!(ab.splits.iter().any(|s| s.owed_by == b));
    }

    #[test]
    fn test_opposing_debts_cancel() {
        let (members, a, b, _) = abc();
        let expenses = vec![even(a, 2000, &[a, b]), even(b, 2000, &[a, b])];

        let balances = compute_balances(&members, &expenses).unwrap();
        assert!(balances.is_empty());
    }

    #[test]
    fn test_settled_expenses_are_excluded() {
        let (members, a, b, c) = abc();
        let mut settled = even(a, 9000, &[a, b, c]);
        settled.settle();
        let expenses = vec![settled, even(b, 2000, &[a, b])];

        let balances = compute_balances(&members, &expenses).unwrap();
        assert_eq!(balances.len(), 1);
        assert_eq!(find(&balances, a, b), Some(Money::from_cents(1000)));
    }

    #[test]
    fn test_self_and_zero_splits_ignored() {
        let (members, a, b, _) = abc();
        let mut expense = Expense::new(a, Money::from_cents(1000), date());
        expense.add_split(a, Money::from_cents(1000));
        expense.add_split(b, Money::zero());

        let balances = compute_balances(&members, &[expense]).unwrap();
        assert!(balances.is_empty());
    }

    #[test]
    fn test_order_independent() {
        let (members, a, b, c) = abc();
        let expenses = vec![
            even(a, 4500, &[a, b, c]),
            even(c, 1234, &[a, c]),
            even(b, 999, &[a, b, c]),
            even(a, 700, &[b]),
        ];
        let mut reversed = expenses.clone();
        reversed.reverse();
        let mut reversed_members = members.clone();
        reversed_members.reverse();

        let forward = compute_balances(&members, &expenses).unwrap();
        let backward = compute_balances(&reversed_members, &reversed).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward, compute_balances(&members, &expenses).unwrap());
    }

    #[test]
    fn test_no_pair_appears_twice() {
        let (members, a, b, c) = abc();
        let expenses = vec![
            even(a, 1000, &[b]),
            even(b, 300, &[a]),
            even(c, 800, &[a, b]),
            even(b, 500, &[c]),
        ];
        let balances = compute_balances(&members, &expenses).unwrap();

        let mut pairs = BTreeSet::new();
        for balance in &balances {
            assert!(balance.amount.is_positive());
            let key = if balance.debtor < balance.creditor {
                (balance.debtor, balance.creditor)
            } else {
                (balance.creditor, balance.debtor)
            };
            assert!(pairs.insert(key));
        }
    }

    #[test]
    fn test_conservation_against_raw_splits() {
        let (members, a, b, c) = abc();
        let expenses = vec![
            even(a, 1001, &[a, b, c]),
            even(b, 2500, &[a, c]),
            even(c, 333, &[a, b, c]),
            even(a, 4000, &[c]),
        ];
        let balances = compute_balances(&members, &expenses).unwrap();
        let nets = net_positions(&balances);

        // Net straight from the splits: paid-for-others minus owed-to-others
        let mut raw: BTreeMap<MemberId, Money> = BTreeMap::new();
        for expense in &expenses {
            for split in expense.splits.iter().filter(|s| s.owed_by != expense.paid_by) {
                *raw.entry(expense.paid_by).or_default() += split.amount;
                *raw.entry(split.owed_by).or_default() -= split.amount;
            }
        }

        for member in [a, b, c] {
            assert_eq!(
                nets.get(&member).copied().unwrap_or_default(),
                raw.get(&member).copied().unwrap_or_default()
            );
        }
    }

    #[test]
    fn test_completed_settlements_reduce_debt() {
        let (members, a, b, c) = abc();
        let expenses = vec![even(a, 3000, &[a, b, c])];
        let settlements = vec![
            Settlement::completed(b, a, Money::from_cents(1000), date(), "paid back"),
            Settlement::completed(c, a, Money::from_cents(400), date(), "part"),
            Settlement::suggested(c, a, Money::from_cents(600), date()),
        ];

        let balances =
            compute_balances_with_settlements(&members, &expenses, &settlements).unwrap();
        assert_eq!(balances.len(), 1);
        assert_eq!(find(&balances, c, a), Some(Money::from_cents(600)));
    }

    #[test]
    fn test_overpaying_settlement_flips_direction() {
        let (members, a, b, _) = abc();
        let expenses = vec![even(a, 1000, &[b])];
        let settlements = vec![Settlement::completed(b, a, Money::from_cents(1500), date(), "")];

        let balances =
            compute_balances_with_settlements(&members, &expenses, &settlements).unwrap();
        assert_eq!(find(&balances, a, b), Some(Money::from_cents(500)));
    }

    #[test]
    fn test_empty_members_yields_empty() {
        assert!(compute_balances(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_split_member_aborts() {
        let (members, a, b, _) = abc();
        let stranger = MemberId::new();
        let expenses = vec![even(a, 1000, &[a, b]), even(a, 1000, &[a, stranger])];

        let err = compute_balances(&members, &expenses).unwrap_err();
        assert!(matches!(
            err,
            IntegrityError::UnknownSplitMember { member, .. } if member == stranger
        ));
    }

    #[test]
    fn test_unknown_payer_aborts() {
        let (members, a, _, _) = abc();
        let stranger = MemberId::new();
        let expenses = vec![even(stranger, 1000, &[a])];

        assert!(matches!(
            compute_balances(&members, &expenses),
            Err(IntegrityError::UnknownPayer { .. })
        ));
    }

    #[test]
    fn test_unknown_member_in_settled_expense_still_aborts() {
        let (members, a, _, _) = abc();
        let mut expense = even(a, 1000, &[MemberId::new()]);
        expense.settle();

        assert!(compute_balances(&members, &[expense]).is_err());
    }

    #[test]
    fn test_unknown_settlement_member_aborts() {
        let (members, a, _, _) = abc();
        let settlements = vec![Settlement::completed(
            a,
            MemberId::new(),
            Money::from_cents(100),
            date(),
            "",
        )];

        assert!(matches!(
            compute_balances_with_settlements(&members, &[], &settlements),
            Err(IntegrityError::UnknownSettlementMember { .. })
        ));
    }

    #[test]
    fn test_duplicate_member_aborts() {
        let member = fixed_member(1, "Ash");
        let members = vec![member.clone(), member];
        assert!(matches!(
            compute_balances(&members, &[]),
            Err(IntegrityError::DuplicateMember(_))
        ));
    }

    #[test]
    fn test_split_mismatch_aborts() {
        let (members, a, b, _) = abc();
        let mut expense = Expense::new(a, Money::from_cents(5000), date());
        expense.add_split(b, Money::from_cents(2000));

        assert!(matches!(
            compute_balances(&members, &[expense]),
            Err(IntegrityError::SplitsMismatch { .. })
        ));
    }

    #[test]
    fn test_overflowing_totals_abort() {
        let (members, a, b, _) = abc();
        let huge = 5_000_000_000_000_000_000;
        let expenses = vec![even(a, huge, &[b]), even(a, huge, &[b])];

        assert_eq!(
            compute_balances(&members, &expenses),
            Err(IntegrityError::AmountOverflow)
        );
    }

    #[test]
    fn test_overflow_through_settlements_aborts() {
        let (members, a, b, _) = abc();
        let expenses = vec![even(a, i64::MAX - 10, &[b])];
        let settlements = vec![Settlement::completed(
            b,
            a,
            Money::from_cents(100),
            date(),
            "",
        )];

        assert_eq!(
            compute_balances_with_settlements(&members, &expenses, &settlements),
            Err(IntegrityError::AmountOverflow)
        );
    }
}
