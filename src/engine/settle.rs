//! Settlement simplification
//!
//! Turns a set of pairwise balances into a short list of payments using
//! greedy largest-debtor / largest-creditor matching. The greedy pass is a
//! heuristic: it needs at most `n - 1` payments for `n` members with a
//! non-zero position, but finding the true minimum is NP-hard in general and
//! is not attempted.

use chrono::NaiveDate;

use super::balances::net_positions;
use crate::models::{Balance, MemberId, Money, Settlement};

/// Suggest settlements that zero every balance, dated today
pub fn simplify_settlements(balances: &[Balance]) -> Vec<Settlement> {
    simplify_settlements_on(balances, chrono::Local::now().date_naive())
}

/// Suggest settlements that zero every balance, dated `date`
///
/// All returned settlements are `Pending`. When several members share the
/// largest amount on one side, the lowest member id goes first.
pub fn simplify_settlements_on(balances: &[Balance], date: NaiveDate) -> Vec<Settlement> {
    let mut debtors: Vec<(MemberId, Money)> = Vec::new();
    let mut creditors: Vec<(MemberId, Money)> = Vec::new();

    for (member, net) in net_positions(balances) {
        if net.is_negative() {
            debtors.push((member, net.abs()));
        } else if net.is_positive() {
            creditors.push((member, net));
        }
    }

    let mut settlements = Vec::new();

    while let (Some(d), Some(c)) = (largest(&debtors), largest(&creditors)) {
        let amount = debtors[d].1.min(creditors[c].1);
        settlements.push(Settlement::suggested(
            debtors[d].0,
            creditors[c].0,
            amount,
            date,
        ));

        debtors[d].1 -= amount;
        creditors[c].1 -= amount;

        if debtors[d].1.is_zero() {
            debtors.swap_remove(d);
        }
        if creditors[c].1.is_zero() {
            creditors.swap_remove(c);
        }
    }

    tracing::debug!(
        balances = balances.len(),
        settlements = settlements.len(),
        "simplified settlements"
    );

    settlements
}

/// Index of the entry with the largest amount, lowest id on ties
fn largest(entries: &[(MemberId, Money)]) -> Option<usize> {
    entries
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
        .map(|(i, _)| i)
}
