//! Balance and settlement display formatting

use crate::models::{Balance, Settlement};

use super::{MemberNames, OutputStyle};

/// Format pairwise balances as "X owes Y" lines
///
/// With `detailed`, the contributing splits are listed under each balance.
pub fn format_balances(
    balances: &[Balance],
    names: &MemberNames,
    style: &OutputStyle,
    detailed: bool,
) -> String {
    if balances.is_empty() {
        return "Everyone is settled up.".to_string();
    }

    let width = names.widest().max(6);
    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}     {:<width$}  {:>12}\n",
        "Debtor", "Creditor", "Amount",
    ));
    output.push_str(&format!("{:-<width$}     {:-<width$}  {:->12}\n", "", "", ""));

    for balance in balances {
        output.push_str(&format!(
            "{:<width$} owes {:<width$}  {:>12}\n",
            names.name_of(balance.debtor),
            names.name_of(balance.creditor),
            style.money(balance.amount),
        ));

        if detailed {
            for split in &balance.splits {
                let direction = if split.owed_by == balance.debtor {
                    "+"
                } else {
                    "-"
                };
                output.push_str(&format!(
                    "    {} {} {} on {}\n",
                    direction,
                    style.money(split.amount),
                    names.name_of(split.owed_by),
                    split.expense_id
                ));
            }
        }
    }

    output
}

/// Format settlements (suggested or recorded) as a payment list
pub fn format_settlements(
    settlements: &[Settlement],
    names: &MemberNames,
    style: &OutputStyle,
) -> String {
    if settlements.is_empty() {
        return "No settlements.".to_string();
    }

    let width = names.widest().max(4);
    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<width$}     {:<width$}  {:>12}  {:<9}  {}\n",
        "ID", "Date", "From", "To", "Amount", "Status", "Note",
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<width$}     {:-<width$}  {:->12}  {:-<9}  {:-<4}\n",
        "", "", "", "", "", "", "",
    ));

    for settlement in settlements {
        output.push_str(&format!(
            "{:<12}  {:<10}  {:<width$} pays {:<width$}  {:>12}  {:<9}  {}\n",
            settlement.id.to_string(),
            style.date(settlement.date),
            names.name_of(settlement.from),
            names.name_of(settlement.to),
            style.money(settlement.amount),
            settlement.status.to_string(),
            settlement.description,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::Settings;
    use crate::models::{ExpenseId, Member, Money, Split};
    use chrono::NaiveDate;

    fn setup() -> (MemberNames, Member, Member) {
        let ana = Member::new("Ana");
        let ben = Member::new("Ben");
        (MemberNames::new(&[ana.clone(), ben.clone()]), ana, ben)
    }

    #[test]
    fn test_no_balances() {
        let (names, _, _) = setup();
        let output = format_balances(&[], &names, &OutputStyle::default(), false);
        assert_eq!(output, "Everyone is settled up.");
    }

    #[test]
    fn test_balances_with_detail() {
        let (names, ana, ben) = setup();
        let expense = ExpenseId::new();
        let balances = vec![Balance {
            debtor: ana.id,
            creditor: ben.id,
            amount: Money::from_cents(1000),
            splits: vec![Split::new(expense, ana.id, Money::from_cents(1000))],
        }];

        let brief = format_balances(&balances, &names, &OutputStyle::default(), false);
        assert!(brief.contains("Ana    owes Ben"));
        assert!(!brief.contains(&expense.to_string()));

        let detailed = format_balances(&balances, &names, &OutputStyle::default(), true);
        assert!(detailed.contains(&format!("+ $10.00 Ana on {}", expense)));
    }

    #[test]
    fn test_settlements() {
        let (names, ana, ben) = setup();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let settlements = vec![Settlement::completed(
            ana.id,
            ben.id,
            Money::from_cents(2500),
            date,
            "rent",
        )];

        let output = format_settlements(&settlements, &names, &OutputStyle::default());
        assert!(output.contains("pays Ben"));
        assert!(output.contains("Completed"));
        assert!(output.contains("rent"));
    }

    #[test]
    fn test_settlements_use_household_style() {
        let (names, ana, ben) = setup();
        let style = OutputStyle::from_settings(&Settings {
            currency_symbol: "€".into(),
            date_format: "%d/%m/%Y".into(),
            ..Settings::default()
        });
        let settlements = vec![Settlement::completed(
            ana.id,
            ben.id,
            Money::from_cents(2500),
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            "",
        )];

        let output = format_settlements(&settlements, &names, &style);
        assert!(output.contains("€25.00"));
        assert!(output.contains("09/03/2025"));
        assert!(!output.contains('$'));
    }
}
