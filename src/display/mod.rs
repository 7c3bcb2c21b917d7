//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display.
//! Records refer to members by id; [`MemberNames`] turns those back into
//! names. [`OutputStyle`] applies the household's currency symbol and date
//! format.

pub mod balance;
pub mod chore;
pub mod expense;
pub mod member;
pub mod report;

pub use balance::{format_balances, format_settlements};
pub use chore::format_chore_list;
pub use expense::{format_expense_details, format_expense_list};
pub use member::{format_member_list, format_member_summary};

use std::collections::HashMap;
use std::fmt::Write;

use chrono::NaiveDate;

use crate::config::settings::Settings;
use crate::models::{Member, MemberId, Money};

const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Currency symbol and date format for terminal output
///
/// CSV and JSON exports ignore this and always write plain decimals and
/// ISO dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputStyle {
    currency_symbol: String,
    date_format: String,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl OutputStyle {
    /// Build the style from household settings
    ///
    /// An unparseable date format falls back to YYYY-MM-DD.
    pub fn from_settings(settings: &Settings) -> Self {
        let date_format = if is_valid_date_format(&settings.date_format) {
            settings.date_format.clone()
        } else {
            tracing::warn!(format = %settings.date_format, "invalid date format, using default");
            DEFAULT_DATE_FORMAT.to_string()
        };

        Self {
            currency_symbol: settings.currency_symbol.clone(),
            date_format,
        }
    }

    /// Format an amount with the currency symbol
    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Format a date with the configured format
    pub fn date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }
}

/// Whether `format` is a strftime string chrono can render for a date
///
/// Unknown specifiers and time-only fields such as `%H` fail to render.
fn is_valid_date_format(format: &str) -> bool {
    let sample = NaiveDate::default();
    let mut out = String::new();
    !format.is_empty() && write!(out, "{}", sample.format(format)).is_ok()
}

/// Lookup from member id to display name
#[derive(Debug, Clone, Default)]
pub struct MemberNames(HashMap<MemberId, String>);

impl MemberNames {
    /// Build the lookup from a member list
    pub fn new(members: &[Member]) -> Self {
        Self(members.iter().map(|m| (m.id, m.name.clone())).collect())
    }

    /// Name for `id`, or its short id if the member is unknown
    pub fn name_of(&self, id: MemberId) -> String {
        self.0.get(&id).cloned().unwrap_or_else(|| id.to_string())
    }

    /// Width of the longest name, in characters
    pub fn widest(&self) -> usize {
        self.0.values().map(|n| n.chars().count()).max().unwrap_or(0)
    }
}
