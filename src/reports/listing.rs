//! Expense listing
//!
//! All entries in date order with their grand total.

use chrono::NaiveDate;

use crate::display::{separator, truncate};
use crate::models::{Entry, Money};

/// Sort entries ascending by date for display
///
/// Entries with an unparsable date are treated as the earliest possible date,
/// so they come first. The sort is stable: entries on the same date keep their
/// insertion order.
pub fn sort_for_display(entries: &[Entry]) -> Vec<Entry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|e| e.date.as_date().unwrap_or(NaiveDate::MIN));
    sorted
}

/// Entries ordered for display, plus their total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseListing {
    pub entries: Vec<Entry>,
    pub total: Money,
}

impl ExpenseListing {
    pub fn from_entries(entries: &[Entry]) -> Self {
        let entries = sort_for_display(entries);
        let total = entries.iter().map(|e| e.amount).sum();
        Self { entries, total }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Format the listing as a terminal table
    pub fn format_terminal(&self, currency: &str) -> String {
        if self.is_empty() {
            return "No expenses recorded yet.\n".to_string();
        }

        let header = format!(
            "{:10} | {:12} | {:>10} | Description",
            "Date", "Category", "Amount"
        );
        let rule = separator(header.chars().count());

        let mut output = String::new();
        output.push_str(&rule);
        output.push('\n');
        output.push_str(&header);
        output.push('\n');
        output.push_str(&rule);
        output.push('\n');

        for entry in &self.entries {
            output.push_str(&format!(
                "{:10} | {:12} | {:>10} | {}\n",
                entry.date,
                truncate(&entry.category, 12),
                entry.amount,
                entry.description
            ));
        }

        output.push_str(&rule);
        output.push('\n');
        output.push_str(&format!(
            "{:25} | {:>10}\n",
            "Total",
            self.total.format_with_symbol(currency)
        ));

        output
    }
}
