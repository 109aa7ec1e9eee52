//! Monthly Summary
//!
//! Groups the entries of one calendar month by category.

use std::collections::BTreeMap;

use chrono::{Datelike, Month};

use crate::display::separator;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Entry, Money};

/// Full English name of a month (1-12)
pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
}

/// Per-category totals for one (year, month)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    month: u32,
    year: i32,
    /// Category -> summed amount (case-sensitive keys)
    totals: BTreeMap<String, Money>,
    total: Money,
    entry_count: usize,
}

impl MonthlySummary {
    /// An empty summary for a month
    pub fn empty(month: u32, year: i32) -> ExpenseResult<Self> {
        if month_name(month).is_none() {
            return Err(ExpenseError::InvalidMonth(month));
        }

        Ok(Self {
            month,
            year,
            totals: BTreeMap::new(),
            total: Money::zero(),
            entry_count: 0,
        })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Full English month name, e.g. "January"
    pub fn month_name(&self) -> &'static str {
        month_name(self.month).unwrap_or_default()
    }

    /// Grand total across all categories
    pub fn total(&self) -> Money {
        self.total
    }

    /// Number of entries that contributed to the summary
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn category_count(&self) -> usize {
        self.totals.len()
    }

    /// Total for one category (exact, case-sensitive match)
    pub fn category_total(&self, category: &str) -> Option<Money> {
        self.totals.get(category).copied()
    }

    /// Categories in display order: case-insensitive lexicographic, with the
    /// original key breaking ties between names that differ only in case
    pub fn categories(&self) -> Vec<(&str, Money)> {
        let mut rows: Vec<(&str, Money)> = self
            .totals
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
            .collect();
        rows.sort_by_cached_key(|(name, _)| (name.to_lowercase(), name.to_string()));
        rows
    }

    fn add(&mut self, category: &str, amount: Money) {
        *self.totals.entry(category.to_string()).or_default() += amount;
        self.total += amount;
        self.entry_count += 1;
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let title = format!(
            "===== Monthly Summary: {} {} =====",
            self.month_name(),
            self.year
        );

        let mut output = String::new();
        output.push_str(&title);
        output.push('\n');

        if self.is_empty() {
            output.push_str("No expenses found for this month.\n");
            return output;
        }

        for (category, amount) in self.categories() {
            output.push_str(&format!(
                "{}: {}\n",
                category,
                amount.format_with_symbol(currency)
            ));
        }
        output.push_str(&separator(title.chars().count()));
        output.push('\n');
        output.push_str(&format!(
            "Total: {}\n",
            self.total.format_with_symbol(currency)
        ));

        output
    }
}

/// Summarize the entries dated in the given month
///
/// Entries whose date cannot be parsed are skipped. No matching entries
/// yields an empty summary.
pub fn summarize(entries: &[Entry], month: u32, year: i32) -> ExpenseResult<MonthlySummary> {
    let mut summary = MonthlySummary::empty(month, year)?;

    for entry in entries {
        let Some(date) = entry.date.as_date() else {
            continue;
        };
        if date.year() == year && date.month() == month {
            summary.add(&entry.category, entry.amount);
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryDate;
    use chrono::NaiveDate;

    fn entry(y: i32, m: u32, d: u32, category: &str, cents: i64) -> Entry {
        Entry::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            category,
            Money::from_cents(cents),
            "",
        )
    }

    fn sample_entries() -> Vec<Entry> {
        vec![
            entry(2025, 1, 5, "Food", 10000),
            entry(2025, 1, 20, "Food", 5000),
            entry(2025, 2, 1, "Travel", 3000),
        ]
    }

    #[test]
    fn test_summarize_groups_by_category() {
        let entries = sample_entries();

        let january = summarize(&entries, 1, 2025).unwrap();
        assert_eq!(january.categories(), vec![("Food", Money::from_cents(15000))]);
        assert_eq!(january.total(), Money::from_cents(15000));
        assert_eq!(january.entry_count(), 2);

        let february = summarize(&entries, 2, 2025).unwrap();
        assert_eq!(
            february.categories(),
            vec![("Travel", Money::from_cents(3000))]
        );
        assert_eq!(february.total(), Money::from_cents(3000));
    }

    #[test]
    fn test_year_must_match() {
        let entries = sample_entries();
        let summary = summarize(&entries, 1, 2024).unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let summary = summarize(&sample_entries(), 7, 2025).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.category_count(), 0);
        assert_eq!(summary.total().to_string(), "0.00");
    }

    #[test]
    fn test_invalid_month() {
        for month in [0, 13, 100] {
            let err = summarize(&sample_entries(), month, 2025).unwrap_err();
            assert!(matches!(err, ExpenseError::InvalidMonth(m) if m == month));
        }
    }

    #[test]
    fn test_category_order_is_case_insensitive() {
        let entries = vec![
            entry(2025, 3, 1, "Travel", 3000),
            entry(2025, 3, 2, "food", 1000),
            entry(2025, 3, 3, "Bills", 500),
        ];

        let summary = summarize(&entries, 3, 2025).unwrap();
        let names: Vec<_> = summary.categories().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Bills", "food", "Travel"]);
    }

    #[test]
    fn test_case_sensitive_keys() {
        let entries = vec![
            entry(2025, 3, 1, "food", 100),
            entry(2025, 3, 2, "Food", 200),
        ];

        let summary = summarize(&entries, 3, 2025).unwrap();
        assert_eq!(summary.category_count(), 2);
        assert_eq!(summary.category_total("Food"), Some(Money::from_cents(200)));
        assert_eq!(summary.category_total("food"), Some(Money::from_cents(100)));

        let names: Vec<_> = summary.categories().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Food", "food"]);
    }

    #[test]
    fn test_unparsable_dates_are_skipped() {
        let mut entries = sample_entries();
        entries.push(Entry {
            date: EntryDate::Unparsed("bad-date".into()),
            category: "Food".into(),
            amount: Money::from_cents(999),
            description: String::new(),
        });

        let summary = summarize(&entries, 1, 2025).unwrap();
        assert_eq!(summary.total(), Money::from_cents(15000));
    }

    #[test]
    fn test_largest_amounts_total_without_overflow() {
        let largest = Money::parse("999999999999.99").unwrap();
        let entries: Vec<_> = (1..=3)
            .map(|d| {
                Entry::new(
                    NaiveDate::from_ymd_opt(2025, 1, d).unwrap(),
                    "Food",
                    largest,
                    "",
                )
            })
            .collect();

        let summary = summarize(&entries, 1, 2025).unwrap();
        assert_eq!(summary.total().cents(), largest.cents() * 3);
    }

    #[test]
    fn test_out_of_range_stored_amounts_saturate() {
        let entries = vec![
            entry(2025, 1, 5, "Food", i64::MAX),
            entry(2025, 1, 6, "Food", i64::MAX),
        ];

        let summary = summarize(&entries, 1, 2025).unwrap();
        assert_eq!(summary.total().cents(), i64::MAX);
        assert_eq!(summary.category_total("Food").unwrap().cents(), i64::MAX);
    }

    #[test]
    fn test_stored_unpadded_dates_are_counted() {
        let mut entries = sample_entries();
        entries.push(Entry {
            date: EntryDate::from_text("2025-1-7"),
            category: "Food".into(),
            amount: Money::from_cents(500),
            description: String::new(),
        });

        let summary = summarize(&entries, 1, 2025).unwrap();
        assert_eq!(summary.total(), Money::from_cents(15500));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_format_terminal() {
        let summary = summarize(&sample_entries(), 1, 2025).unwrap();
        let output = summary.format_terminal("₹");

        assert!(output.starts_with("===== Monthly Summary: January 2025 ====="));
        assert!(output.contains("Food: ₹150.00"));
        assert!(output.contains("Total: ₹150.00"));

        let empty = MonthlySummary::empty(6, 2025).unwrap();
        assert!(empty
            .format_terminal("$")
            .contains("No expenses found for this month."));
    }
}
