//! JSON Export functionality
//!
//! Writes a monthly summary snapshot as a JSON document.

use std::io::Write;

use chrono::{DateTime, Local};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::export_error;
use crate::error::ExpenseResult;
use crate::models::Money;
use crate::reports::MonthlySummary;

/// Category totals, serialized as a map in display order
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotals(Vec<(String, Money)>);

impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, amount) in &self.0 {
            map.serialize_entry(name, amount)?;
        }
        map.end()
    }
}

/// Exported summary snapshot
#[derive(Debug, Clone, Serialize)]
pub struct SummaryExport {
    pub month: u32,
    pub month_name: String,
    pub year: i32,
    pub categories: CategoryTotals,
    pub total: Money,
    pub generated_at: DateTime<Local>,
}

impl SummaryExport {
    /// Snapshot a summary, stamped with the current local time
    pub fn new(summary: &MonthlySummary) -> Self {
        Self::generated_at(summary, Local::now())
    }

    /// Snapshot a summary with an explicit generation time
    pub fn generated_at(summary: &MonthlySummary, generated_at: DateTime<Local>) -> Self {
        let categories = summary
            .categories()
            .into_iter()
            .map(|(name, amount)| (name.to_string(), amount))
            .collect();

        Self {
            month: summary.month(),
            month_name: summary.month_name().to_string(),
            year: summary.year(),
            categories: CategoryTotals(categories),
            total: summary.total(),
            generated_at,
        }
    }
}

/// Write a summary as pretty-printed JSON
pub fn write_summary_json<W: Write>(
    summary: &MonthlySummary,
    writer: &mut W,
) -> ExpenseResult<()> {
    let export = SummaryExport::new(summary);

    serde_json::to_writer_pretty(&mut *writer, &export).map_err(export_error)?;
    writeln!(writer).map_err(export_error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entry;
    use crate::reports::summarize;
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    fn summary() -> MonthlySummary {
        let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
        let entries = vec![
            Entry::new(day(3), "Travel", Money::from_cents(3000), ""),
            Entry::new(day(4), "food", Money::from_cents(1000), ""),
            Entry::new(day(5), "Bills", Money::from_cents(525), ""),
            Entry::new(day(6), "Bills", Money::from_cents(100), ""),
        ];
        summarize(&entries, 1, 2025).unwrap()
    }

    #[test]
    fn test_export_shape() {
        let mut output = Vec::new();
        write_summary_json(&summary(), &mut output).unwrap();

        let value: Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["month"], 1);
        assert_eq!(value["month_name"], "January");
        assert_eq!(value["year"], 2025);
        assert_eq!(
            value["categories"],
            json!({"Bills": 6.25, "food": 10.0, "Travel": 30.0})
        );
        assert_eq!(value["total"], 46.25);
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn test_categories_written_in_display_order() {
        let mut output = Vec::new();
        write_summary_json(&summary(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        let bills = text.find("\"Bills\"").unwrap();
        let food = text.find("\"food\"").unwrap();
        let travel = text.find("\"Travel\"").unwrap();
        assert!(bills < food && food < travel);
    }

    #[test]
    fn test_snapshot_fields() {
        let export = SummaryExport::new(&summary());
        let names: Vec<_> = export.categories.0.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Bills", "food", "Travel"]);
        assert_eq!(export.total, Money::from_cents(4625));
    }
}
