//! CSV Export functionality
//!
//! Writes a monthly summary as a two-column `Category,Amount` table followed by
//! a blank line and a `Total` row.

use std::io::Write;

use super::export_error;
use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::MonthlySummary;

fn csv_writer<W: Write>(writer: W) -> ::csv::Writer<W> {
    ::csv::WriterBuilder::new()
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(writer)
}

/// Write a summary as CSV
pub fn write_summary_csv<W: Write>(summary: &MonthlySummary, writer: W) -> ExpenseResult<()> {
    let mut table = csv_writer(writer);

    table
        .write_record(["Category", "Amount"])
        .map_err(export_error)?;

    for (category, amount) in summary.categories() {
        let amount = amount.to_string();
        table
            .write_record([category, amount.as_str()])
            .map_err(export_error)?;
    }

    // The csv writer refuses empty records, so the separator goes straight to
    // the underlying writer
    let mut inner = table
        .into_inner()
        .map_err(|e| ExpenseError::Export(e.error().to_string()))?;
    writeln!(inner).map_err(export_error)?;

    let mut footer = csv_writer(inner);
    let total = summary.total().to_string();
    footer
        .write_record(["Total", total.as_str()])
        .map_err(export_error)?;
    footer.flush().map_err(export_error)?;

    Ok(())
}
