//! YAML Export functionality
//!
//! Writes the same summary snapshot as the JSON export in human-readable YAML.

use std::io::Write;

use super::export_error;
use super::json::SummaryExport;
use crate::error::ExpenseResult;
use crate::reports::MonthlySummary;

/// Write a summary as YAML, preceded by a comment header
pub fn write_summary_yaml<W: Write>(
    summary: &MonthlySummary,
    writer: &mut W,
) -> ExpenseResult<()> {
    let export = SummaryExport::new(summary);

    writeln!(
        writer,
        "# Expense summary: {} {}",
        export.month_name, export.year
    )
    .map_err(export_error)?;
    writeln!(writer, "# Generated: {}", export.generated_at.to_rfc3339()).map_err(export_error)?;
    writeln!(writer).map_err(export_error)?;

    serde_yaml::to_writer(&mut *writer, &export).map_err(export_error)?;

    Ok(())
}
