//! Export module for the expense tracker
//!
//! Writes monthly summary snapshots to files in multiple formats:
//! - JSON: machine-readable snapshot with generation timestamp
//! - CSV: spreadsheet-compatible category table
//! - YAML: human-readable snapshot
//!
//! Empty summaries are never written.

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::MonthlySummary;

pub use self::csv::write_summary_csv;
pub use self::json::{write_summary_json, SummaryExport};
pub use self::yaml::write_summary_yaml;

pub(crate) fn export_error(err: impl fmt::Display) -> ExpenseError {
    ExpenseError::Export(err.to_string())
}

/// Summary export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Yaml,
}

impl ExportFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "JSON"),
            ExportFormat::Csv => write!(f, "CSV"),
            ExportFormat::Yaml => write!(f, "YAML"),
        }
    }
}

/// File name for a summary export, e.g. `summary_January_2025.json`
pub fn summary_file_name(summary: &MonthlySummary, format: ExportFormat) -> String {
    format!(
        "summary_{}_{}.{}",
        summary.month_name(),
        summary.year(),
        format.extension()
    )
}

/// Export a summary into `dir` under its standard file name
///
/// Returns the written path, or `None` if the summary is empty and nothing
/// was written.
pub fn export_summary(
    summary: &MonthlySummary,
    format: ExportFormat,
    dir: &Path,
) -> ExpenseResult<Option<PathBuf>> {
    if summary.is_empty() {
        return Ok(None);
    }

    fs::create_dir_all(dir).map_err(|e| {
        ExpenseError::Export(format!(
            "Failed to create export directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let path = dir.join(summary_file_name(summary, format));
    export_summary_to(summary, format, &path)?;
    Ok(Some(path))
}

/// Export a summary to an exact file path
///
/// An empty summary writes nothing and is not an error.
pub fn export_summary_to(
    summary: &MonthlySummary,
    format: ExportFormat,
    path: &Path,
) -> ExpenseResult<()> {
    if summary.is_empty() {
        return Ok(());
    }

    let file = File::create(path).map_err(|e| {
        ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    match format {
        ExportFormat::Json => write_summary_json(summary, &mut writer)?,
        ExportFormat::Csv => write_summary_csv(summary, &mut writer)?,
        ExportFormat::Yaml => write_summary_yaml(summary, &mut writer)?,
    }

    writer.flush().map_err(export_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, Money};
    use crate::reports::summarize;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn january_summary() -> MonthlySummary {
        let entries = vec![Entry::new(
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            "Food",
            Money::from_cents(10000),
            "",
        )];
        summarize(&entries, 1, 2025).unwrap()
    }

    #[test]
    fn test_file_names() {
        let summary = january_summary();
        assert_eq!(
            summary_file_name(&summary, ExportFormat::Json),
            "summary_January_2025.json"
        );
        assert_eq!(
            summary_file_name(&summary, ExportFormat::Csv),
            "summary_January_2025.csv"
        );
    }

    #[test]
    fn test_export_writes_each_format() {
        let temp_dir = TempDir::new().unwrap();
        let summary = january_summary();

        for format in [ExportFormat::Json, ExportFormat::Csv, ExportFormat::Yaml] {
            let path = export_summary(&summary, format, temp_dir.path())
                .unwrap()
                .unwrap();
            assert_eq!(path, temp_dir.path().join(summary_file_name(&summary, format)));
            assert!(!fs::read_to_string(&path).unwrap().is_empty());
        }
    }

    #[test]
    fn test_empty_summary_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let empty = MonthlySummary::empty(4, 2025).unwrap();

        let written = export_summary(&empty, ExportFormat::Json, temp_dir.path()).unwrap();
        assert!(written.is_none());

        let target = temp_dir.path().join("explicit.csv");
        export_summary_to(&empty, ExportFormat::Csv, &target).unwrap();
        assert!(!target.exists());

        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_unwritable_destination_is_export_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let err = export_summary(&january_summary(), ExportFormat::Json, &blocker).unwrap_err();
        assert!(matches!(err, ExpenseError::Export(_)));

        let err = export_summary_to(
            &january_summary(),
            ExportFormat::Csv,
            &blocker.join("summary.csv"),
        )
        .unwrap_err();
        assert!(matches!(err, ExpenseError::Export(_)));
    }
}
