//! Expense service
//!
//! Caller-facing operations: recording an expense, listing everything that
//! has been recorded, and producing a monthly summary with optional exports.
//! Every operation is reported to the configured instrument.

use std::cell::RefCell;
use std::path::PathBuf;

use chrono::Local;

use crate::error::ExpenseResult;
use crate::export::{export_summary, ExportFormat};
use crate::instrument::{timed, Instrument};
use crate::models::{Entry, DATE_FORMAT};
use crate::reports::{summarize, ExpenseListing, MonthlySummary};
use crate::storage::{ExpenseStore, InitStatus};

/// Raw user input for a new expense
#[derive(Debug, Clone, Default)]
pub struct NewExpense {
    /// `YYYY-MM-DD`; today when absent
    pub date: Option<String>,
    pub category: Option<String>,
    pub amount: String,
    pub description: Option<String>,
}

/// Parameters of a monthly summary
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    pub month: u32,
    pub year: i32,
    pub export_json: bool,
    pub export_csv: bool,
    pub export_yaml: bool,
    pub export_dir: PathBuf,
}

impl SummaryRequest {
    /// A request with no exports
    pub fn new(month: u32, year: i32, export_dir: PathBuf) -> Self {
        Self {
            month,
            year,
            export_json: false,
            export_csv: false,
            export_yaml: false,
            export_dir,
        }
    }

    fn formats(&self) -> Vec<ExportFormat> {
        [
            (self.export_json, ExportFormat::Json),
            (self.export_csv, ExportFormat::Csv),
            (self.export_yaml, ExportFormat::Yaml),
        ]
        .into_iter()
        .filter_map(|(wanted, format)| wanted.then_some(format))
        .collect()
    }
}

/// Outcome of one requested export
#[derive(Debug)]
pub struct ExportReport {
    pub format: ExportFormat,
    /// Written path, or `None` when the summary was empty
    pub result: ExpenseResult<Option<PathBuf>>,
}

/// A computed summary plus the outcome of each requested export
#[derive(Debug)]
pub struct SummaryOutcome {
    pub summary: MonthlySummary,
    pub exports: Vec<ExportReport>,
}

impl SummaryOutcome {
    /// Whether any requested export failed
    pub fn has_export_failures(&self) -> bool {
        self.exports.iter().any(|report| report.result.is_err())
    }
}

/// Service for recording and reporting expenses
///
/// Reading the document may first have to create or recover it. Those
/// outcomes are kept until the caller collects them with
/// [`take_storage_notices`](Self::take_storage_notices).
pub struct ExpenseService<'a> {
    store: &'a ExpenseStore,
    instrument: Option<&'a dyn Instrument>,
    storage_notices: RefCell<Vec<InitStatus>>,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(store: &'a ExpenseStore) -> Self {
        Self {
            store,
            instrument: None,
            storage_notices: RefCell::new(Vec::new()),
        }
    }

    /// Report every operation to `instrument`
    pub fn with_instrument(mut self, instrument: &'a dyn Instrument) -> Self {
        self.instrument = Some(instrument);
        self
    }

    /// Drain the initialization outcomes other than [`InitStatus::Existing`]
    /// seen since the last call
    pub fn take_storage_notices(&self) -> Vec<InitStatus> {
        self.storage_notices.take()
    }

    fn note(&self, status: InitStatus) {
        if status != InitStatus::Existing {
            self.storage_notices.borrow_mut().push(status);
        }
    }

    fn load_entries(&self) -> ExpenseResult<Vec<Entry>> {
        let (entries, status) = self.store.load_all_with_status()?;
        self.note(status);
        Ok(entries)
    }

    /// Validate and record a new expense
    pub fn add_expense(&self, input: NewExpense) -> ExpenseResult<Entry> {
        timed(self.instrument, "add_expense", || {
            let today = Local::now().date_naive().format(DATE_FORMAT).to_string();
            let date = input.date.as_deref().unwrap_or(&today);

            let entry = Entry::validate(
                Some(date),
                input.category.as_deref(),
                Some(&input.amount),
                input.description.as_deref(),
            )?;

            let status = self.store.append(entry.clone())?;
            self.note(status);
            Ok(entry)
        })
    }

    /// Every stored expense, in display order
    pub fn list_expenses(&self) -> ExpenseResult<ExpenseListing> {
        timed(self.instrument, "list_expenses", || {
            let entries = self.load_entries()?;
            Ok(ExpenseListing::from_entries(&entries))
        })
    }

    /// Summarize one calendar month and write the requested exports
    ///
    /// Export failures are reported in the outcome and never fail the
    /// operation.
    pub fn generate_summary(&self, request: SummaryRequest) -> ExpenseResult<SummaryOutcome> {
        timed(self.instrument, "generate_summary", || {
            // Reject a bad month before touching storage
            MonthlySummary::empty(request.month, request.year)?;

            let entries = self.load_entries()?;
            let summary = summarize(&entries, request.month, request.year)?;

            let exports = request
                .formats()
                .into_iter()
                .map(|format| ExportReport {
                    format,
                    result: export_summary(&summary, format, &request.export_dir),
                })
                .collect();

            Ok(SummaryOutcome { summary, exports })
        })
    }
}
