//! Service layer for the expense tracker
//!
//! The service layer provides the caller-facing operations on top of the
//! storage, aggregation and export layers.

pub mod expense;

pub use expense::{ExpenseService, ExportReport, NewExpense, SummaryOutcome, SummaryRequest};
