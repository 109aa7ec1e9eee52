//! Expense Tracker - personal expense recording and monthly summaries
//!
//! This library provides the core functionality of the `expenses` command-line
//! tool. Expenses are kept in a single JSON document; monthly summaries group
//! them by category and can be exported as JSON, CSV or YAML.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money amounts, expense entries)
//! - `storage`: JSON document storage with corruption recovery
//! - `reports`: Monthly aggregation and display ordering
//! - `export`: Summary export to JSON, CSV and YAML
//! - `instrument`: Operation timing hooks
//! - `services`: Caller-facing operations
//! - `cli`: Command handlers
//! - `display`: Terminal formatting helpers
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::config::ExpensePaths;
//! use expense_tracker::services::{ExpenseService, SummaryRequest};
//! use expense_tracker::storage::ExpenseStore;
//!
//! let paths = ExpensePaths::new()?;
//! let store = ExpenseStore::new(paths.expenses_file());
//! let outcome = ExpenseService::new(&store)
//!     .generate_summary(SummaryRequest::new(1, 2025, paths.export_dir()))?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod instrument;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
