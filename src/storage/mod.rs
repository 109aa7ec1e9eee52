//! Storage layer for the expense tracker
//!
//! Provides the JSON expenses document with atomic writes, automatic
//! directory creation and corrupted-document recovery.

pub mod expenses;
pub mod file_io;

pub use expenses::{ExpenseStore, InitStatus, BACKUP_PREFIX};
pub use file_io::{read_json_value, write_json_atomic};
