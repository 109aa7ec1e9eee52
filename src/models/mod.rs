//! Core data models for the expense tracker
//!
//! This module contains the data structures persisted in the expenses
//! document: entries and the money amounts they carry.

pub mod entry;
pub mod money;

pub use entry::{parse_iso_date, Entry, EntryDate, DATE_FORMAT, DEFAULT_CATEGORY};
pub use money::{Money, MoneyParseError, MAX_CENTS};
