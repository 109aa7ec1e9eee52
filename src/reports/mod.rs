//! Reports module for the expense tracker
//!
//! Derived, read-only views over the stored entries: the date-ordered listing
//! and per-month category summaries.

pub mod listing;
pub mod summary;

pub use listing::{sort_for_display, ExpenseListing};
pub use summary::{month_name, summarize, MonthlySummary};
