//! Operation event data structure

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A single finished service operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationEvent {
    /// When the operation started (local time)
    pub started_at: DateTime<Local>,

    /// Operation name, e.g. `add_expense`
    pub operation: String,

    /// Wall-clock duration in seconds
    pub duration_secs: f64,

    /// Whether the operation returned successfully
    pub success: bool,
}

impl std::fmt::Display for OperationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] Function '{}' executed in {:.4}s{}",
            self.started_at.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            self.duration_secs,
            if self.success { "" } else { " (failed)" }
        )
    }
}
