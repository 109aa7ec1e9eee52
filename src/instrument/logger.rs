//! Timing log for service operations
//!
//! Each finished operation is appended to the log as a single JSON line and
//! flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::{ExpenseError, ExpenseResult};

use super::event::OperationEvent;
use super::Instrument;

/// Appends operation events to a JSONL file
pub struct TimingLog {
    log_path: PathBuf,
}

impl TimingLog {
    /// Create a TimingLog that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an event to the log
    pub fn log(&self, event: &OperationEvent) -> ExpenseResult<()> {
        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ExpenseError::Io(format!("Failed to create log directory: {}", e)))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to open timing log: {}", e)))?;

        let json = serde_json::to_string(event)
            .map_err(|e| ExpenseError::Json(format!("Failed to serialize timing event: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| ExpenseError::Io(format!("Failed to write timing event: {}", e)))?;

        file.flush()
            .map_err(|e| ExpenseError::Io(format!("Failed to flush timing log: {}", e)))?;

        Ok(())
    }

    /// Read all events, oldest first
    pub fn read_all(&self) -> ExpenseResult<Vec<OperationEvent>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| ExpenseError::Io(format!("Failed to open timing log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut events = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                ExpenseError::Io(format!("Failed to read timing log line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let event: OperationEvent = serde_json::from_str(&line).map_err(|e| {
                ExpenseError::Json(format!(
                    "Failed to parse timing event at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            events.push(event);
        }

        Ok(events)
    }

    /// Read the most recent N events
    pub fn read_recent(&self, count: usize) -> ExpenseResult<Vec<OperationEvent>> {
        let mut events = self.read_all()?;
        let start = events.len().saturating_sub(count);
        Ok(events.split_off(start))
    }

    /// Path to the log file
    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

impl Instrument for TimingLog {
    fn record(&self, event: &OperationEvent) -> ExpenseResult<()> {
        self.log(event)
    }
}
