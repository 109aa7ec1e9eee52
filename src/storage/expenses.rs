//! Expense document storage
//!
//! The whole entry collection lives in a single JSON array document. Every
//! mutation reads the document, changes it in memory and writes it back
//! atomically. A document that cannot be parsed is moved aside to a timestamped
//! backup and replaced with an empty one instead of failing the caller.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use serde_json::Value;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Entry;

use super::file_io::{read_json_value, write_json_atomic};

/// Prefix of the file a corrupted document is moved to
pub const BACKUP_PREFIX: &str = "expenses_corrupted_backup_";

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Outcome of [`ExpenseStore::ensure_initialized`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitStatus {
    /// The document already existed and is well-formed
    Existing,
    /// No document existed; an empty one was created
    Created,
    /// The document was corrupted, moved to `backup_path`, and recreated empty
    Recovered { backup_path: PathBuf },
    /// The corrupted document could not be moved aside and was overwritten
    Overwritten { reason: String },
    /// No usable document could be written
    Failed { reason: String },
}

impl InitStatus {
    /// Whether a readable document is in place
    pub fn is_ready(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }
}

/// Owner of the durable expenses document
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    /// Create a store backed by the document at `path`
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path to the expenses document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Guarantee that a well-formed document exists
    ///
    /// Never returns an error; failures are reported through [`InitStatus`].
    pub fn ensure_initialized(&self) -> InitStatus {
        self.ensure_initialized_at(Local::now().naive_local())
    }

    /// Same as [`ensure_initialized`](Self::ensure_initialized) with an explicit
    /// detection time for the backup name
    pub fn ensure_initialized_at(&self, now: NaiveDateTime) -> InitStatus {
        if !self.path.exists() {
            return match self.write_empty() {
                Ok(()) => InitStatus::Created,
                Err(e) => InitStatus::Failed {
                    reason: e.to_string(),
                },
            };
        }

        if read_document(&self.path).is_ok() {
            return InitStatus::Existing;
        }

        let backup_path = self.backup_path_for(now);
        let moved = fs::rename(&self.path, &backup_path);

        match (moved, self.write_empty()) {
            (Ok(()), Ok(())) => InitStatus::Recovered { backup_path },
            (Err(rename_err), Ok(())) => InitStatus::Overwritten {
                reason: format!(
                    "Could not move corrupted document to {}: {}",
                    backup_path.display(),
                    rename_err
                ),
            },
            (_, Err(write_err)) => InitStatus::Failed {
                reason: write_err.to_string(),
            },
        }
    }

    /// Load every stored entry, in insertion order
    pub fn load_all(&self) -> ExpenseResult<Vec<Entry>> {
        self.load_all_with_status().map(|(entries, _)| entries)
    }

    /// Load every stored entry, along with what initialization had to do
    /// before the document could be read
    pub fn load_all_with_status(&self) -> ExpenseResult<(Vec<Entry>, InitStatus)> {
        let status = self.ensure_initialized();
        let entries = read_document(&self.path)?;
        Ok((entries, status))
    }

    /// Replace the stored collection
    pub fn save_all(&self, entries: &[Entry]) -> ExpenseResult<()> {
        write_json_atomic(&self.path, entries)
    }

    /// Append a single entry (whole-document read-modify-write)
    ///
    /// Returns the initialization status of the document that was appended to.
    pub fn append(&self, entry: Entry) -> ExpenseResult<InitStatus> {
        let (mut entries, status) = self.load_all_with_status()?;
        entries.push(entry);
        self.save_all(&entries)?;
        Ok(status)
    }

    /// Backup path for a corrupted document detected at `now`
    ///
    /// Adds a `_<n>` suffix if a backup with the same timestamp already exists.
    pub fn backup_path_for(&self, now: NaiveDateTime) -> PathBuf {
        let dir = self.path.parent().unwrap_or_else(|| Path::new(""));
        let stamp = now.format(BACKUP_TIMESTAMP_FORMAT).to_string();

        let candidate = dir.join(format!("{}{}.json", BACKUP_PREFIX, stamp));
        if !candidate.exists() {
            return candidate;
        }

        (2u32..)
            .map(|n| dir.join(format!("{}{}_{}.json", BACKUP_PREFIX, stamp, n)))
            .find(|p| !p.exists())
            .unwrap_or(candidate)
    }

    fn write_empty(&self) -> ExpenseResult<()> {
        self.save_all(&[])
    }
}

/// Read the document, requiring a top-level array of objects
fn read_document(path: &Path) -> ExpenseResult<Vec<Entry>> {
    let records = match read_json_value(path)? {
        Value::Array(records) => records,
        other => {
            return Err(ExpenseError::StorageRead(format!(
                "{} does not contain a list (found {})",
                path.display(),
                json_kind(&other)
            )))
        }
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            if !record.is_object() {
                return Err(ExpenseError::StorageRead(format!(
                    "Record {} in {} is {}, not an object",
                    index,
                    path.display(),
                    json_kind(&record)
                )));
            }
            serde_json::from_value(record).map_err(|e| {
                ExpenseError::StorageRead(format!("Record {} is malformed: {}", index, e))
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
