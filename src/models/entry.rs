//! Expense entry model and validation
//!
//! An [`Entry`] is one recorded expense. Entries built through
//! [`Entry::validate`] always carry a real calendar date and a non-negative
//! amount. Entries loaded from disk are read leniently: a damaged record keeps
//! its raw date text and falls back to defaults for missing fields, so one bad
//! record never makes the rest of the document unreadable.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::money::Money;
use crate::error::{ExpenseError, ExpenseResult};

/// Category used when none is given
pub const DEFAULT_CATEGORY: &str = "Misc";

/// Date format used for entries on disk and on input
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` date
///
/// Unlike a bare `NaiveDate::parse_from_str`, this rejects unpadded fields
/// ("2025-1-5") and signed or extended years.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

/// The date of a stored entry
///
/// `Unparsed` holds the original text of a record whose date cannot be read
/// as a date at all; it is written back unchanged on save.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryDate {
    Valid(NaiveDate),
    Unparsed(String),
}

impl EntryDate {
    /// Interpret stored date text
    ///
    /// Stored records are read more loosely than input is validated:
    /// unpadded fields such as `2025-1-5` are still a date.
    pub fn from_text(text: &str) -> Self {
        match NaiveDate::parse_from_str(text, DATE_FORMAT) {
            Ok(date) => Self::Valid(date),
            Err(_) => Self::Unparsed(text.to_string()),
        }
    }

    /// The calendar date, if the stored text was valid
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Valid(date) => Some(*date),
            Self::Unparsed(_) => None,
        }
    }
}

impl From<NaiveDate> for EntryDate {
    fn from(date: NaiveDate) -> Self {
        Self::Valid(date)
    }
}

impl fmt::Display for EntryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(date) => f.pad(&date.format(DATE_FORMAT).to_string()),
            Self::Unparsed(text) => f.pad(text),
        }
    }
}

impl Serialize for EntryDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEntry")]
pub struct Entry {
    pub date: EntryDate,
    pub category: String,
    pub amount: Money,
    pub description: String,
}

impl Entry {
    /// Create an entry from already-normalized parts
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date: EntryDate::Valid(date),
            category: category.into(),
            amount,
            description: description.into(),
        }
    }

    /// Validate and normalize a candidate entry
    ///
    /// - `date_text` must be a `YYYY-MM-DD` calendar date
    /// - an empty or absent `category` becomes [`DEFAULT_CATEGORY`]
    /// - `amount_text` must be a non-negative decimal; it is rounded to cents
    /// - an absent `description` becomes empty
    pub fn validate(
        date_text: Option<&str>,
        category: Option<&str>,
        amount_text: Option<&str>,
        description: Option<&str>,
    ) -> ExpenseResult<Self> {
        let date_text = date_text.map(str::trim).unwrap_or_default();
        let date = parse_iso_date(date_text)
            .ok_or_else(|| ExpenseError::InvalidDateFormat(date_text.to_string()))?;

        let category = match category.map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => DEFAULT_CATEGORY.to_string(),
        };

        let amount_text = amount_text.map(str::trim).unwrap_or_default();
        let amount = Money::parse(amount_text)
            .map_err(|_| ExpenseError::InvalidAmount(amount_text.to_string()))?;

        let description = description.map(str::trim).unwrap_or_default().to_string();

        Ok(Self::new(date, category, amount, description))
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.category, self.amount)
    }
}

/// Loose on-disk shape of an entry, before defaults are applied
#[derive(Deserialize)]
struct RawEntry {
    #[serde(default)]
    date: Option<Value>,
    #[serde(default)]
    category: Option<Value>,
    #[serde(default)]
    amount: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
}

impl From<RawEntry> for Entry {
    fn from(raw: RawEntry) -> Self {
        let date = match raw.date {
            Some(Value::String(text)) => EntryDate::from_text(&text),
            Some(Value::Null) | None => EntryDate::Unparsed(String::new()),
            Some(other) => EntryDate::Unparsed(other.to_string()),
        };

        let category = match raw.category {
            Some(Value::String(text)) => text,
            Some(Value::Null) | None => DEFAULT_CATEGORY.to_string(),
            Some(other) => other.to_string(),
        };

        let amount = match raw.amount {
            Some(Value::Number(n)) => n.as_f64().and_then(Money::from_decimal),
            Some(Value::String(text)) => text
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Money::from_decimal),
            _ => None,
        }
        .unwrap_or_default();

        let description = match raw.description {
            Some(Value::String(text)) => text,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        Self {
            date,
            category,
            amount,
            description,
        }
    }
}
