//! Operation instrumentation for the expense tracker
//!
//! Service operations can be observed by an optional [`Instrument`]. Each
//! operation is timed and reported as an [`OperationEvent`] once it finishes,
//! whether it succeeded or not.
//!
//! # Architecture
//!
//! - `OperationEvent`: when an operation started, how long it took, and
//!   whether it succeeded.
//! - `TimingLog`: appends events to a line-delimited JSON (JSONL) log file.
//! - `StderrReporter`: prints a one-line timing summary to stderr.
//! - `timed`: runs a closure and reports it to an optional instrument.
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::instrument::{timed, TimingLog};
//!
//! let log = TimingLog::new(paths.timing_log());
//! let entries = timed(Some(&log), "list_expenses", || store.load_all())?;
//! ```

mod event;
mod logger;

use std::time::Instant;

use chrono::Local;

use crate::error::ExpenseResult;

pub use event::OperationEvent;
pub use logger::TimingLog;

/// Observer of service operations
pub trait Instrument {
    /// Record a finished operation
    fn record(&self, event: &OperationEvent) -> ExpenseResult<()>;
}

/// Prints a timing line per operation to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrReporter;

impl Instrument for StderrReporter {
    fn record(&self, event: &OperationEvent) -> ExpenseResult<()> {
        eprintln!(
            "Function '{}' finished in {:.4}s",
            event.operation, event.duration_secs
        );
        Ok(())
    }
}

/// Fan an event out to several instruments
///
/// Every instrument sees the event; the first failure is returned.
impl Instrument for Vec<Box<dyn Instrument>> {
    fn record(&self, event: &OperationEvent) -> ExpenseResult<()> {
        let mut first_error = None;
        for instrument in self {
            if let Err(e) = instrument.record(event) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Run `operation`, timing it and reporting the outcome to `instrument`
///
/// A failing instrument is reported on stderr and never changes the
/// operation's result.
pub fn timed<T, F>(
    instrument: Option<&dyn Instrument>,
    name: &str,
    operation: F,
) -> ExpenseResult<T>
where
    F: FnOnce() -> ExpenseResult<T>,
{
    let Some(instrument) = instrument else {
        return operation();
    };

    let started_at = Local::now();
    let clock = Instant::now();
    let result = operation();
    let elapsed = clock.elapsed();

    let event = OperationEvent {
        started_at,
        operation: name.to_string(),
        duration_secs: elapsed.as_secs_f64(),
        success: result.is_ok(),
    };

    if let Err(e) = instrument.record(&event) {
        eprintln!("Failed to write log: {}", e);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExpenseError;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<OperationEvent>>,
    }

    impl Instrument for Recorder {
        fn record(&self, event: &OperationEvent) -> ExpenseResult<()> {
            self.events.borrow_mut().push(event.clone());
            Ok(())
        }
    }

    struct Broken;

    impl Instrument for Broken {
        fn record(&self, _event: &OperationEvent) -> ExpenseResult<()> {
            Err(ExpenseError::Io("log unavailable".into()))
        }
    }

    #[test]
    fn test_timed_records_success() {
        let recorder = Recorder::default();
        let value = timed(Some(&recorder), "add_expense", || Ok(42)).unwrap();

        assert_eq!(value, 42);
        let events = recorder.events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].operation, "add_expense");
        assert!(events[0].success);
        assert!(events[0].duration_secs >= 0.0);
    }

    #[test]
    fn test_timed_records_failure() {
        let recorder = Recorder::default();
        let result: ExpenseResult<()> = timed(Some(&recorder), "generate_summary", || {
            Err(ExpenseError::InvalidMonth(13))
        });

        assert!(result.is_err());
        assert!(!recorder.events.borrow()[0].success);
    }

    #[test]
    fn test_timed_without_instrument() {
        let value = timed(None, "list_expenses", || Ok("ok")).unwrap();
        assert_eq!(value, "ok");
    }

    #[test]
    fn test_broken_instrument_does_not_change_result() {
        let value = timed(Some(&Broken), "list_expenses", || Ok(7)).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_fan_out_reaches_every_instrument() {
        let chain: Vec<Box<dyn Instrument>> = vec![Box::new(Broken), Box::new(StderrReporter)];
        let event = OperationEvent {
            started_at: Local::now(),
            operation: "list_expenses".into(),
            duration_secs: 0.5,
            success: true,
        };

        assert!(chain.record(&event).is_err());
    }
}
