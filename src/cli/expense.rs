//! Expense CLI commands
//!
//! Implements the `add`, `list`, `summary` and `log` commands on top of the
//! expense service.

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::{ExpensePaths, Settings};
use crate::error::ExpenseResult;
use crate::instrument::{Instrument, TimingLog};
use crate::services::{ExpenseService, NewExpense, SummaryRequest};
use crate::storage::{ExpenseStore, InitStatus};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount spent (non-negative, e.g. 12.50)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Expense date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Category (defaults to Misc)
        #[arg(short, long)]
        category: Option<String>,
        /// Free-text description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// List every recorded expense by date
    List,
    /// Summarize one month by category
    Summary {
        /// Month number (1-12)
        month: u32,
        /// Four-digit year
        year: i32,
        /// Skip the JSON export
        #[arg(long)]
        no_json: bool,
        /// Also export CSV
        #[arg(long)]
        csv: bool,
        /// Also export YAML
        #[arg(long)]
        yaml: bool,
        /// Directory for exported files
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the most recent operation timings
    Log {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
}

/// Everything a command handler needs
pub struct CommandContext<'a> {
    pub paths: &'a ExpensePaths,
    pub settings: &'a Settings,
    pub store: &'a ExpenseStore,
    pub instrument: Option<&'a dyn Instrument>,
}

/// Handle an expense command
///
/// Storage recovery notices raised while the command ran are printed even
/// when the command itself fails.
pub fn handle_expense_command(
    ctx: &CommandContext<'_>,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let mut service = ExpenseService::new(ctx.store);
    if let Some(instrument) = ctx.instrument {
        service = service.with_instrument(instrument);
    }

    let result = run_command(ctx, &service, cmd);

    for status in service.take_storage_notices() {
        report_init_status(&status, ctx.store);
    }

    result
}

fn run_command(
    ctx: &CommandContext<'_>,
    service: &ExpenseService<'_>,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let currency = ctx.settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            date,
            category,
            description,
        } => {
            let entry = service.add_expense(NewExpense {
                date,
                category,
                amount,
                description,
            })?;

            println!(
                "Added expense: {} {} {}{}",
                entry.date,
                entry.category,
                currency,
                entry.amount
            );
            if !entry.description.is_empty() {
                println!("  {}", entry.description);
            }
        }

        ExpenseCommands::List => {
            let listing = service.list_expenses()?;
            print!("{}", listing.format_terminal(currency));
        }

        ExpenseCommands::Summary {
            month,
            year,
            no_json,
            csv,
            yaml,
            output,
        } => {
            let request = SummaryRequest {
                month,
                year,
                export_json: ctx.settings.export_json && !no_json,
                export_csv: ctx.settings.export_csv || csv,
                export_yaml: yaml,
                export_dir: output
                    .unwrap_or_else(|| ctx.settings.resolve_export_dir(ctx.paths)),
            };

            let outcome = service.generate_summary(request)?;
            print!("{}", outcome.summary.format_terminal(currency));

            for report in &outcome.exports {
                match &report.result {
                    Ok(Some(path)) => {
                        println!("Summary exported to {} ({})", path.display(), report.format)
                    }
                    Ok(None) => {}
                    Err(e) => eprintln!("Warning: {} export failed: {}", report.format, e),
                }
            }
        }

        ExpenseCommands::Log { count } => {
            let log = TimingLog::new(ctx.paths.timing_log());
            let events = log.read_recent(count)?;

            if events.is_empty() {
                println!("No operations logged yet.");
                return Ok(());
            }

            for event in &events {
                println!("{}", event);
            }
        }
    }

    Ok(())
}

/// Print a notice for anything other than a healthy existing document
pub fn report_init_status(status: &InitStatus, store: &ExpenseStore) {
    match status {
        InitStatus::Existing => {}
        InitStatus::Created => {
            eprintln!("Created new expenses file at {}", store.path().display());
        }
        InitStatus::Recovered { backup_path } => {
            eprintln!(
                "Warning: {} was corrupted. Backed up to {} and started a new file.",
                store.path().display(),
                backup_path.display()
            );
        }
        InitStatus::Overwritten { reason } => {
            eprintln!("Warning: corrupted expenses file was replaced. {}", reason);
        }
        InitStatus::Failed { reason } => {
            eprintln!("Error: could not initialize expenses file: {}", reason);
        }
    }
}
