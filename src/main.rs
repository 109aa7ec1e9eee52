use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker::cli::{
    handle_expense_command, report_init_status, CommandContext, ExpenseCommands,
};
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::display::{format_header, separator};
use expense_tracker::instrument::{Instrument, StderrReporter, TimingLog};
use expense_tracker::storage::ExpenseStore;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Record personal expenses and summarize them by month",
    long_about = "Record personal expenses from the command line, list them by date \
                  and produce per-category monthly summaries that can be exported \
                  as JSON, CSV or YAML."
)]
struct Cli {
    /// Print the duration of each operation to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Create the data directory, expenses file and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(Commands::Expense(cmd)) => cmd,
        Some(Commands::Init) => {
            println!("Initializing expense tracker at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;

            let store = ExpenseStore::new(paths.expenses_file());
            let status = store.ensure_initialized();
            report_init_status(&status, &store);
            if !status.is_ready() {
                anyhow::bail!("could not create {}", store.path().display());
            }

            println!("Settings written to {}", paths.settings_file().display());
            println!("Initialization complete!");
            return Ok(());
        }
        Some(Commands::Config) => {
            print_config(&paths, &settings);
            return Ok(());
        }
        None => {
            println!("Expense Tracker - personal expenses from the command line");
            println!();
            println!("Run 'expenses --help' for usage information.");
            return Ok(());
        }
    };

    paths.ensure_directories()?;

    let store = ExpenseStore::new(paths.expenses_file());
    report_init_status(&store.ensure_initialized(), &store);

    let mut instruments: Vec<Box<dyn Instrument>> = Vec::new();
    if settings.timing_log_enabled {
        instruments.push(Box::new(TimingLog::new(paths.timing_log())));
    }
    if cli.verbose {
        instruments.push(Box::new(StderrReporter));
    }

    let ctx = CommandContext {
        paths: &paths,
        settings: &settings,
        store: &store,
        instrument: (!instruments.is_empty()).then_some(&instruments as &dyn Instrument),
    };

    handle_expense_command(&ctx, command)?;

    Ok(())
}

fn print_config(paths: &ExpensePaths, settings: &Settings) {
    println!("{}", format_header("Expense Tracker Configuration", 40));
    println!("{}", separator(40));
    println!("Data directory:   {}", paths.base_dir().display());
    println!("Expenses file:    {}", paths.expenses_file().display());
    println!("Timing log:       {}", paths.timing_log().display());
    println!(
        "Export directory: {}",
        settings.resolve_export_dir(paths).display()
    );
    println!();
    println!("Settings (schema v{}):", settings.schema_version);
    println!("  Currency symbol:    {}", settings.currency_symbol);
    println!("  Timing log enabled: {}", settings.timing_log_enabled);
    println!("  Export JSON:        {}", settings.export_json);
    println!("  Export CSV:         {}", settings.export_csv);
}
