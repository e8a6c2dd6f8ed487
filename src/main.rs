use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use money_tracker::audit::AuditLogger;
use money_tracker::cli::{
    handle_account_command, handle_backup_command, handle_stats_command,
    handle_transaction_command,
};
use money_tracker::config::{Settings, TrackerPaths};
use money_tracker::services::AccountRegistry;
use money_tracker::storage::Storage;

/// Environment variable holding the log filter
const LOG_ENV: &str = "MONEY_TRACKER_LOG";

#[derive(Parser)]
#[command(
    name = "money-tracker",
    version,
    about = "Multi-account income and expense tracker",
    long_about = "Money Tracker records income and expenses across several accounts, \
                  each with its own currency, and reports totals, category breakdowns \
                  and monthly trends. Data can be exported to and restored from CSV."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management commands
    #[command(subcommand)]
    Account(money_tracker::cli::AccountCommands),

    /// Transaction commands for the current account
    #[command(subcommand, alias = "txn")]
    Transaction(money_tracker::cli::TransactionCommands),

    /// Statistics for the current account
    #[command(subcommand)]
    Stats(money_tracker::cli::StatsCommands),

    /// CSV export and import
    #[command(subcommand)]
    Backup(money_tracker::cli::BackupCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    if !paths.settings_file().exists() {
        settings.save(&paths)?;
    }

    // Initialize storage
    let mut storage = Storage::open(&paths, &settings)?;
    storage.subscribe(AuditLogger::new(paths.audit_log()));

    match cli.command {
        Some(Commands::Account(cmd)) => {
            handle_account_command(&storage, cmd)?;
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, cmd)?;
        }
        Some(Commands::Stats(cmd)) => {
            handle_stats_command(&storage, cmd)?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&storage, cmd)?;
        }
        Some(Commands::Audit { limit }) => {
            let entries = AuditLogger::new(paths.audit_log()).read_recent(limit)?;
            if entries.is_empty() {
                println!("No audit entries yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Config) => {
            let registry = AccountRegistry::initialize(&storage)?;

            println!("Money Tracker Configuration");
            println!("===========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Base currency:        {}", settings.base_currency);
            println!("  Default account name: {}", settings.default_account_name);
            println!("  Date format:          {}", settings.date_format);
            println!();
            println!("Current account: {}", registry.current().name);
        }
        None => {
            println!("Money Tracker - multi-account income and expense tracking");
            println!();
            println!("Run 'money-tracker --help' for usage information.");
        }
    }

    Ok(())
}
