//! Command-line interface module

use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{SeedError, SeedResult};
use crate::parser::DEFAULT_PREFIX;
use crate::seeding::{CollectionOutcome, SeedConfig, SeedSummary};

pub mod logging;

/// Environment variable holding the connection string
pub const URI_ENV: &str = "MONGO_URI";

/// Environment variable naming the target database
pub const DATABASE_ENV: &str = "MONGO_DATABASE";

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "docseed")]
#[command(about = "Seed MongoDB collections from extended-JSON files")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Directory holding the <prefix><collection>.json seed files
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// MongoDB connection string
    #[arg(long, env = URI_ENV, hide_env_values = true)]
    pub uri: Option<String>,

    /// Database to seed (default: the one in the URI, else "test")
    #[arg(long, env = DATABASE_ENV)]
    pub database: Option<String>,

    /// File name prefix of seed files
    #[arg(long, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Load environment variables from this file instead of ./.env
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Look for seed files in subdirectories too
    #[arg(long)]
    pub recursive: bool,

    /// Parse and normalize everything without touching a database
    #[arg(long)]
    pub dry_run: bool,

    /// Abort at the first failed collection or document
    #[arg(long)]
    pub stop_on_error: bool,

    /// Output seeding statistics
    #[arg(long)]
    pub stats: bool,

    /// Enable verbose logging (-vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

/// Where documents go
#[derive(Debug, Clone, PartialEq)]
pub enum SeedTarget {
    /// Nothing is written; an in-memory store stands in for the database
    DryRun,
    Mongo {
        uri: String,
        database: Option<String>,
    },
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub seed_config: SeedConfig,
    pub target: SeedTarget,
}

impl CliConfig {
    /// Create CLI configuration from arguments and the process environment
    pub fn from_args(args: Args) -> SeedResult<Self> {
        Self::from_args_with(args, |key| std::env::var(key).ok())
    }

    /// Like [`CliConfig::from_args`] with an explicit environment lookup
    pub fn from_args_with<F>(args: Args, env: F) -> SeedResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed_config = SeedConfig::new(&args.dir)
            .with_prefix(args.prefix.clone())
            .with_recursive(args.recursive)
            .with_stop_on_error(args.stop_on_error);

        seed_config.validate().map_err(SeedError::configuration)?;

        // values from a .env file arrive after clap has read the environment
        let uri = non_empty(args.uri.clone()).or_else(|| non_empty(env(URI_ENV)));
        let database = non_empty(args.database.clone()).or_else(|| non_empty(env(DATABASE_ENV)));

        let target = if args.dry_run {
            SeedTarget::DryRun
        } else {
            let uri = uri.ok_or_else(|| {
                SeedError::configuration(format!(
                    "{} is not set; pass --uri or add it to .env",
                    URI_ENV
                ))
            })?;
            SeedTarget::Mongo { uri, database }
        };

        Ok(Self {
            args,
            seed_config,
            target,
        })
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    pub fn is_dry_run(&self) -> bool {
        self.target == SeedTarget::DryRun
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Load a dotenv file.
///
/// An explicit path must exist; without one, `./.env` is loaded if present.
pub fn load_env_file(path: Option<&Path>) -> SeedResult<()> {
    match path {
        Some(path) => dotenvy::from_path(path).map(|_| ()).map_err(|e| {
            SeedError::configuration(format!(
                "cannot load environment file {}: {}",
                path.display(),
                e
            ))
        }),
        None => {
            dotenvy::dotenv().ok();
            Ok(())
        }
    }
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("✓ {}", message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("⚠ {}", message);
        }
    }
}

/// One line per collection, for the end-of-run summary
pub fn collection_lines(summary: &SeedSummary) -> Vec<String> {
    summary
        .reports
        .iter()
        .map(|report| match &report.outcome {
            CollectionOutcome::Seeded => format!(
                "{}: {}/{} inserted ({})",
                report.collection,
                report.inserted,
                report.attempted,
                CliUtils::format_duration(Duration::from_millis(report.elapsed_ms))
            ),
            CollectionOutcome::Skipped { reason } => {
                format!("{}: skipped ({})", report.collection, reason)
            }
            CollectionOutcome::Failed { error } => {
                format!("{}: failed ({})", report.collection, error)
            }
        })
        .collect()
}

/// Print the end-of-run summary
pub fn print_summary(summary: &SeedSummary, config: &CliConfig) {
    let quiet = config.is_quiet();

    for (line, report) in collection_lines(summary).iter().zip(&summary.reports) {
        match report.outcome {
            CollectionOutcome::Seeded if report.failures.is_empty() => {
                CliUtils::show_success(line, quiet)
            }
            CollectionOutcome::Failed { .. } => CliUtils::show_error(line),
            _ => CliUtils::show_warning(line, quiet),
        }
    }

    let prefix = if config.is_dry_run() { "[dry run] " } else { "" };
    CliUtils::show_success(
        &format!("{}{}", prefix, summary.statistics.summary_line()),
        quiet,
    );

    if config.want_stats() && !quiet {
        println!("\n{}", summary.statistics.detailed_report());
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &SeedError) {
    CliUtils::show_error(&error.user_message());

    match error {
        SeedError::Configuration { .. } => {
            eprintln!("\nTip: set {} in .env or use --dry-run to check files only", URI_ENV);
        }
        SeedError::Store(_) => {
            eprintln!("\nTip: check that the server in {} is reachable", URI_ENV);
        }
        SeedError::Aborted { .. } => {
            eprintln!("\nTip: drop --stop-on-error to log failures and keep going");
        }
        _ => {}
    }

    eprintln!("\nTry 'docseed --help' for usage information.");
}
