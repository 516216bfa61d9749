use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::info;

use docseed::cli::logging::init_logging;
use docseed::cli::{self, Args, CliConfig, CliUtils, SeedTarget};
use docseed::{seed_and_close, DocumentStore, MemoryStore, MongoStore, SeedError};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            match error.downcast_ref::<SeedError>() {
                Some(seed_error) => cli::handle_error(seed_error),
                None => CliUtils::show_error(&format!("{:#}", error)),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    cli::load_env_file(args.env_file.as_deref())?;
    init_logging(args.verbose, args.quiet, args.json_logs);

    let config = CliConfig::from_args(args)?;
    let seed_config = config.seed_config.clone();

    let summary = match &config.target {
        SeedTarget::DryRun => {
            info!("dry run: no database will be modified");
            seed_and_close(MemoryStore::new(), seed_config).await?
        }
        SeedTarget::Mongo { uri, database } => {
            let store = MongoStore::connect(uri, database.as_deref())
                .await
                .map_err(SeedError::from)?;
            info!(store = %store.describe(), "connected");
            seed_and_close(store, seed_config).await?
        }
    };

    cli::print_summary(&summary, &config);
    Ok(())
}
