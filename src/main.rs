//! Roster fetcher - download the enabled GeoVictoria user roster
//!
//! Fetches the roster once, prints a summary and writes it to a JSON file.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use rosterfetch::cache::RosterCache;
use rosterfetch::cli::{Cli, StartupConfig};
use rosterfetch::data::RosterClient;
use rosterfetch::error::AppError;
use rosterfetch::fetch::{FetchOutcome, UserFetcher};
use rosterfetch::output::{write_summary, write_users};

/// Sets up log output on stderr, filtered by `RUST_LOG` (default `info`)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {}", e);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = StartupConfig::from_cli(&cli)?;
    info!(
        base_url = %config.base_url,
        credentials = config.credentials.kind(),
        max_age_minutes = config.max_age.num_minutes(),
        "fetching user roster"
    );

    let client = RosterClient::with_base_url(config.base_url.as_str(), config.credentials, config.timeout)?;
    let fetcher = UserFetcher::with_max_age(client, config.max_age);

    // One cache per process, injected into the fetcher
    let mut cache = RosterCache::new();
    let (users, outcome) = fetcher.fetch_users_with_outcome(&mut cache).await;
    if outcome == FetchOutcome::Empty {
        warn!("no roster available, writing an empty list");
    }

    write_users(&config.output, &users)?;
    info!(path = %config.output.display(), count = users.len(), "roster saved");

    // The summary is informational; a closed stdout must not fail the run
    if config.show_summary {
        if let Err(e) = write_summary(&mut io::stdout().lock(), &users) {
            warn!(error = %e, "failed to print roster summary");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "roster fetch aborted");
            ExitCode::FAILURE
        }
    }
}
