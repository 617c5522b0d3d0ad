//! Top-level error type for the roster fetcher binary
//!
//! Fetch failures are absorbed by the orchestrator and never show up here;
//! only configuration and persistence problems end the run.

use thiserror::Error;

use crate::cli::CliError;
use crate::output::PersistenceError;

/// Errors that terminate a run with a failure status
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid command-line configuration
    #[error(transparent)]
    Config(#[from] CliError),

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// Writing the output file failed
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
