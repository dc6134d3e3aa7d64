//! Approval gate CLI entrypoint.
//!
//! Exit status is `0` when the pull request satisfies the approval policy
//! and `1` otherwise, including when the check cannot run.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use approval_gate::{CheckError, CheckOutcome, GateConfig};
use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(outcome) => ExitCode::from(outcome.exit_status()),
        Err(error) => {
            if error.is_configuration() {
                tracing::error!(%error, "approval gate is misconfigured");
            } else {
                tracing::error!(%error, "approval gate failed before reporting a verdict");
            }
            if let Err(write_error) = writeln!(io::stderr().lock(), "{error}") {
                tracing::trace!("failed to write error to stderr: {write_error}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<CheckOutcome, CheckError> {
    let config = load_config()?;
    cli::approval::run(&config).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`CheckError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<GateConfig, CheckError> {
    GateConfig::load().map_err(|error| CheckError::Configuration {
        message: error.to_string(),
    })
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`, defaulting to
/// `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
