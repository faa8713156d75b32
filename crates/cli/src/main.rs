//! Storefront terminal client

use std::process;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

mod commands;
mod config;
mod storage;

#[tokio::main]
pub async fn main() {
    let config = CliConfig::load().unwrap_or_else(|error| error.exit());

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    debug!(data_dir = %config.data_dir.display(), "loaded configuration");

    if let Err(error) = commands::run(config).await {
        #[expect(clippy::print_stderr, reason = "command failures are reported to the user")]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}
