//! CLI configuration

use std::path::PathBuf;

use clap::Parser;
use storefront::config::StorefrontConfig;

use crate::commands::Command;

/// Storefront terminal client configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-cli", about = "Storefront terminal client", long_about = None)]
pub(crate) struct CliConfig {
    /// Directory holding the cart slot
    #[arg(long, env = "STOREFRONT_DATA_DIR", default_value = ".storefront")]
    pub(crate) data_dir: PathBuf,

    /// Absolute URL orders are posted to
    #[arg(long, env = "STOREFRONT_ENDPOINT")]
    pub(crate) endpoint: Option<String>,

    /// Catalog YAML file; the built-in catalog is used when omitted
    #[arg(long, env = "STOREFRONT_CATALOG")]
    pub(crate) catalog: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub(crate) log_level: String,

    #[command(subcommand)]
    pub(crate) command: Command,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Storefront settings with the endpoint override applied.
    pub(crate) fn storefront(&self) -> StorefrontConfig {
        let mut config = StorefrontConfig::default();

        if let Some(endpoint) = &self.endpoint {
            config.checkout_endpoint.clone_from(endpoint);
        }

        config
    }
}
