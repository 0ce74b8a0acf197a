//! CLI configuration management.
//!
//! All connection settings can be provided via CLI arguments or environment
//! variables; use `--help` to see the available options.
//!
//! # Example
//!
//! ```bash
//! soundstore --base-url https://api.soundstore.dev category list
//!
//! # Or via environment variables
//! SOUNDSTORE_BASE_URL=https://api.soundstore.dev soundstore category list
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use soundstore_client::session::FileCredentialStore;
use soundstore_client::{ApiClient, ApiConfig};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::TRACING_TARGET_CONFIG;
use crate::commands::Commands;

/// Complete CLI configuration.
#[derive(Debug, Parser)]
#[command(name = "soundstore")]
#[command(about = "SoundStore catalog administration")]
#[command(version)]
pub struct Cli {
    /// Connection settings for the catalog API.
    #[clap(flatten)]
    pub connection: ConnectionConfig,

    /// Print raw JSON values instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings for the catalog API.
#[derive(Debug, Clone, clap::Args)]
pub struct ConnectionConfig {
    /// Base URL of the catalog API.
    #[arg(long, env = "SOUNDSTORE_BASE_URL")]
    pub base_url: String,

    /// Path of the file the session token is persisted in.
    #[arg(
        long,
        env = "SOUNDSTORE_SESSION_FILE",
        default_value = ".soundstore-session.json"
    )]
    pub session_file: PathBuf,

    /// Request timeout in seconds.
    #[arg(long, env = "SOUNDSTORE_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses
    /// CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is
    /// enabled. Called before parsing so clap's `env` fallbacks can pick up
    /// values from .env files.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Logs the effective connection configuration.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            base_url = %self.connection.base_url,
            session_file = %self.connection.session_file.display(),
            timeout_secs = self.connection.timeout_secs,
            json = self.json,
            "connection configuration"
        );
    }
}

impl ConnectionConfig {
    /// Builds the API client over the persisted session file.
    pub fn api_client(&self) -> anyhow::Result<ApiClient> {
        let config = ApiConfig::builder()
            .with_base_url(&self.base_url)
            .context("invalid base URL")?
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .context("invalid client configuration")?;

        let store = Arc::new(FileCredentialStore::new(&self.session_file));

        ApiClient::new(config, store).context("failed to create API client")
    }
}
