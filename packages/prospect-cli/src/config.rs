//! Configuration for the prospect CLI.
//!
//! Values come from the environment (a `.env` file is loaded when present)
//! and can be overridden per invocation by command-line flags.

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use prospecting::finders::{apollo::APOLLO_API_BASE, hunter::HUNTER_API_BASE};

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON document holding contacts, ICP, profile and integrations
    pub store_path: PathBuf,
    /// Contacts resolved at once during bulk discovery
    pub concurrency: usize,
    /// Budget for a single provider lookup
    pub provider_timeout: Duration,
    /// Provider calls per second across the whole run
    pub rate_limit_per_sec: u32,
    pub hunter_api_base: String,
    pub apollo_api_base: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            store_path: env::var("PROSPECT_STORE_PATH")
                .unwrap_or_else(|_| "prospects.json".to_string())
                .into(),
            concurrency: env::var("PROSPECT_CONCURRENCY")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .context("PROSPECT_CONCURRENCY must be a valid number")?,
            provider_timeout: Duration::from_secs(
                env::var("PROSPECT_PROVIDER_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "15".to_string())
                    .parse()
                    .context("PROSPECT_PROVIDER_TIMEOUT_SECS must be a valid number")?,
            ),
            rate_limit_per_sec: env::var("PROSPECT_RATE_LIMIT_PER_SEC")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("PROSPECT_RATE_LIMIT_PER_SEC must be a valid number")?,
            hunter_api_base: env::var("HUNTER_API_BASE")
                .unwrap_or_else(|_| HUNTER_API_BASE.to_string()),
            apollo_api_base: env::var("APOLLO_API_BASE")
                .unwrap_or_else(|_| APOLLO_API_BASE.to_string()),
        })
    }
}
