//! Environment-driven configuration loading.
//!
//! The configuration is built once at startup and passed down by reference;
//! no other part of the pipeline reads the environment.

use anyhow::{Context, Result};
use goldwatch_core::config::{ApiConfig, Config, MarketConfig, OutputConfig};
use std::env;
use std::path::PathBuf;

/// Build the runtime configuration from the process environment.
///
/// Reads a `.env` file when present, then requires `OAUTH_CLIENT`,
/// `OAUTH_SECRET`, `REGION`, `REALM` and `WOW_DIRECTORY`. `LOCALE` and
/// `ADDON_NAME` fall back to the defaults; the market policy always uses
/// the defaults.
pub fn load() -> Result<Config> {
    dotenvy::dotenv().ok();

    let defaults = Config::default();
    Ok(Config {
        api: ApiConfig {
            client_id: require("OAUTH_CLIENT")?,
            client_secret: require("OAUTH_SECRET")?,
            region: require("REGION")?,
            realm: require("REALM")?,
            locale: env::var("LOCALE").unwrap_or(defaults.api.locale),
        },
        market: MarketConfig::default(),
        output: OutputConfig {
            wow_directory: PathBuf::from(require("WOW_DIRECTORY")?),
            addon_name: env::var("ADDON_NAME").unwrap_or(defaults.output.addon_name),
        },
    })
}

fn require(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("environment variable {name} is not set"))
}
