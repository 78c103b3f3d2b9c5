//! Configuration structures for the goldwatch updater.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the updater.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Battle.net API configuration.
    pub api: ApiConfig,
    /// Aggregation and market value estimation configuration.
    pub market: MarketConfig,
    /// Addon output configuration.
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            market: MarketConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Battle.net API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API region (e.g., "eu", "us").
    pub region: String,
    /// Realm slug to fetch auctions for.
    pub realm: String,
    /// Locale for API responses.
    pub locale: String,
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            region: "eu".to_string(),
            realm: String::new(),
            locale: "en_US".to_string(),
            client_id: String::new(),
            client_secret: String::new(),
        }
    }
}

/// Aggregation and market value estimation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Divisor converting the smallest currency unit into the display unit.
    pub currency_scale: f64,
    /// Percentile of units always included in the estimation window.
    pub trim_percentile: f64,
    /// Maximum percentile the estimation window may extend to.
    pub extend_percentile: f64,
    /// Maximum price ratio between adjacent buckets while extending.
    pub bucket_jump_limit: f64,
    /// Standard deviation cutoff for the window filter.
    pub std_dev_cutoff: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            currency_scale: 10_000.0,
            trim_percentile: 15.0,
            extend_percentile: 30.0,
            bucket_jump_limit: 1.2,
            std_dev_cutoff: 1.5,
        }
    }
}

/// Addon output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root of the game installation.
    pub wow_directory: PathBuf,
    /// Addon the data file is written for.
    pub addon_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            wow_directory: PathBuf::new(),
            addon_name: "GoldWatch".to_string(),
        }
    }
}
