//! Market value updater binary.
//!
//! Fetches the auction dump for the configured realm, aggregates it into
//! per-variant price histograms, estimates a market value per variant and
//! writes the addon data file.

mod logging;
mod settings;
mod writer;

use anyhow::Result;
use goldwatch_aggregation::ListingAggregator;
use goldwatch_client::BlizzardClient;
use goldwatch_core::{Config, ItemVariant, Listing, MarketValueSummary};
use goldwatch_stats::{EstimatorConfig, MarketValueEstimator};
use std::collections::BTreeMap;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = settings::load()?;
    logging::init();

    info!(
        region = %config.api.region,
        realm = %config.api.realm,
        "starting market value update"
    );

    let client = BlizzardClient::connect(&config.api).await?;
    let snapshot = client.fetch_auctions(&config.api.realm).await?;

    let summaries = compute_market_values(&config, &snapshot.listings)?;
    info!(
        variants = summaries.len(),
        fetched_at = %snapshot.fetched_at,
        "estimated market values"
    );

    let path = writer::write_addon_data(&config.output, &summaries)?;
    info!(path = %path.display(), "update complete");

    Ok(())
}

/// Aggregate listings and estimate a market value per variant.
///
/// Variants without observations are never handed to the estimator.
fn compute_market_values(
    config: &Config,
    listings: &[Listing],
) -> Result<BTreeMap<ItemVariant, MarketValueSummary>> {
    let aggregator = ListingAggregator::new(config.market.currency_scale)?;
    let histograms = aggregator.aggregate(listings)?;
    info!(
        variants = histograms.len(),
        "aggregated listings into price histograms"
    );

    let estimator = MarketValueEstimator::new(EstimatorConfig {
        trim_percentile: config.market.trim_percentile,
        extend_percentile: config.market.extend_percentile,
        bucket_jump_limit: config.market.bucket_jump_limit,
        std_dev_cutoff: config.market.std_dev_cutoff,
    });

    let mut summaries = BTreeMap::new();
    for (variant, histogram) in &histograms {
        if histogram.is_empty() {
            continue;
        }
        summaries.insert(variant.clone(), estimator.estimate(histogram)?);
    }

    Ok(summaries)
}
