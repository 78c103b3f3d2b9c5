//! Market value estimation from a price histogram.
//!
//! Derives a single representative unit price from a variant's full
//! price/quantity distribution. The estimate tracks the cheap end of the
//! book, so sellers listing far above market rate barely move it, and the
//! standard-deviation filter keeps a lone bargain listing from dragging a
//! well-populated estimate down.

use goldwatch_aggregation::PriceHistogram;
use goldwatch_core::{Error, MarketValueSummary, Quantity, Result};
use statrs::statistics::Statistics;
use tracing::trace;

/// Configuration for market value estimation.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Percentile of units (cheapest first) always included in the window.
    pub trim_percentile: f64,
    /// Maximum percentile the window may extend to.
    pub extend_percentile: f64,
    /// Maximum price ratio between adjacent buckets while extending.
    pub bucket_jump_limit: f64,
    /// Units outside mean ± cutoff·σ of the window are discarded.
    pub std_dev_cutoff: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            trim_percentile: 15.0,
            extend_percentile: 30.0,
            bucket_jump_limit: 1.2,
            std_dev_cutoff: 1.5,
        }
    }
}

/// Market value estimator.
///
/// Pure function of the histogram and its configuration; applied
/// independently per variant.
pub struct MarketValueEstimator {
    config: EstimatorConfig,
}

impl MarketValueEstimator {
    /// Create a new estimator.
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Estimate the market value summary for one variant's histogram.
    ///
    /// The histogram is viewed as an ascending sequence of per-unit prices,
    /// each bucket contributing `quantity` units at its price. The cheapest
    /// `trim_percentile` of units is always included; the window then extends
    /// unit by unit up to `extend_percentile`, stopping at the first bucket
    /// whose price exceeds the previous bucket's by more than
    /// `bucket_jump_limit`. The market value is the mean of the window after
    /// discarding units outside `std_dev_cutoff` population standard
    /// deviations of the window mean.
    ///
    /// The estimate is deterministic, scales linearly with a uniform price
    /// scaling, and always lies within the histogram's price range.
    pub fn estimate(&self, histogram: &PriceHistogram) -> Result<MarketValueSummary> {
        let min_price = histogram.min_price().ok_or_else(|| {
            Error::insufficient_data("cannot estimate market value of an empty histogram")
        })?;

        for (price, quantity) in histogram.iter() {
            if !price.is_finite() || price <= 0.0 {
                return Err(Error::data(format!("invalid price {price} in histogram")));
            }
            if quantity == 0 {
                return Err(Error::data(format!("zero quantity at price {price}")));
            }
        }

        let total_quantity = histogram.total_quantity();
        trace!(
            buckets = histogram.bucket_count(),
            total_quantity,
            "estimating market value"
        );

        let window = self.trimmed_window(histogram, total_quantity);
        let market_value = if window.len() < 2 {
            window[0]
        } else {
            self.damped_mean(&window)
        };

        Ok(MarketValueSummary {
            market_value,
            quantity: total_quantity,
            min_price,
        })
    }

    /// Expand the cheapest units of the histogram into the estimation window.
    fn trimmed_window(&self, histogram: &PriceHistogram, total_quantity: Quantity) -> Vec<f64> {
        let guaranteed = percentile_count(self.config.trim_percentile, total_quantity);
        let limit = percentile_count(self.config.extend_percentile, total_quantity);

        let mut window: Vec<f64> = Vec::with_capacity(limit as usize);
        let mut last_price: Option<f64> = None;

        'buckets: for (price, quantity) in histogram.iter() {
            if window.len() as Quantity >= guaranteed {
                if let Some(last) = last_price {
                    if price > last * self.config.bucket_jump_limit {
                        break;
                    }
                }
            }

            for _ in 0..quantity {
                window.push(price);
                if window.len() as Quantity >= limit {
                    break 'buckets;
                }
            }
            last_price = Some(price);
        }

        window
    }

    /// Mean of the window after the standard-deviation filter.
    fn damped_mean(&self, window: &[f64]) -> f64 {
        let mean = window.iter().mean();
        let tolerance = self.config.std_dev_cutoff * window.iter().population_std_dev();
        let (lo, hi) = (mean - tolerance, mean + tolerance);

        let kept: Vec<f64> = window
            .iter()
            .copied()
            .filter(|price| *price >= lo && *price <= hi)
            .collect();

        if kept.is_empty() {
            mean
        } else {
            kept.iter().mean()
        }
    }
}

/// Number of units covered by a percentile of the total, at least one.
fn percentile_count(percentile: f64, total_units: Quantity) -> Quantity {
    let count = ((percentile / 100.0) * total_units as f64).floor() as Quantity;
    count.max(1)
}
