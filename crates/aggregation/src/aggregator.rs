//! Grouping of raw listings into per-variant price histograms.

use crate::histogram::PriceHistogram;
use goldwatch_core::{Error, ItemVariant, Listing, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Groups auction listings into per-variant price histograms.
///
/// Stateless apart from the currency scale; every call to [`aggregate`]
/// starts from an empty mapping.
///
/// [`aggregate`]: ListingAggregator::aggregate
pub struct ListingAggregator {
    /// Divisor converting the smallest currency unit into the display unit.
    currency_scale: f64,
}

impl ListingAggregator {
    /// Create an aggregator for the given currency scale.
    pub fn new(currency_scale: f64) -> Result<Self> {
        if !currency_scale.is_finite() || currency_scale <= 0.0 {
            return Err(Error::config(format!(
                "currency scale must be a positive number, got {currency_scale}"
            )));
        }
        Ok(Self { currency_scale })
    }

    /// Aggregate listings into per-variant histograms in a single pass.
    ///
    /// Listings without a usable price signal (no buyout and no unit price,
    /// or both zero) are skipped and never create histogram entries. A zero
    /// quantity on a priced listing fails the whole call.
    pub fn aggregate(&self, listings: &[Listing]) -> Result<BTreeMap<ItemVariant, PriceHistogram>> {
        let mut histograms: BTreeMap<ItemVariant, PriceHistogram> = BTreeMap::new();
        let mut skipped = 0usize;

        for listing in listings {
            let raw_price = match listing.raw_price() {
                Some(raw_price) => raw_price,
                None => {
                    skipped += 1;
                    continue;
                }
            };

            if listing.quantity == 0 {
                return Err(Error::data(format!(
                    "listing for item {} has a price but zero quantity",
                    listing.item_id
                )));
            }

            let unit_price = raw_price as f64 / self.currency_scale;
            histograms
                .entry(ItemVariant::from_listing(listing))
                .or_default()
                .add(unit_price, listing.quantity);
        }

        debug!(
            listings = listings.len(),
            skipped,
            variants = histograms.len(),
            "aggregated listings into price histograms"
        );

        Ok(histograms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_listing(
        item_id: u32,
        bonus_ids: Vec<u32>,
        quantity: u64,
        buyout: Option<u64>,
        unit_price: Option<u64>,
    ) -> Listing {
        Listing {
            item_id,
            bonus_ids,
            quantity,
            buyout,
            unit_price,
        }
    }

    #[test]
    fn test_rejects_bad_currency_scale() {
        assert!(ListingAggregator::new(0.0).is_err());
        assert!(ListingAggregator::new(-10_000.0).is_err());
        assert!(ListingAggregator::new(f64::NAN).is_err());
        assert!(ListingAggregator::new(10_000.0).is_ok());
    }

    #[test]
    fn test_buyout_and_unit_price_listings() {
        let aggregator = ListingAggregator::new(10_000.0).unwrap();
        let listings = vec![
            make_listing(100, vec![], 1, Some(100_000), None),
            make_listing(100, vec![], 5, None, Some(8_000)),
            make_listing(100, vec![], 3, Some(0), Some(0)),
        ];

        let histograms = aggregator.aggregate(&listings).unwrap();
        assert_eq!(histograms.len(), 1);

        let hist = &histograms[&ItemVariant::new(100, vec![])];
        assert_eq!(hist.bucket_count(), 2);
        assert_eq!(hist.total_quantity(), 6);
        assert_relative_eq!(hist.min_price().unwrap(), 0.8);
        assert_relative_eq!(hist.max_price().unwrap(), 10.0);

        let buckets: Vec<(f64, u64)> = hist.iter().collect();
        assert_eq!(buckets, vec![(0.8, 5), (10.0, 1)]);
    }

    #[test]
    fn test_unpriced_listings_create_no_entries() {
        let aggregator = ListingAggregator::new(10_000.0).unwrap();
        let listings = vec![
            make_listing(200, vec![], 3, None, None),
            make_listing(201, vec![], 3, Some(0), Some(0)),
        ];

        let histograms = aggregator.aggregate(&listings).unwrap();
        assert!(histograms.is_empty());
    }

    #[test]
    fn test_empty_input_produces_empty_mapping() {
        let aggregator = ListingAggregator::new(10_000.0).unwrap();
        let histograms = aggregator.aggregate(&[]).unwrap();
        assert!(histograms.is_empty());
    }

    #[test]
    fn test_bonus_order_produces_distinct_variants() {
        let aggregator = ListingAggregator::new(10_000.0).unwrap();
        let listings = vec![
            make_listing(100, vec![1, 2], 1, Some(50_000), None),
            make_listing(100, vec![2, 1], 1, Some(50_000), None),
        ];

        let histograms = aggregator.aggregate(&listings).unwrap();
        assert_eq!(histograms.len(), 2);
        assert!(histograms.contains_key(&ItemVariant::new(100, vec![1, 2])));
        assert!(histograms.contains_key(&ItemVariant::new(100, vec![2, 1])));
    }

    #[test]
    fn test_aggregation_is_order_independent() {
        let aggregator = ListingAggregator::new(10_000.0).unwrap();
        let forward = vec![
            make_listing(100, vec![], 2, Some(30_000), None),
            make_listing(100, vec![], 4, None, Some(25_000)),
            make_listing(300, vec![7], 1, Some(90_000), None),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = aggregator.aggregate(&forward).unwrap();
        let b = aggregator.aggregate(&reversed).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_same_price_listings_merge_into_one_bucket() {
        let aggregator = ListingAggregator::new(10_000.0).unwrap();
        let listings = vec![
            make_listing(100, vec![], 2, None, Some(50_000)),
            make_listing(100, vec![], 3, None, Some(50_000)),
        ];

        let histograms = aggregator.aggregate(&listings).unwrap();
        let hist = &histograms[&ItemVariant::new(100, vec![])];
        assert_eq!(hist.bucket_count(), 1);
        assert_eq!(hist.total_quantity(), 5);
    }

    #[test]
    fn test_total_quantity_matches_usable_listings() {
        let aggregator = ListingAggregator::new(10_000.0).unwrap();
        let listings = vec![
            make_listing(100, vec![], 2, Some(10_000), None),
            make_listing(100, vec![], 7, None, Some(20_000)),
            make_listing(100, vec![], 11, None, None),
        ];

        let histograms = aggregator.aggregate(&listings).unwrap();
        let hist = &histograms[&ItemVariant::new(100, vec![])];
        assert_eq!(hist.total_quantity(), 9);
    }

    #[test]
    fn test_zero_quantity_with_price_fails() {
        let aggregator = ListingAggregator::new(10_000.0).unwrap();
        let listings = vec![make_listing(100, vec![], 0, Some(10_000), None)];

        let result = aggregator.aggregate(&listings);
        assert!(matches!(result, Err(Error::Data(_))));
    }
}
