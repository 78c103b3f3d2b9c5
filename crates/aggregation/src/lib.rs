//! Listing aggregation for the goldwatch pipeline.
//!
//! This crate handles:
//! - Per-variant price histograms
//! - Grouping raw auction listings into histograms by variant key

pub mod aggregator;
pub mod histogram;

pub use aggregator::ListingAggregator;
pub use histogram::PriceHistogram;
