//! Market value estimation for the goldwatch pipeline.
//!
//! This crate handles:
//! - Deriving a single representative unit price per variant histogram
//! - Outlier damping for far-above-market and bargain listings

pub mod market_value;

pub use market_value::{EstimatorConfig, MarketValueEstimator};
