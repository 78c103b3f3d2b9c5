//! Battle.net API client for the goldwatch pipeline.
//!
//! This crate handles:
//! - OAuth client-credentials token acquisition
//! - Connected-realm resolution for a realm slug
//! - Downloading and decoding the auction dump into core listings

pub mod api;
pub mod models;

pub use api::{AuctionSnapshot, BlizzardClient};
