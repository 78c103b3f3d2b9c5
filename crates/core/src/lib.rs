//! Core types and configuration for the goldwatch market value pipeline.
//!
//! This crate provides shared types used across all other crates:
//! - Auction listing and variant key types
//! - Market value summary type
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
