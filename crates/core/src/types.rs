//! Core data types for the goldwatch pipeline.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Normalized unit price with total ordering, usable as a map key.
pub type Price = OrderedFloat<f64>;

/// Number of units observed at a price.
pub type Quantity = u64;

/// A single auction-house sell order.
///
/// Prices are in the game's smallest currency unit. Exactly one of the two
/// price fields is authoritative: `buyout` when present and nonzero,
/// otherwise `unit_price`. A listing with neither carries no price signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Item identifier.
    pub item_id: u32,
    /// Ordered bonus/modifier identifiers (order is part of variant identity).
    pub bonus_ids: Vec<u32>,
    /// Units in the stack.
    pub quantity: Quantity,
    /// Total buyout price for the auction.
    pub buyout: Option<u64>,
    /// Per-unit price for commodity auctions.
    pub unit_price: Option<u64>,
}

impl Listing {
    /// The authoritative raw price, if the listing has one.
    #[inline]
    pub fn raw_price(&self) -> Option<u64> {
        match self.buyout {
            Some(buyout) if buyout != 0 => Some(buyout),
            _ => match self.unit_price {
                Some(unit_price) if unit_price != 0 => Some(unit_price),
                _ => None,
            },
        }
    }
}

/// Identity of an item variant: item id plus the ordered bonus id list.
///
/// Structural equality and ordering; `[1, 2]` and `[2, 1]` are distinct
/// variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemVariant {
    /// Item identifier.
    pub item_id: u32,
    /// Ordered bonus identifiers.
    pub bonus_ids: Vec<u32>,
}

impl ItemVariant {
    /// Create a variant key.
    pub fn new(item_id: u32, bonus_ids: Vec<u32>) -> Self {
        Self { item_id, bonus_ids }
    }

    /// The variant key of a listing.
    pub fn from_listing(listing: &Listing) -> Self {
        Self {
            item_id: listing.item_id,
            bonus_ids: listing.bonus_ids.clone(),
        }
    }
}

/// Market value summary for one item variant.
///
/// Computed once per run from a complete histogram; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketValueSummary {
    /// Estimated market value per unit, in display currency units.
    pub market_value: f64,
    /// Total units observed across all price buckets.
    pub quantity: Quantity,
    /// Smallest unit price observed.
    pub min_price: f64,
}
