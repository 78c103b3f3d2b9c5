//! Wire-format models for the Battle.net auction endpoints.
//!
//! Decoding failures here (missing item id, wrong field shapes) abort the
//! whole fetch; the aggregator downstream only ever sees well-formed
//! listings.

use goldwatch_core::Listing;
use serde::Deserialize;

/// OAuth token response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Realm document; only the connected-realm link is used.
#[derive(Debug, Deserialize)]
pub struct RealmResponse {
    pub connected_realm: Link,
}

/// Connected-realm document; only the auctions link is used.
#[derive(Debug, Deserialize)]
pub struct ConnectedRealmResponse {
    pub auctions: Link,
}

/// A hypermedia link.
#[derive(Debug, Deserialize)]
pub struct Link {
    pub href: String,
}

/// Auction dump body.
#[derive(Debug, Deserialize)]
pub struct AuctionsResponse {
    #[serde(default)]
    pub auctions: Vec<RawAuction>,
}

/// One auction as returned by the vendor API.
///
/// Non-commodity auctions carry `buyout` (total stack price); commodity
/// auctions carry `unit_price`.
#[derive(Debug, Deserialize)]
pub struct RawAuction {
    pub id: u64,
    pub item: RawItem,
    pub quantity: u64,
    pub buyout: Option<u64>,
    pub unit_price: Option<u64>,
    pub time_left: Option<String>,
}

/// Item reference inside an auction.
#[derive(Debug, Deserialize)]
pub struct RawItem {
    pub id: u32,
    #[serde(default)]
    pub bonus_lists: Vec<u32>,
}

impl RawAuction {
    /// Convert into the core listing type.
    pub fn into_listing(self) -> Listing {
        Listing {
            item_id: self.item.id,
            bonus_ids: self.item.bonus_lists,
            quantity: self.quantity,
            buyout: self.buyout,
            unit_price: self.unit_price,
        }
    }
}
