//! Battle.net API client: OAuth token, realm resolution, auction fetch.

use crate::models::{
    AuctionsResponse, ConnectedRealmResponse, RawAuction, RealmResponse, TokenResponse,
};
use chrono::{DateTime, Utc};
use goldwatch_core::{config::ApiConfig, Error, Listing, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Auction dumps run to tens of megabytes.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// A fully materialized auction snapshot for one realm.
#[derive(Debug, Clone)]
pub struct AuctionSnapshot {
    /// When the dump was fetched.
    pub fetched_at: DateTime<Utc>,
    /// Decoded listings.
    pub listings: Vec<Listing>,
}

/// Authenticated Battle.net API client for one region.
pub struct BlizzardClient {
    http: Client,
    api_base: String,
    namespace: String,
    locale: String,
    token: String,
}

impl BlizzardClient {
    /// Build a client and fetch an OAuth token via the client-credentials
    /// grant.
    pub async fn connect(config: &ApiConfig) -> Result<Self> {
        if config.client_id.is_empty() || config.client_secret.is_empty() {
            return Err(Error::config("OAuth client id and secret must be set"));
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| Error::api(format!("failed to build HTTP client: {err}")))?;

        let oauth_url = format!("https://{}.battle.net/oauth/token", config.region);
        let response = http
            .post(&oauth_url)
            .basic_auth(&config.client_id, Some(&config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|err| Error::api(format!("OAuth token request failed: {err}")))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(Error::auth("OAuth client id or secret was rejected"));
        }
        if !response.status().is_success() {
            return Err(Error::api(format!(
                "OAuth token request returned HTTP {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|err| Error::data(format!("malformed OAuth token response: {err}")))?;

        info!(region = %config.region, "authenticated against Battle.net OAuth");

        Ok(Self {
            http,
            api_base: format!("https://{}.api.blizzard.com", config.region),
            namespace: format!("dynamic-{}", config.region),
            locale: config.locale.clone(),
            token: token.access_token,
        })
    }

    /// Download the full auction dump for a realm slug.
    pub async fn fetch_auctions(&self, realm_slug: &str) -> Result<AuctionSnapshot> {
        let url = self.auctions_url(realm_slug).await?;
        info!(%url, "downloading auction dump");

        let dump: AuctionsResponse = self.get_json(&url).await?;
        let listings: Vec<Listing> = dump
            .auctions
            .into_iter()
            .map(RawAuction::into_listing)
            .collect();

        info!(listings = listings.len(), "downloaded auction snapshot");

        Ok(AuctionSnapshot {
            fetched_at: Utc::now(),
            listings,
        })
    }

    /// Resolve the connected-realm auctions URL for a realm slug.
    async fn auctions_url(&self, realm_slug: &str) -> Result<String> {
        let realm_url = format!("{}/data/wow/realm/{}", self.api_base, realm_slug);
        let realm: RealmResponse = self.get_json(&realm_url).await?;
        debug!(href = %realm.connected_realm.href, "resolved connected realm");

        let connected: ConnectedRealmResponse = self.get_json(&realm.connected_realm.href).await?;
        Ok(connected.auctions.href)
    }

    /// Authenticated GET with the dynamic namespace and locale applied.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header("Battlenet-Namespace", &self.namespace)
            .query(&[("locale", self.locale.as_str())])
            .send()
            .await
            .map_err(|err| Error::api(format!("request to {url} failed: {err}")))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(Error::auth("access token was rejected"));
        }
        if !response.status().is_success() {
            return Err(Error::api(format!(
                "{url} returned HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|err| Error::data(format!("malformed response from {url}: {err}")))
    }
}
