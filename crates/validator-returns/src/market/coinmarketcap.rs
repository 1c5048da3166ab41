//! CoinMarketCap Client
//!
//! Latest quotes from the CoinMarketCap Pro API (`/v1/cryptocurrency/quotes/latest`).

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{header::ACCEPT, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::PriceFetcher;
use crate::error::{Result, StakingError};
use crate::model::PriceQuote;

pub const COINMARKETCAP_API_URL: &str = "https://pro-api.coinmarketcap.com";

/// Header carrying the API credential
pub const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

const QUOTES_LATEST_PATH: &str = "/v1/cryptocurrency/quotes/latest";

/// CoinMarketCap price fetcher
pub struct CoinMarketCapClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CoinMarketCapClient {
    /// Create a client against the public API.
    ///
    /// The `http` client carries the request timeout.
    pub fn new(http: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: COINMARKETCAP_API_URL.into(),
            api_key: api_key.into(),
        }
    }

    /// Point the client at another host (sandbox, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct QuotesResponse {
    data: HashMap<String, AssetEntry>,
}

#[derive(Debug, Deserialize)]
struct AssetEntry {
    quote: HashMap<String, QuoteEntry>,
}

#[derive(Debug, Deserialize)]
struct QuoteEntry {
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
}

/// Extract `data[asset].quote[currency].price` from a quotes response body
fn parse_quote(body: &str, asset: &str, currency: &str) -> Result<PriceQuote> {
    let response: QuotesResponse = serde_json::from_str(body)
        .map_err(|e| StakingError::PriceUnavailable(format!("malformed response: {e}")))?;

    let price = response
        .data
        .get(asset)
        .and_then(|entry| entry.quote.get(currency))
        .map(|quote| quote.price)
        .ok_or_else(|| {
            StakingError::PriceUnavailable(format!("no {asset}/{currency} quote in response"))
        })?;

    if price <= Decimal::ZERO {
        return Err(StakingError::PriceUnavailable(format!(
            "non-positive {asset}/{currency} price {price}"
        )));
    }

    Ok(PriceQuote::new(asset, currency, price))
}

#[async_trait]
impl PriceFetcher for CoinMarketCapClient {
    async fn fetch_price(&self, asset: &str, currency: &str) -> Result<PriceQuote> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), QUOTES_LATEST_PATH);

        let response = self.http
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("symbol", asset), ("convert", currency)])
            .send()
            .await
            .map_err(|e| StakingError::PriceUnavailable(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(StakingError::PriceUnavailable(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| StakingError::PriceUnavailable(e.to_string()))?;

        let quote = parse_quote(&body, asset, currency)?;
        tracing::debug!(asset, currency, price = %quote.price, "Fetched spot price");
        Ok(quote)
    }

    fn name(&self) -> &str {
        "CoinMarketCap"
    }
}
