//! Mock Price Fetcher
//!
//! For testing and demo purposes. Returns a fixed price or always fails.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::PriceFetcher;
use crate::error::{Result, StakingError};
use crate::model::PriceQuote;

/// Mock price fetcher with a static price
pub struct MockPriceFetcher {
    /// `None` simulates a provider outage
    price: Option<Decimal>,
    calls: AtomicUsize,
}

impl MockPriceFetcher {
    pub fn new(price: Decimal) -> Self {
        Self { price: Some(price), calls: AtomicUsize::new(0) }
    }
    
    /// Fetcher whose every call fails
    pub fn failing() -> Self {
        Self { price: None, calls: AtomicUsize::new(0) }
    }
    
    /// Number of `fetch_price` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceFetcher for MockPriceFetcher {
    async fn fetch_price(&self, asset: &str, currency: &str) -> Result<PriceQuote> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        
        self.price
            .map(|price| PriceQuote::new(asset, currency, price))
            .ok_or_else(|| StakingError::PriceUnavailable("mock outage".into()))
    }
    
    fn name(&self) -> &str {
        "MockPrice"
    }
}
