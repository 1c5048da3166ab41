//! Market Data
//!
//! Spot price sources for the staked asset.

mod coinmarketcap;
mod mock;

pub use coinmarketcap::{CoinMarketCapClient, API_KEY_HEADER, COINMARKETCAP_API_URL};
pub use mock::MockPriceFetcher;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::PriceQuote;

/// Price source trait (Strategy pattern)
///
/// Implementations make a single attempt and map every failure to
/// `StakingError::PriceUnavailable`.
#[async_trait]
pub trait PriceFetcher: Send + Sync {
    /// Latest price of `asset` quoted in `currency`
    async fn fetch_price(&self, asset: &str, currency: &str) -> Result<PriceQuote>;

    /// Provider name
    fn name(&self) -> &str;
}
