//! Block Explorer
//!
//! On-chain validator state sources.

mod beaconchain;
mod mock;

pub use beaconchain::{BeaconChainClient, BEACONCHAIN_API_URL};
pub use mock::MockValidatorFetcher;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::ValidatorSnapshot;

/// Validator state source trait
///
/// Implementations make a single attempt and map every failure to
/// `StakingError::ValidatorUnavailable`.
#[async_trait]
pub trait ValidatorFetcher: Send + Sync {
    /// Current balance and status of validator `index`
    async fn fetch_validator(&self, index: u64) -> Result<ValidatorSnapshot>;

    /// Provider name
    fn name(&self) -> &str;
}
