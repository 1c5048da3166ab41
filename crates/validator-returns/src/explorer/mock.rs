//! Mock Validator Fetcher

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::ValidatorFetcher;
use crate::error::{Result, StakingError};
use crate::model::ValidatorSnapshot;

/// Mock validator fetcher returning balances for any requested index
pub struct MockValidatorFetcher {
    /// (balance, effective balance) in gwei, `None` simulates an outage
    balances: Option<(u64, u64)>,
    calls: AtomicUsize,
}

impl MockValidatorFetcher {
    pub fn new(balance: u64, effective_balance: u64) -> Self {
        Self {
            balances: Some((balance, effective_balance)),
            calls: AtomicUsize::new(0),
        }
    }
    
    pub fn failing() -> Self {
        Self { balances: None, calls: AtomicUsize::new(0) }
    }
    
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ValidatorFetcher for MockValidatorFetcher {
    async fn fetch_validator(&self, index: u64) -> Result<ValidatorSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        
        let (balance, effective_balance) = self.balances
            .ok_or_else(|| StakingError::ValidatorUnavailable("mock outage".into()))?;
        
        Ok(ValidatorSnapshot {
            validator_index: index,
            status: "active_online".into(),
            slashed: false,
            balance,
            effective_balance,
        })
    }
    
    fn name(&self) -> &str {
        "MockValidator"
    }
}
