//! Stats Pipeline
//!
//! Runs one `/stats` invocation: price fetch, validator fetch, then
//! calculation and formatting. Each invocation owns its state; nothing is
//! cached between calls.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::{Result, StakingError};
use crate::explorer::ValidatorFetcher;
use crate::market::PriceFetcher;
use crate::model::{
    PriceQuote, ReturnsReport, StakeParameters, ValidatorSnapshot, DEFAULT_ASSET, DEFAULT_CURRENCY,
    DEFAULT_VALIDATOR_INDEX,
};
use crate::svckit::{compute, format_report};

/// Progress of a single invocation
#[derive(Debug)]
pub enum StatsState {
    /// Command received, nothing fetched yet
    Idle,
    AwaitingPrice,
    AwaitingValidator {
        quote: PriceQuote,
    },
    Computed {
        snapshot: ValidatorSnapshot,
        report: ReturnsReport,
    },
    /// Terminal: formatted report
    Replied(String),
    /// Terminal: either fetch failed
    Failed(StakingError),
}

impl StatsState {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Replied(_) | Self::Failed(_))
    }
}

/// The `/stats` command pipeline
#[derive(Clone)]
pub struct StatsPipeline {
    prices: Arc<dyn PriceFetcher>,
    validators: Arc<dyn ValidatorFetcher>,
    params: StakeParameters,
    validator_index: u64,
    asset: String,
    currency: String,
}

impl StatsPipeline {
    /// Pipeline for the default validator, priced in ETH/USD
    pub fn new(prices: Arc<dyn PriceFetcher>, validators: Arc<dyn ValidatorFetcher>) -> Self {
        Self {
            prices,
            validators,
            params: StakeParameters::default(),
            validator_index: DEFAULT_VALIDATOR_INDEX,
            asset: DEFAULT_ASSET.into(),
            currency: DEFAULT_CURRENCY.into(),
        }
    }

    /// Replace the stake parameters. Rejects a non-positive entry price or
    /// stake size.
    pub fn with_params(mut self, params: StakeParameters) -> Result<Self> {
        params.validate()?;
        self.params = params;
        Ok(self)
    }

    pub fn with_validator_index(mut self, index: u64) -> Self {
        self.validator_index = index;
        self
    }

    pub fn params(&self) -> &StakeParameters {
        &self.params
    }

    /// Advance one transition
    pub async fn step(&self, state: StatsState, today: NaiveDate) -> StatsState {
        match state {
            StatsState::Idle => StatsState::AwaitingPrice,
            StatsState::AwaitingPrice => {
                match self.prices.fetch_price(&self.asset, &self.currency).await {
                    Ok(quote) => StatsState::AwaitingValidator { quote },
                    Err(e) => StatsState::Failed(e),
                }
            }
            StatsState::AwaitingValidator { quote } => {
                match self.validators.fetch_validator(self.validator_index).await {
                    Ok(snapshot) => {
                        let report = compute(&quote, &snapshot, &self.params, today);
                        StatsState::Computed { snapshot, report }
                    }
                    Err(e) => StatsState::Failed(e),
                }
            }
            StatsState::Computed { snapshot, report } => {
                StatsState::Replied(format_report(&snapshot, &report))
            }
            terminal => terminal,
        }
    }

    /// Run to a terminal state
    pub async fn run(&self, today: NaiveDate) -> Result<String> {
        let mut state = StatsState::Idle;
        loop {
            state = match self.step(state, today).await {
                StatsState::Replied(text) => return Ok(text),
                StatsState::Failed(e) => return Err(e),
                next => next,
            };
        }
    }

    /// Run and produce the chat reply. Failures are logged and answered
    /// with the generic error text.
    pub async fn reply(&self, today: NaiveDate) -> String {
        self.run(today).await.unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                price_source = self.prices.name(),
                validator_source = self.validators.name(),
                "Stats pipeline failed"
            );
            e.user_message().to_string()
        })
    }
}
