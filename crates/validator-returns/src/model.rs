//! Domain Models
//!
//! Data types for a single staked validator position.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StakingError};

/// Smallest on-chain units (gwei) per whole ETH
pub const GWEI_PER_ETH: u64 = 1_000_000_000;

/// Days used to annualize a return
pub const DAYS_PER_YEAR: u32 = 365;

/// The validator the bot reports on
pub const DEFAULT_VALIDATOR_INDEX: u64 = 30670;

pub const DEFAULT_ASSET: &str = "ETH";
pub const DEFAULT_CURRENCY: &str = "USD";

/// Spot price of an asset in a reference currency
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Ticker symbol (e.g., "ETH")
    pub asset: String,

    /// Reference currency (e.g., "USD")
    pub currency: String,

    /// Price of one unit of `asset` in `currency`
    pub price: Decimal,
}

impl PriceQuote {
    pub fn new(asset: impl Into<String>, currency: impl Into<String>, price: Decimal) -> Self {
        Self {
            asset: asset.into().to_uppercase(),
            currency: currency.into().to_uppercase(),
            price,
        }
    }
}

/// Current on-chain state of one validator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSnapshot {
    pub validator_index: u64,

    /// Provider status string (e.g., "active_online", "exited")
    pub status: String,

    pub slashed: bool,

    /// Balance in gwei
    pub balance: u64,

    /// Effective balance in gwei
    pub effective_balance: u64,
}

impl ValidatorSnapshot {
    /// Balance in whole ETH
    pub fn balance_in_units(&self) -> Decimal {
        Decimal::from(self.balance) / Decimal::from(GWEI_PER_ETH)
    }
}

/// Fixed parameters of the stake position
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeParameters {
    /// Price per unit when the stake was made
    pub entry_price: Decimal,

    /// Validator activation date
    pub start_date: NaiveDate,

    /// Units deposited
    pub stake_size: Decimal,
}

impl StakeParameters {
    /// Entry price and stake size divide every ratio, so both must be positive
    pub fn validate(&self) -> Result<()> {
        if self.entry_price <= Decimal::ZERO {
            return Err(StakingError::InvalidParameters(format!(
                "entry price must be positive, got {}",
                self.entry_price
            )));
        }
        if self.stake_size <= Decimal::ZERO {
            return Err(StakingError::InvalidParameters(format!(
                "stake size must be positive, got {}",
                self.stake_size
            )));
        }
        Ok(())
    }
}

impl Default for StakeParameters {
    fn default() -> Self {
        Self {
            entry_price: dec!(550),
            start_date: NaiveDate::from_ymd_opt(2020, 12, 13).unwrap_or_default(),
            stake_size: dec!(32),
        }
    }
}

/// Metrics derived from a quote, a snapshot and the stake parameters.
///
/// Ratios are unrounded; rounding is done when formatting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnsReport {
    pub days_staked: u32,

    /// Balance above effective balance, in whole units (may be negative)
    pub gains_in_units: Decimal,

    pub price_appreciation: Decimal,

    pub current_return: Decimal,

    /// Staking return compounded with price appreciation
    pub effective_current_return: Decimal,

    /// `None` when `days_staked` is zero
    pub annualized_return: Option<Decimal>,

    /// `None` when `days_staked` is zero
    pub effective_annualized_return: Option<Decimal>,
}
