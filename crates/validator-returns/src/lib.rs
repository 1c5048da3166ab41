//! # validator-returns
//!
//! Financial performance of a staked Ethereum validator position.
//!
//! Combines a live spot price (CoinMarketCap) with on-chain validator
//! balances (beaconcha.in) into a short text report for a chat bot.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ PriceFetcher │──▶│ ValidatorFetcher │──▶│   compute    │──▶│ format_report│
//! │  ETH / USD   │   │  validator 30670 │   │ returns math │   │  chat reply  │
//! └──────┬───────┘   └────────┬─────────┘   └──────────────┘   └──────────────┘
//!        │ fail               │ fail
//!        └────────────────────┴──────────▶  "Error"
//! ```
//!
//! The two fetches run strictly in order, once each, with no retries and no
//! caching. A report is only built when both succeed.
//!
//! ## Metrics
//!
//! | Metric                       | Formula                                   |
//! |------------------------------|-------------------------------------------|
//! | gains                        | (balance − effective balance) / 1e9       |
//! | price appreciation           | (price − entry price) / entry price       |
//! | current return               | gains / 32                                |
//! | effective current return     | (1 + current)(1 + appreciation) − 1       |
//! | annualized return            | gains / days × 365 / 32, N/A on day zero  |
//! | effective annualized return  | (1 + annualized)(1 + appreciation) − 1    |

pub mod command;
pub mod error;
pub mod explorer;
pub mod market;
pub mod model;
pub mod pipeline;
pub mod svckit;

#[cfg(test)]
mod testutil;

pub use command::{Command, CommandDispatcher};
pub use error::{Result, StakingError, ERROR_REPLY};
pub use model::{PriceQuote, ReturnsReport, StakeParameters, ValidatorSnapshot};
pub use pipeline::{StatsPipeline, StatsState};
