//! Returns Calculator
//!
//! Derives staking and price returns for the validator position.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::model::{
    PriceQuote, ReturnsReport, StakeParameters, ValidatorSnapshot, DAYS_PER_YEAR, GWEI_PER_ETH,
};

/// Compute the returns report for one invocation.
///
/// Pure: the same inputs always give the same report. A `today` before the
/// start date counts as zero days staked, which leaves the annualized
/// figures undefined (`None`). `params` must have a positive entry price and
/// stake size, as checked by [`StakeParameters::validate`].
pub fn compute(
    quote: &PriceQuote,
    snapshot: &ValidatorSnapshot,
    params: &StakeParameters,
    today: NaiveDate,
) -> ReturnsReport {
    let days_staked = days_between(params.start_date, today);

    let earned_gwei = Decimal::from(snapshot.balance) - Decimal::from(snapshot.effective_balance);
    let gains_in_units = earned_gwei / Decimal::from(GWEI_PER_ETH);

    let price_appreciation = (quote.price - params.entry_price) / params.entry_price;

    let current_return = gains_in_units / params.stake_size;
    let effective_current_return = compound(current_return, price_appreciation);

    // gains * 365 / days keeps a whole-year stake exact in decimal
    let annualized_return = (days_staked > 0).then(|| {
        gains_in_units * Decimal::from(DAYS_PER_YEAR)
            / Decimal::from(days_staked)
            / params.stake_size
    });
    let effective_annualized_return =
        annualized_return.map(|apr| compound(apr, price_appreciation));

    ReturnsReport {
        days_staked,
        gains_in_units,
        price_appreciation,
        current_return,
        effective_current_return,
        annualized_return,
        effective_annualized_return,
    }
}

/// Whole days from `start` to `today`, clamped at zero
fn days_between(start: NaiveDate, today: NaiveDate) -> u32 {
    let days = (today - start).num_days().max(0);
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// (1 + a)(1 + b) - 1
fn compound(a: Decimal, b: Decimal) -> Decimal {
    (Decimal::ONE + a) * (Decimal::ONE + b) - Decimal::ONE
}
