//! Report Formatter
//!
//! Renders a returns report as the `/stats` chat reply.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::model::{ReturnsReport, ValidatorSnapshot};

/// Shown in place of an annualized figure when no full day has been staked
pub const NOT_AVAILABLE: &str = "N/A";

/// Render the report. Line order and blank-line grouping are fixed:
///
/// ```text
/// Validator: 30670
/// Status: active_online
/// Slashed: False
///
/// Total ETH Balance: 33.000
/// ETH Earned: 1.000ETH
///
/// Current Price Appreciation: 9.09%
///
/// Validating Current Returns: 3.13%
/// Effective Current Returns: 12.50%
///
/// Validating Annualized Return: 3.13%
/// Effective APR: 12.50%
/// ```
pub fn format_report(snapshot: &ValidatorSnapshot, report: &ReturnsReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Validator: {}\n", snapshot.validator_index));
    output.push_str(&format!("Status: {}\n", snapshot.status));
    output.push_str(&format!("Slashed: {}\n", title_case(snapshot.slashed)));
    output.push('\n');

    let balance = fixed(snapshot.balance_in_units(), 3);
    output.push_str(&format!("Total ETH Balance: {balance}\n"));
    output.push_str(&format!("ETH Earned: {}ETH\n", fixed(report.gains_in_units, 3)));
    output.push('\n');

    let appreciation = percent(report.price_appreciation);
    output.push_str(&format!("Current Price Appreciation: {appreciation}\n"));
    output.push('\n');

    let current = percent(report.current_return);
    let effective_current = percent(report.effective_current_return);
    output.push_str(&format!("Validating Current Returns: {current}\n"));
    output.push_str(&format!("Effective Current Returns: {effective_current}\n"));
    output.push('\n');

    let annualized = optional_percent(report.annualized_return);
    let effective_annualized = optional_percent(report.effective_annualized_return);
    output.push_str(&format!("Validating Annualized Return: {annualized}\n"));
    output.push_str(&format!("Effective APR: {effective_annualized}"));

    output
}

/// `True` / `False`
const fn title_case(flag: bool) -> &'static str {
    if flag { "True" } else { "False" }
}

/// Round half away from zero to `dp` places, always printing `dp` digits
fn fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(dp);
    rounded.to_string()
}

fn percent(ratio: Decimal) -> String {
    format!("{}%", fixed(ratio * dec!(100), 2))
}

fn optional_percent(ratio: Option<Decimal>) -> String {
    ratio.map_or_else(|| NOT_AVAILABLE.to_string(), percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PriceQuote, StakeParameters};
    use crate::svckit::compute;
    use chrono::NaiveDate;

    fn snapshot() -> ValidatorSnapshot {
        ValidatorSnapshot {
            validator_index: 30670,
            status: "active_online".into(),
            slashed: false,
            balance: 33_000_000_000,
            effective_balance: 32_000_000_000,
        }
    }

    fn report_on(today: NaiveDate) -> ReturnsReport {
        let quote = PriceQuote::new("ETH", "USD", dec!(600));
        compute(&quote, &snapshot(), &StakeParameters::default(), today)
    }

    #[test]
    fn test_full_report_layout() {
        let report = report_on(NaiveDate::from_ymd_opt(2021, 12, 13).unwrap());
        let text = format_report(&snapshot(), &report);

        let expected = "Validator: 30670\n\
            Status: active_online\n\
            Slashed: False\n\
            \n\
            Total ETH Balance: 33.000\n\
            ETH Earned: 1.000ETH\n\
            \n\
            Current Price Appreciation: 9.09%\n\
            \n\
            Validating Current Returns: 3.13%\n\
            Effective Current Returns: 12.50%\n\
            \n\
            Validating Annualized Return: 3.13%\n\
            Effective APR: 12.50%";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_slashed_validator() {
        let slashed = ValidatorSnapshot {
            slashed: true,
            status: "exited_slashed".into(),
            ..snapshot()
        };
        let report = report_on(NaiveDate::from_ymd_opt(2021, 12, 13).unwrap());
        let text = format_report(&slashed, &report);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "Status: exited_slashed");
        assert_eq!(lines[2], "Slashed: True");
    }

    #[test]
    fn test_zero_days_renders_not_available() {
        let report = report_on(NaiveDate::from_ymd_opt(2020, 12, 13).unwrap());
        let text = format_report(&snapshot(), &report);

        assert!(text.contains("Validating Annualized Return: N/A\n"));
        assert!(text.ends_with("Effective APR: N/A"));
        assert!(text.contains("Validating Current Returns: 3.13%"));
    }

    #[test]
    fn test_formatting_is_byte_identical() {
        let report = report_on(NaiveDate::from_ymd_opt(2022, 2, 28).unwrap());
        assert_eq!(format_report(&snapshot(), &report), format_report(&snapshot(), &report));
    }

    #[test]
    fn test_fixed_rounding() {
        assert_eq!(fixed(dec!(3.125), 2), "3.13");
        assert_eq!(fixed(dec!(-3.125), 2), "-3.13");
        assert_eq!(fixed(dec!(1), 3), "1.000");
        assert_eq!(fixed(dec!(32.9996), 3), "33.000");
        assert_eq!(fixed(dec!(-0.0004), 3), "0.000");
    }

    #[test]
    fn test_negative_percent() {
        assert_eq!(percent(dec!(-0.0909090909)), "-9.09%");
        assert_eq!(optional_percent(None), "N/A");
    }
}
