use crate::domain::money::CurrencyAmountMap;
use crate::domain::payment::PaymentConfig;
use rust_decimal::prelude::*;

/// Rounds an amount to the 2 decimals used everywhere amounts are displayed,
/// halves away from zero. `None` for values with no decimal form (NaN,
/// infinities, out of range).
pub fn round_display(amount: f64) -> Option<Decimal> {
    let mut value = Decimal::from_f64(amount)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(2);
    if value.is_zero() {
        value.set_sign_positive(true);
    }
    Some(value)
}

/// `"RM 123.45"`.
pub fn format_amount(currency: &str, amount: f64) -> String {
    match round_display(amount) {
        Some(value) => format!("{currency} {value}"),
        None => format!("{currency} {amount:.2}"),
    }
}

/// Every bucket formatted and joined, in display order: `"RM 200.00; USD 50.00"`.
pub fn format_amounts(amounts: &CurrencyAmountMap) -> String {
    amounts
        .iter()
        .map(|(currency, amount)| format_amount(currency, amount))
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_percent(percent: f64) -> String {
    // Whole percentages print without a fraction, like the form input.
    if percent.fract() == 0.0 {
        format!("{percent:.0}%")
    } else {
        format!("{percent}%")
    }
}

pub fn deposit_label(config: &PaymentConfig) -> String {
    format!("Deposit ({})", format_percent(config.deposit_percent))
}

pub fn second_payment_label(config: &PaymentConfig) -> String {
    format!("Second Payment ({})", format_percent(config.second_payment_percent))
}

/// `"Final Payment (70%)"`, or just `"Final Payment"` when the split carries
/// no percentage.
pub fn final_payment_label(config: &PaymentConfig) -> String {
    match config.final_payment_percent() {
        Some(percent) => format!("Final Payment ({})", format_percent(percent)),
        None => "Final Payment".to_string(),
    }
}
