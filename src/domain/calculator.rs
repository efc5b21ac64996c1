//! Per-currency payment arithmetic.
//!
//! All functions are pure: they never mutate their inputs and return fresh
//! maps. Percentages are not validated or clamped, so out-of-range values flow
//! straight through the arithmetic and a final payment can come out negative.

use super::line_item::LineItem;
use super::money::CurrencyAmountMap;
use super::payment::{PaymentConfig, PaymentType};
use serde::Serialize;

/// Sums `quantity * rate` per effective currency. No rounding.
pub fn compute_totals(items: &[LineItem], document_currency: &str) -> CurrencyAmountMap {
    let mut totals = CurrencyAmountMap::new();
    for item in items {
        totals.accumulate(item.effective_currency(document_currency), item.amount());
    }
    totals
}

/// Deposit per currency, or an empty map for recurring payments.
pub fn compute_deposits(
    payment_type: PaymentType,
    deposit_percent: f64,
    totals: &CurrencyAmountMap,
) -> CurrencyAmountMap {
    if payment_type == PaymentType::Recurring {
        return CurrencyAmountMap::new();
    }
    totals.map_amounts(|total| total * deposit_percent / 100.0)
}

/// Second payment per currency, or an empty map when there is none.
pub fn compute_second_payments(
    has_second_payment: bool,
    second_payment_percent: f64,
    totals: &CurrencyAmountMap,
) -> CurrencyAmountMap {
    if !has_second_payment {
        return CurrencyAmountMap::new();
    }
    totals.map_amounts(|total| total * second_payment_percent / 100.0)
}

/// What remains of each total after the deposit and second payment.
///
/// `totals` decides the key set; a currency missing from `deposits` or
/// `second_payments` contributes zero.
pub fn compute_final_payments(
    totals: &CurrencyAmountMap,
    deposits: &CurrencyAmountMap,
    second_payments: &CurrencyAmountMap,
) -> CurrencyAmountMap {
    let mut finals = CurrencyAmountMap::new();
    for (currency, total) in totals.iter() {
        let deposit = deposits.get(currency).unwrap_or(0.0);
        let second = second_payments.get(currency).unwrap_or(0.0);
        finals.insert(currency, total - deposit - second);
    }
    finals
}

/// The four maps for one document, computed together.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    pub totals: CurrencyAmountMap,
    pub deposits: CurrencyAmountMap,
    pub second_payments: CurrencyAmountMap,
    pub final_payments: CurrencyAmountMap,
}

impl PaymentBreakdown {
    pub fn compute(items: &[LineItem], document_currency: &str, config: &PaymentConfig) -> Self {
        let totals = compute_totals(items, document_currency);
        let deposits = compute_deposits(config.payment_type, config.deposit_percent, &totals);
        let second_payments = compute_second_payments(
            config.has_second_payment,
            config.second_payment_percent,
            &totals,
        );
        let final_payments = compute_final_payments(&totals, &deposits, &second_payments);

        Self {
            totals,
            deposits,
            second_payments,
            final_payments,
        }
    }

    /// Currencies in display order.
    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.totals.currencies()
    }
}
