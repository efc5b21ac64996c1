use crate::domain::calculator::PaymentBreakdown;
use crate::domain::money::CurrencyAmountMap;
use crate::error::Result;
use crate::interfaces::text::format::round_display;
use std::io::Write;

/// Writes a payment breakdown as CSV, one row per currency in display order.
///
/// Amounts use the 2-decimal display policy. A deposit or second payment that
/// does not apply leaves its cell empty.
pub struct BreakdownWriter<W: Write> {
    writer: csv::Writer<W>,
}

fn cell(map: &CurrencyAmountMap, currency: &str) -> String {
    map.get(currency)
        .and_then(round_display)
        .map(|v| v.to_string())
        .unwrap_or_default()
}

impl<W: Write> BreakdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }

    pub fn write_breakdown(&mut self, breakdown: &PaymentBreakdown) -> Result<()> {
        self.writer.write_record([
            "currency",
            "total",
            "deposit",
            "second_payment",
            "final_payment",
        ])?;
        for currency in breakdown.currencies() {
            self.writer.write_record([
                currency.to_string(),
                cell(&breakdown.totals, currency),
                cell(&breakdown.deposits, currency),
                cell(&breakdown.second_payments, currency),
                cell(&breakdown.final_payments, currency),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
