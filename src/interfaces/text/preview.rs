//! Plain-text print previews.

use super::format::{
    deposit_label, final_payment_label, format_amount, second_payment_label,
};
use crate::domain::calculator::PaymentBreakdown;
use crate::domain::document::{CompanyInfo, Document};
use crate::domain::invoice::Invoice;
use crate::domain::line_item::LineItem;
use crate::domain::money::CurrencyAmountMap;
use crate::domain::quotation::Quotation;

const RULE: &str =
    "------------------------------------------------------------------------";

fn party(label: &str, info: &CompanyInfo) -> String {
    if info.country.is_empty() {
        format!("{label:<8}{}", info.company)
    } else {
        format!("{label:<8}{} ({})", info.company, info.country)
    }
}

fn item_rows(items: &[LineItem], document_currency: &str, lines: &mut Vec<String>) {
    lines.push(format!(
        "{:<3} {:<28} {:>6} {:>15} {:>15}",
        "#", "Item", "Qty", "Rate", "Amount"
    ));
    lines.push(RULE.to_string());
    for (n, item) in items.iter().enumerate() {
        let currency = item.effective_currency(document_currency);
        let name = if item.code.is_empty() {
            item.name.clone()
        } else {
            format!("[{}] {}", item.code, item.name)
        };
        lines.push(format!(
            "{:<3} {:<28} {:>6} {:>15} {:>15}",
            n + 1,
            name,
            item.quantity,
            format_amount(currency, item.rate),
            format_amount(currency, item.amount()),
        ));
        for detail in &item.details {
            lines.push(format!("      - {detail}"));
        }
    }
    lines.push(RULE.to_string());
}

fn summary_row(label: &str, value: String) -> String {
    format!("{label:<40} {value:>31}")
}

/// Per-currency total, deposit, second payment and final payment rows.
fn payment_rows(quotation: &Quotation, breakdown: &PaymentBreakdown, lines: &mut Vec<String>) {
    let config = quotation.payment_config();
    for currency in breakdown.currencies() {
        let amount = |map: &CurrencyAmountMap| {
            format_amount(currency, map.get(currency).unwrap_or(0.0))
        };

        lines.push(summary_row(&format!("Total ({currency})"), amount(&breakdown.totals)));
        if breakdown.deposits.get(currency).is_some() {
            lines.push(summary_row(
                &format!("{} ({currency})", deposit_label(&config)),
                amount(&breakdown.deposits),
            ));
        }
        if breakdown.second_payments.get(currency).is_some() {
            lines.push(summary_row(
                &format!("{} ({currency})", second_payment_label(&config)),
                amount(&breakdown.second_payments),
            ));
        }
        lines.push(summary_row(
            &format!("{} ({currency})", final_payment_label(&config)),
            amount(&breakdown.final_payments),
        ));
    }
}

pub fn render_quotation(quotation: &Quotation) -> String {
    let breakdown = quotation.breakdown();
    let mut lines = vec![
        format!("QUOTATION {}", quotation.quotation_id),
        format!("{:<8}{}", "Date", quotation.quotation_date),
        party("From", &quotation.quotation_from),
        party("For", &quotation.quotation_for),
        format!("{:<8}{}", "Project", quotation.project_title),
        format!("{:<8}{}", "Payment", quotation.payment_type.label()),
        String::new(),
    ];

    item_rows(&quotation.items, &quotation.currency, &mut lines);
    payment_rows(quotation, &breakdown, &mut lines);

    if !quotation.terms.is_empty() {
        lines.push(String::new());
        lines.push("Terms".to_string());
        for (n, term) in quotation.terms.iter().enumerate() {
            lines.push(format!("{}. {term}", n + 1));
        }
    }
    if !quotation.bank_account.is_empty() {
        lines.push(String::new());
        lines.push(format!("Bank account: {}", quotation.bank_account));
    }

    lines.join("\n") + "\n"
}

pub fn render_invoice(invoice: &Invoice) -> String {
    let summary = invoice.summary();
    let mut lines = vec![
        format!("INVOICE {}", invoice.invoice_id),
        format!("{:<8}{}", "Date", invoice.invoice_date),
        party("From", &invoice.invoice_from),
        party("To", &invoice.invoice_to),
        String::new(),
    ];

    item_rows(&invoice.items, &invoice.currency, &mut lines);
    lines.push(summary_row(
        "Subtotal",
        format_amount(&summary.currency, summary.subtotal),
    ));
    lines.push(summary_row(
        "Reductions",
        format!("({})", format_amount(&summary.currency, summary.reduction)),
    ));
    lines.push(summary_row(
        "Total",
        format_amount(&summary.currency, summary.total),
    ));
    lines.push(format!("{} {} Only", summary.currency, summary.total_in_words));

    if !invoice.bank_account.is_empty() {
        lines.push(String::new());
        lines.push(format!("Bank account: {}", invoice.bank_account));
    }

    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentType;

    fn quotation() -> Quotation {
        Quotation {
            quotation_id: "Q-001".into(),
            project_title: "Website".into(),
            items: vec![
                LineItem::new(2.0, 100.0, "RM").with_name("Design"),
                LineItem::new(1.0, 50.0, "USD").with_name("Domain"),
            ],
            deposit_percent: 30.0,
            terms: vec!["Valid for 30 days".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_quotation_preview_rows() {
        let text = render_quotation(&quotation());
        assert!(text.starts_with("QUOTATION Q-001"));
        assert!(text.contains("Design"));
        assert!(text.contains("RM 200.00"));
        assert!(text.contains("Deposit (30%) (RM)"));
        assert!(text.contains("RM 60.00"));
        assert!(text.contains("Final Payment (70%) (USD)"));
        assert!(text.contains("USD 35.00"));
        assert!(text.contains("1. Valid for 30 days"));
        assert!(!text.contains("Second Payment"));
    }

    #[test]
    fn test_recurring_preview_has_no_deposit_row() {
        let mut q = quotation();
        q.payment_type = PaymentType::Recurring;
        let text = render_quotation(&q);
        assert!(!text.contains("Deposit"));
        assert!(text.contains("Final Payment (RM)"));
    }

    #[test]
    fn test_invoice_preview() {
        let invoice = Invoice {
            invoice_id: "INV-1".into(),
            items: vec![LineItem::new(1.0, 1000.0, "RM").with_name("Retainer")],
            reduction_amount: 50.0,
            ..Default::default()
        };
        let text = render_invoice(&invoice);
        assert!(text.contains("Subtotal"));
        assert!(text.contains("(RM 50.00)"));
        assert!(text.contains("RM 950.00"));
        assert!(text.contains("RM Nine Hundred Fifty Only"));
    }
}
