use super::calculator::compute_totals;
use super::document::{CompanyField, CompanyInfo, Document, ImportedItem, import_items};
use super::ids::generate_id;
use super::line_item::LineItem;
use super::money::{CurrencyAmountMap, DEFAULT_CURRENCY};
use super::payment::PaymentConfig;
use super::words::number_to_words;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invoice {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub invoice_id: String,
    pub invoice_date: String,
    pub bank_account: String,
    pub invoice_from: CompanyInfo,
    pub invoice_to: CompanyInfo,
    pub items: Vec<LineItem>,
    pub currency: String,
    pub reduction_amount: f64,
}

impl Default for Invoice {
    fn default() -> Self {
        Self {
            id: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
            invoice_id: String::new(),
            invoice_date: String::new(),
            bank_account: String::new(),
            invoice_from: CompanyInfo::default(),
            invoice_to: CompanyInfo::default(),
            items: Vec::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            reduction_amount: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceParty {
    From,
    To,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InvoiceField {
    InvoiceId(String),
    InvoiceDate(String),
    BankAccount(String),
    /// Also moves every line item onto the new currency.
    Currency(String),
    ReductionAmount(f64),
    Items(Vec<LineItem>),
}

impl Invoice {
    pub fn update(&mut self, field: InvoiceField) {
        match field {
            InvoiceField::InvoiceId(v) => self.invoice_id = v,
            InvoiceField::InvoiceDate(v) => self.invoice_date = v,
            InvoiceField::BankAccount(v) => self.bank_account = v,
            InvoiceField::Currency(v) => self.set_currency_everywhere(v),
            InvoiceField::ReductionAmount(v) => self.reduction_amount = v,
            InvoiceField::Items(v) => self.items = v,
        }
    }

    pub fn update_company(&mut self, party: InvoiceParty, field: CompanyField) {
        match party {
            InvoiceParty::From => self.invoice_from.apply(field),
            InvoiceParty::To => self.invoice_to.apply(field),
        }
    }

    pub fn summary(&self) -> InvoiceSummary {
        InvoiceSummary::compute(self)
    }
}

/// Subtotal, reduction and amount due for an invoice.
///
/// Only the invoice's own currency bucket counts; rows in other currencies
/// show up in the breakdown but are never folded into this total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub currency: String,
    pub subtotal: f64,
    pub reduction: f64,
    pub total: f64,
    pub total_in_words: String,
}

impl InvoiceSummary {
    pub fn compute(invoice: &Invoice) -> Self {
        let currency = match invoice.currency.as_str() {
            "" => DEFAULT_CURRENCY,
            c => c,
        };
        let subtotal = compute_totals(&invoice.items, currency)
            .get(currency)
            .unwrap_or(0.0);
        let total = subtotal - invoice.reduction_amount;

        Self {
            currency: currency.to_string(),
            subtotal,
            reduction: invoice.reduction_amount,
            total,
            total_in_words: number_to_words(total),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub invoice_id: Option<String>,
    pub invoice_date: Option<String>,
    pub bank_account: Option<String>,
    pub invoice_from: Option<CompanyInfo>,
    pub invoice_to: Option<CompanyInfo>,
    pub items: Option<Vec<ImportedItem>>,
    pub currency: Option<String>,
    pub reduction_amount: Option<f64>,
}

impl Document for Invoice {
    const STORAGE_KEY: &'static str = "invoices";
    const NEW_ITEM_RATE: f64 = 0.0;

    type Patch = InvoicePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn code(&self) -> &str {
        &self.invoice_id
    }

    fn set_code(&mut self, code: String) {
        self.invoice_id = code;
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn set_created_at(&mut self, at: String) {
        self.created_at = at;
    }

    fn updated_at(&self) -> &str {
        &self.updated_at
    }

    fn set_updated_at(&mut self, at: String) {
        self.updated_at = at;
    }

    fn recipient(&self) -> &str {
        &self.invoice_to.company
    }

    fn date(&self) -> &str {
        &self.invoice_date
    }

    fn currency(&self) -> &str {
        &self.currency
    }

    fn set_document_currency(&mut self, currency: String) {
        self.currency = currency;
    }

    fn items(&self) -> &[LineItem] {
        &self.items
    }

    fn items_mut(&mut self) -> &mut Vec<LineItem> {
        &mut self.items
    }

    /// The total after reduction, in the invoice currency only.
    fn amount_due(&self) -> CurrencyAmountMap {
        let summary = self.summary();
        [(summary.currency, summary.total)].into_iter().collect()
    }

    /// Invoices bill the full amount: a one-time split with a 0% deposit and
    /// no second payment, so every deposit bucket is zero.
    fn payment_config(&self) -> PaymentConfig {
        PaymentConfig::default()
    }

    fn is_valid(&self) -> bool {
        !self.invoice_id.trim().is_empty()
    }

    /// Imported invoices always get a fresh id so they never overwrite a
    /// stored record.
    fn apply_patch(&mut self, patch: InvoicePatch) {
        if let Some(items) = patch.items {
            self.items = import_items(items, patch.currency.as_deref(), &self.currency);
        }

        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = patch.$field { self.$field = v; })*
            };
        }
        take!(
            created_at,
            updated_at,
            invoice_id,
            invoice_date,
            bank_account,
            invoice_from,
            invoice_to,
            currency,
            reduction_amount,
        );

        self.id = generate_id();
    }
}
