use super::calculator::PaymentBreakdown;
use super::line_item::{ItemField, LineItem};
use super::money::{CurrencyAmountMap, DEFAULT_CURRENCY};
use super::payment::PaymentConfig;
use crate::error::{DocumentError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(default)]
    pub company: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompanyField {
    Company(String),
    Country(String),
}

impl CompanyInfo {
    pub fn apply(&mut self, field: CompanyField) {
        match field {
            CompanyField::Company(v) => self.company = v,
            CompanyField::Country(v) => self.country = v,
        }
    }
}

/// Behaviour shared by quotations and invoices.
///
/// Item editing is provided here so both document kinds edit their rows the
/// same way. Index arguments are checked and reported as
/// [`DocumentError::IndexOutOfRange`].
pub trait Document:
    Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Storage key the whole collection is kept under.
    const STORAGE_KEY: &'static str;
    /// Rate given to a freshly added line item.
    const NEW_ITEM_RATE: f64;

    /// Partial document accepted by JSON import.
    type Patch: DeserializeOwned;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    /// Human-facing document number (quotation or invoice id).
    fn code(&self) -> &str;
    fn set_code(&mut self, code: String);
    fn created_at(&self) -> &str;
    fn set_created_at(&mut self, at: String);
    fn updated_at(&self) -> &str;
    fn set_updated_at(&mut self, at: String);
    /// Counterparty shown in history listings.
    fn recipient(&self) -> &str;
    fn date(&self) -> &str;
    fn currency(&self) -> &str;
    fn items(&self) -> &[LineItem];
    fn items_mut(&mut self) -> &mut Vec<LineItem>;
    fn payment_config(&self) -> PaymentConfig;
    /// Whether the document has the fields required to be saved.
    fn is_valid(&self) -> bool;
    /// Merges an imported patch into this document.
    fn apply_patch(&mut self, patch: Self::Patch);

    fn breakdown(&self) -> PaymentBreakdown {
        PaymentBreakdown::compute(self.items(), self.currency(), &self.payment_config())
    }

    /// Headline amount per currency, as shown in history listings.
    fn amount_due(&self) -> CurrencyAmountMap {
        self.breakdown().totals
    }

    fn add_item(&mut self) {
        let currency = match self.currency() {
            "" => DEFAULT_CURRENCY.to_string(),
            c => c.to_string(),
        };
        self.items_mut()
            .push(LineItem::new(1.0, Self::NEW_ITEM_RATE, currency));
    }

    fn duplicate_item(&mut self, index: usize) -> Result<()> {
        let copy = item_at(self.items(), index)?.clone();
        self.items_mut().insert(index + 1, copy);
        Ok(())
    }

    fn remove_item(&mut self, index: usize) -> Result<LineItem> {
        item_at(self.items(), index)?;
        Ok(self.items_mut().remove(index))
    }

    fn update_item(&mut self, index: usize, field: ItemField) -> Result<()> {
        item_at_mut(self.items_mut(), index)?.apply(field);
        Ok(())
    }

    fn add_item_detail(&mut self, index: usize) -> Result<()> {
        item_at_mut(self.items_mut(), index)?
            .details
            .push(String::new());
        Ok(())
    }

    fn remove_item_detail(&mut self, index: usize, detail: usize) -> Result<()> {
        let details = &mut item_at_mut(self.items_mut(), index)?.details;
        check_index(detail, details.len())?;
        details.remove(detail);
        Ok(())
    }

    fn update_item_detail(&mut self, index: usize, detail: usize, value: String) -> Result<()> {
        let details = &mut item_at_mut(self.items_mut(), index)?.details;
        check_index(detail, details.len())?;
        details[detail] = value;
        Ok(())
    }

    /// Sets the document currency and moves every line item onto it.
    fn set_currency_everywhere(&mut self, currency: String) {
        for item in self.items_mut().iter_mut() {
            item.currency = currency.clone();
        }
        self.set_document_currency(currency);
    }

    fn set_document_currency(&mut self, currency: String);
}

pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(DocumentError::IndexOutOfRange { index, len })
    }
}

fn item_at(items: &[LineItem], index: usize) -> Result<&LineItem> {
    check_index(index, items.len())?;
    Ok(&items[index])
}

fn item_at_mut(items: &mut [LineItem], index: usize) -> Result<&mut LineItem> {
    check_index(index, items.len())?;
    Ok(&mut items[index])
}

/// Line item as it appears in an imported JSON document.
///
/// `amount` is accepted because exports of older documents carry it, but it is
/// always re-derived from quantity and rate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub details: Vec<String>,
    #[serde(default)]
    pub code: String,
    pub quantity: f64,
    pub rate: f64,
    pub currency: Option<String>,
    pub amount: Option<f64>,
}

impl ImportedItem {
    /// Currency falls back to the imported document currency, then to the
    /// current document currency, then to [`DEFAULT_CURRENCY`].
    pub fn into_line_item(self, patch_currency: Option<&str>, current_currency: &str) -> LineItem {
        let currency = self
            .currency
            .or_else(|| patch_currency.map(str::to_string))
            .unwrap_or_else(|| match current_currency {
                "" => DEFAULT_CURRENCY.to_string(),
                c => c.to_string(),
            });

        LineItem {
            name: self.name,
            details: self.details,
            code: self.code,
            quantity: self.quantity,
            rate: self.rate,
            currency,
        }
    }
}

pub(crate) fn import_items(
    items: Vec<ImportedItem>,
    patch_currency: Option<&str>,
    current_currency: &str,
) -> Vec<LineItem> {
    items
        .into_iter()
        .map(|item| item.into_line_item(patch_currency, current_currency))
        .collect()
}
