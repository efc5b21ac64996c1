use super::money::DEFAULT_CURRENCY;
use serde::{Deserialize, Serialize};

/// One billable row on a quotation or invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub name: String,
    /// Free-text sub-lines shown under the item name.
    #[serde(default)]
    pub details: Vec<String>,
    /// Invoice item code. Quotations leave it empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code: String,
    pub quantity: f64,
    pub rate: f64,
    /// May be empty, in which case the document currency applies.
    #[serde(default)]
    pub currency: String,
}

impl LineItem {
    pub fn new(quantity: f64, rate: f64, currency: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            details: Vec::new(),
            code: String::new(),
            quantity,
            rate,
            currency: currency.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn amount(&self) -> f64 {
        self.quantity * self.rate
    }

    /// The bucket this item accumulates into: its own currency, else the
    /// document currency, else [`DEFAULT_CURRENCY`].
    pub fn effective_currency<'a>(&'a self, document_currency: &'a str) -> &'a str {
        if !self.currency.is_empty() {
            &self.currency
        } else if !document_currency.is_empty() {
            document_currency
        } else {
            DEFAULT_CURRENCY
        }
    }
}

/// A typed edit to a single line item field.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemField {
    Name(String),
    Code(String),
    Quantity(f64),
    Rate(f64),
    Currency(String),
    Details(Vec<String>),
}

impl LineItem {
    pub fn apply(&mut self, field: ItemField) {
        match field {
            ItemField::Name(v) => self.name = v,
            ItemField::Code(v) => self.code = v,
            ItemField::Quantity(v) => self.quantity = v,
            ItemField::Rate(v) => self.rate = v,
            ItemField::Currency(v) => self.currency = v,
            ItemField::Details(v) => self.details = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_currency_fallbacks() {
        let own = LineItem::new(1.0, 1.0, "USD");
        assert_eq!(own.effective_currency("EUR"), "USD");

        let inherit = LineItem::new(1.0, 1.0, "");
        assert_eq!(inherit.effective_currency("EUR"), "EUR");
        assert_eq!(inherit.effective_currency(""), "RM");
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let item: LineItem = serde_json::from_str(r#"{"quantity": 2, "rate": 10.5}"#).unwrap();
        assert_eq!(item.amount(), 21.0);
        assert!(item.currency.is_empty());
        assert!(item.details.is_empty());
    }

    #[test]
    fn test_apply_field() {
        let mut item = LineItem::new(1.0, 1.0, "RM");
        item.apply(ItemField::Rate(99.0));
        item.apply(ItemField::Name("Design".into()));
        assert_eq!(item.rate, 99.0);
        assert_eq!(item.name, "Design");
    }
}
