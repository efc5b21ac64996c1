use super::document::{
    CompanyField, CompanyInfo, Document, ImportedItem, check_index, import_items,
};
use super::line_item::LineItem;
use super::money::DEFAULT_CURRENCY;
use super::payment::{PaymentConfig, PaymentType};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A quotation as edited in the form and kept in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quotation {
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    pub quotation_id: String,
    pub quotation_date: String,
    pub bank_account: String,
    pub quotation_from: CompanyInfo,
    pub quotation_for: CompanyInfo,
    pub project_title: String,
    pub payment_type: PaymentType,
    pub items: Vec<LineItem>,
    pub currency: String,
    pub deposit_percent: f64,
    pub has_second_payment: bool,
    pub second_payment_percent: f64,
    pub terms: Vec<String>,
}

impl Default for Quotation {
    fn default() -> Self {
        Self {
            id: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
            quotation_id: String::new(),
            quotation_date: String::new(),
            bank_account: String::new(),
            quotation_from: CompanyInfo::default(),
            quotation_for: CompanyInfo::default(),
            project_title: String::new(),
            payment_type: PaymentType::OneTime,
            items: Vec::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            deposit_percent: 0.0,
            has_second_payment: false,
            second_payment_percent: 0.0,
            terms: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotationParty {
    From,
    For,
}

/// A typed edit to a top-level quotation field.
#[derive(Debug, Clone, PartialEq)]
pub enum QuotationField {
    QuotationId(String),
    QuotationDate(String),
    BankAccount(String),
    ProjectTitle(String),
    PaymentType(PaymentType),
    /// Also moves every line item onto the new currency.
    Currency(String),
    DepositPercent(f64),
    HasSecondPayment(bool),
    SecondPaymentPercent(f64),
    Items(Vec<LineItem>),
    Terms(Vec<String>),
}

impl Quotation {
    pub fn update(&mut self, field: QuotationField) {
        match field {
            QuotationField::QuotationId(v) => self.quotation_id = v,
            QuotationField::QuotationDate(v) => self.quotation_date = v,
            QuotationField::BankAccount(v) => self.bank_account = v,
            QuotationField::ProjectTitle(v) => self.project_title = v,
            QuotationField::PaymentType(v) => self.payment_type = v,
            QuotationField::Currency(v) => self.set_currency_everywhere(v),
            QuotationField::DepositPercent(v) => self.deposit_percent = v,
            QuotationField::HasSecondPayment(v) => self.has_second_payment = v,
            QuotationField::SecondPaymentPercent(v) => self.second_payment_percent = v,
            QuotationField::Items(v) => self.items = v,
            QuotationField::Terms(v) => self.terms = v,
        }
    }

    pub fn update_company(&mut self, party: QuotationParty, field: CompanyField) {
        match party {
            QuotationParty::From => self.quotation_from.apply(field),
            QuotationParty::For => self.quotation_for.apply(field),
        }
    }

    pub fn add_term(&mut self) {
        self.terms.push(String::new());
    }

    pub fn duplicate_term(&mut self, index: usize) -> Result<()> {
        check_index(index, self.terms.len())?;
        let copy = self.terms[index].clone();
        self.terms.insert(index + 1, copy);
        Ok(())
    }

    pub fn remove_term(&mut self, index: usize) -> Result<String> {
        check_index(index, self.terms.len())?;
        Ok(self.terms.remove(index))
    }

    pub fn update_term(&mut self, index: usize, value: String) -> Result<()> {
        check_index(index, self.terms.len())?;
        self.terms[index] = value;
        Ok(())
    }
}

/// Partial quotation read by JSON import. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationPatch {
    pub id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub quotation_id: Option<String>,
    pub quotation_date: Option<String>,
    pub bank_account: Option<String>,
    pub quotation_from: Option<CompanyInfo>,
    pub quotation_for: Option<CompanyInfo>,
    pub project_title: Option<String>,
    pub payment_type: Option<PaymentType>,
    pub items: Option<Vec<ImportedItem>>,
    pub currency: Option<String>,
    pub deposit_percent: Option<f64>,
    pub has_second_payment: Option<bool>,
    pub second_payment_percent: Option<f64>,
    pub terms: Option<Vec<String>>,
}

impl Document for Quotation {
    const STORAGE_KEY: &'static str = "quotations";
    const NEW_ITEM_RATE: f64 = 550.0;

    type Patch = QuotationPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn code(&self) -> &str {
        &self.quotation_id
    }

    fn set_code(&mut self, code: String) {
        self.quotation_id = code;
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
        &self.quotation_for.company
    }

    fn date(&self) -> &str {
        &self.quotation_date
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

    fn payment_config(&self) -> PaymentConfig {
        PaymentConfig {
            payment_type: self.payment_type,
            deposit_percent: self.deposit_percent,
            has_second_payment: self.has_second_payment,
            second_payment_percent: self.second_payment_percent,
        }
    }

    fn is_valid(&self) -> bool {
        !self.quotation_id.trim().is_empty() && !self.project_title.trim().is_empty()
    }

    fn apply_patch(&mut self, patch: QuotationPatch) {
        if let Some(items) = patch.items {
            self.items = import_items(items, patch.currency.as_deref(), &self.currency);
        }

        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = patch.$field { self.$field = v; })*
            };
        }
        take!(
            id,
            created_at,
            updated_at,
            quotation_id,
            quotation_date,
            bank_account,
            quotation_from,
            quotation_for,
            project_title,
            payment_type,
            currency,
            deposit_percent,
            has_second_payment,
            second_payment_percent,
            terms,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::line_item::ItemField;
    use crate::error::DocumentError;

    fn sample() -> Quotation {
        Quotation {
            quotation_id: "Q-001".into(),
            project_title: "Website".into(),
            items: vec![
                LineItem::new(2.0, 100.0, "RM"),
                LineItem::new(1.0, 50.0, "USD"),
            ],
            deposit_percent: 30.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_currency_is_rm() {
        let q = Quotation::default();
        assert_eq!(q.currency, "RM");
        assert_eq!(q.payment_type, PaymentType::OneTime);
    }

    #[test]
    fn test_breakdown_uses_payment_fields() {
        let q = sample();
        let breakdown = q.breakdown();
        assert_eq!(breakdown.deposits.get("RM"), Some(60.0));
        assert_eq!(breakdown.final_payments.get("USD"), Some(35.0));
    }

    #[test]
    fn test_currency_update_rewrites_items() {
        let mut q = sample();
        q.update(QuotationField::Currency("SGD".into()));
        assert_eq!(q.currency, "SGD");
        assert!(q.items.iter().all(|i| i.currency == "SGD"));
        assert_eq!(q.breakdown().totals.get("SGD"), Some(250.0));
    }

    #[test]
    fn test_item_operations() {
        let mut q = sample();
        q.add_item();
        assert_eq!(q.items.len(), 3);
        assert_eq!(q.items[2].rate, 550.0);
        assert_eq!(q.items[2].currency, "RM");

        q.duplicate_item(0).unwrap();
        assert_eq!(q.items.len(), 4);
        assert_eq!(q.items[1], q.items[0]);

        q.update_item(1, ItemField::Quantity(5.0)).unwrap();
        assert_eq!(q.items[1].quantity, 5.0);
        assert_eq!(q.items[0].quantity, 2.0);

        q.add_item_detail(1).unwrap();
        q.update_item_detail(1, 0, "Hosting".into()).unwrap();
        assert_eq!(q.items[1].details, vec!["Hosting".to_string()]);
        q.remove_item_detail(1, 0).unwrap();
        assert!(q.items[1].details.is_empty());

        let removed = q.remove_item(1).unwrap();
        assert_eq!(removed.quantity, 5.0);
        assert_eq!(q.items.len(), 3);
    }

    #[test]
    fn test_out_of_range_index() {
        let mut q = sample();
        assert!(matches!(
            q.remove_item(9),
            Err(DocumentError::IndexOutOfRange { index: 9, len: 2 })
        ));
        assert!(q.remove_item_detail(0, 0).is_err());
        assert!(q.update_term(0, "x".into()).is_err());
    }

    #[test]
    fn test_term_operations() {
        let mut q = sample();
        q.add_term();
        q.update_term(0, "50% upfront".into()).unwrap();
        q.duplicate_term(0).unwrap();
        assert_eq!(q.terms, vec!["50% upfront", "50% upfront"]);
        q.remove_term(1).unwrap();
        assert_eq!(q.terms.len(), 1);
    }

    #[test]
    fn test_company_update() {
        let mut q = sample();
        q.update_company(QuotationParty::For, CompanyField::Company("Acme".into()));
        q.update_company(QuotationParty::From, CompanyField::Country("Malaysia".into()));
        assert_eq!(q.recipient(), "Acme");
        assert_eq!(q.quotation_from.country, "Malaysia");
    }

    #[test]
    fn test_validity() {
        let mut q = sample();
        assert!(q.is_valid());
        q.project_title = "  ".into();
        assert!(!q.is_valid());
    }

    #[test]
    fn test_apply_patch_currency_cascade() {
        let mut q = Quotation {
            currency: "EUR".into(),
            ..Default::default()
        };
        let patch: QuotationPatch = serde_json::from_str(
            r#"{
                "projectTitle": "Imported",
                "items": [
                    {"quantity": 1, "rate": 10, "currency": "USD", "amount": 999},
                    {"quantity": 2, "rate": 10}
                ]
            }"#,
        )
        .unwrap();
        q.apply_patch(patch);

        assert_eq!(q.project_title, "Imported");
        assert_eq!(q.items[0].currency, "USD");
        assert_eq!(q.items[1].currency, "EUR");
        assert_eq!(q.breakdown().totals.get("USD"), Some(10.0));
    }

    #[test]
    fn test_apply_patch_prefers_patch_currency() {
        let mut q = Quotation::default();
        let patch: QuotationPatch = serde_json::from_str(
            r#"{"currency": "JPY", "items": [{"quantity": 1, "rate": 500}]}"#,
        )
        .unwrap();
        q.apply_patch(patch);
        assert_eq!(q.currency, "JPY");
        assert_eq!(q.items[0].currency, "JPY");
    }
}
