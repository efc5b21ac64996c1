use crate::application::form::FormState;
use crate::domain::document::Document;
use crate::error::Result;
use std::io::{BufReader, Read};

/// Reads an exported (possibly partial) document from a JSON source.
pub struct DocumentReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> DocumentReader<R> {
    /// Creates a new `DocumentReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
        }
    }

    /// Parses the source as a partial document of kind `D`.
    pub fn read_patch<D: Document>(self) -> Result<D::Patch> {
        Ok(serde_json::from_reader(self.reader)?)
    }

    /// Merges the source into `form`.
    pub fn import_into<D: Document>(self, form: &mut FormState<D>) -> Result<()> {
        let patch = self.read_patch::<D>()?;
        form.import(patch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::invoice::Invoice;
    use crate::domain::quotation::Quotation;
    use crate::error::DocumentError;

    #[test]
    fn test_import_quotation() {
        let data = r#"{
            "quotationId": "Q-100",
            "projectTitle": "Mobile app",
            "paymentType": "Recurring payment",
            "depositPercent": 40,
            "items": [
                {"name": "Build", "quantity": 2, "rate": 100, "currency": "RM", "amount": 200},
                {"name": "Store fee", "quantity": 1, "rate": 50, "currency": "USD"}
            ]
        }"#;
        let mut form = FormState::<Quotation>::initialize();
        DocumentReader::new(data.as_bytes())
            .import_into(&mut form)
            .unwrap();

        let breakdown = form.breakdown();
        assert_eq!(form.document().quotation_id, "Q-100");
        assert_eq!(breakdown.totals.get("RM"), Some(200.0));
        assert_eq!(breakdown.totals.get("USD"), Some(50.0));
        assert!(breakdown.deposits.is_empty());
    }

    #[test]
    fn test_import_keeps_absent_fields() {
        let mut form = FormState::<Quotation>::initialize();
        form.document_mut().bank_account = "Maybank 123".into();
        form.document_mut().add_item();

        DocumentReader::new(r#"{"projectTitle": "Only title"}"#.as_bytes())
            .import_into(&mut form)
            .unwrap();

        assert_eq!(form.document().bank_account, "Maybank 123");
        assert_eq!(form.document().items.len(), 1);
        assert_eq!(form.document().project_title, "Only title");
    }

    #[test]
    fn test_import_invoice_gets_new_id() {
        let mut form = FormState::<Invoice>::initialize();
        let before = form.document().id.clone();
        DocumentReader::new(r#"{"id": "stale", "invoiceId": "INV-3"}"#.as_bytes())
            .import_into(&mut form)
            .unwrap();
        assert_ne!(form.document().id, before);
        assert_ne!(form.document().id, "stale");
    }

    #[test]
    fn test_import_rejects_items_without_rate() {
        let mut form = FormState::<Quotation>::initialize();
        let result = DocumentReader::new(r#"{"items": [{"quantity": 1}]}"#.as_bytes())
            .import_into(&mut form);
        assert!(matches!(result, Err(DocumentError::JsonError(_))));
    }
}
