use crate::domain::document::Document;
use crate::error::Result;
use crate::interfaces::text::format::format_amounts;
use serde::Serialize;
use std::io::Write;

/// One row of the document history listing.
#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    id: &'a str,
    code: &'a str,
    #[serde(rename = "for")]
    recipient: &'a str,
    date: &'a str,
    total: String,
    updated_at: &'a str,
}

/// Writes stored documents as CSV, one row per document.
pub struct HistoryWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> HistoryWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
        }
    }

    /// Writes the header (even when `documents` is empty) and one row each.
    pub fn write_documents<D: Document>(&mut self, documents: &[D]) -> Result<()> {
        if documents.is_empty() {
            self.writer
                .write_record(["id", "code", "for", "date", "total", "updated_at"])?;
        }
        for document in documents {
            self.writer.serialize(HistoryRow {
                id: document.id(),
                code: document.code(),
                recipient: document.recipient(),
                date: document.date(),
                total: format_amounts(&document.amount_due()),
                updated_at: document.updated_at(),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
