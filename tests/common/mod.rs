use serde_json::{Value, json};
use std::fs::File;
use std::io::Error;
use std::path::Path;

pub fn write_json(path: &Path, value: &Value) -> Result<(), Error> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

/// A minimal valid quotation numbered `code`, with one RM item per entry of
/// `rates`.
pub fn quotation(code: &str, title: &str, rates: &[f64]) -> Value {
    let items: Vec<Value> = rates
        .iter()
        .map(|rate| json!({ "name": "Work", "quantity": 1, "rate": rate, "currency": "RM" }))
        .collect();
    json!({
        "quotationId": code,
        "projectTitle": title,
        "paymentType": "One-time payment",
        "depositPercent": 30,
        "items": items,
    })
}

pub fn generate_quotation(path: &Path, code: &str, title: &str, rates: &[f64]) -> Result<(), Error> {
    write_json(path, &quotation(code, title, rates))
}
