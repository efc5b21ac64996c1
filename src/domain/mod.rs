//! Documents, line items and the payment arithmetic over them.

pub mod calculator;
pub mod document;
pub mod ids;
pub mod invoice;
pub mod line_item;
pub mod money;
pub mod payment;
pub mod ports;
pub mod quotation;
pub mod words;
