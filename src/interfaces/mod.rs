//! Adapters between documents and the outside world: JSON import/export, CSV
//! history listings and printable text.

pub mod csv;
pub mod json;
pub mod text;
