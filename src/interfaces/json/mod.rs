pub mod document_reader;
pub mod document_writer;
