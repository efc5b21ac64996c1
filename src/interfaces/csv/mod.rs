pub mod breakdown_writer;
pub mod history_writer;
