use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Writes documents and breakdowns as pretty-printed JSON.
pub struct DocumentWriter<W: Write> {
    writer: W,
}

impl<W: Write> DocumentWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, value)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
