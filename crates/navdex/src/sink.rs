//! Destinations for index records.
//!
//! A [`RecordSink`] receives every record an extractor emits for one file,
//! after duplicate suppression in the `IndexContext`.
//!
//! - `Vec<IndexRecord>` keeps records in memory
//! - [`JsonlSink`] writes one JSON object per line to any `io::Write`
//! - `&mut S` forwards to `S`, so a caller can keep ownership of its sink

use std::io::{BufWriter, Write};

use crate::error::{Error, Result};
use crate::types::IndexRecord;

/// Receives emitted records.
pub trait RecordSink {
    /// Accept one record.
    ///
    /// # Errors
    ///
    /// Implementation-specific; the error is propagated to the walk.
    fn emit(&mut self, record: &IndexRecord) -> Result<()>;

    /// Push buffered output to its destination.
    ///
    /// # Errors
    ///
    /// Implementation-specific.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl RecordSink for Vec<IndexRecord> {
    fn emit(&mut self, record: &IndexRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn emit(&mut self, record: &IndexRecord) -> Result<()> {
        (**self).emit(record)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// Writes records as JSON Lines.
///
/// Output is buffered; call [`RecordSink::flush`] or
/// [`into_inner`](Self::into_inner) before reading what was written.
pub struct JsonlSink<W: Write> {
    writer: BufWriter<W>,
    written: usize,
}

impl<W: Write> JsonlSink<W> {
    /// Wrap `writer` in a buffered JSONL sink.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            written: 0,
        }
    }

    /// Wrap `writer` with a custom buffer capacity.
    #[must_use]
    pub fn with_capacity(writer: W, capacity: usize) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, writer),
            written: 0,
        }
    }

    /// Number of records written so far.
    #[must_use]
    pub fn records_written(&self) -> usize {
        self.written
    }

    /// Flush and return the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the final flush fails.
    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error().into())
    }
}

impl<W: Write> RecordSink for JsonlSink<W> {
    fn emit(&mut self, record: &IndexRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record).map_err(|e| {
            if e.is_io() {
                Error::Io(e.into())
            } else {
                Error::Json(e)
            }
        })?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
