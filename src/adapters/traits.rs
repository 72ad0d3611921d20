//! Source and sink traits
//!
//! The batch runner only talks to these traits, so the SQLite reader and the
//! file writer can be replaced by in-memory doubles in tests.

use crate::domain::{Result, SentenceRow};

/// A finite, ordered sequence of sentence rows
pub trait SentenceSource {
    /// Feed every row, in cursor order, to `visit`
    ///
    /// Stops at the first error returned by `visit` and propagates it.
    /// Returns the number of rows visited.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails, a row cannot be decoded, or
    /// `visit` fails.
    fn for_each_row(&mut self, visit: &mut dyn FnMut(SentenceRow) -> Result<()>) -> Result<usize>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}

/// Destination for redacted entries
pub trait EntrySink {
    /// Write one entry followed by a blank separator line
    ///
    /// The entry must be durable in the underlying medium when this returns.
    fn write_entry(&mut self, text: &str) -> Result<()>;

    /// Flush and release the destination
    fn finish(&mut self) -> Result<()>;
}

impl<T: EntrySink + ?Sized> EntrySink for &mut T {
    fn write_entry(&mut self, text: &str) -> Result<()> {
        (**self).write_entry(text)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// In-memory source, rows served in insertion order
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    rows: Vec<SentenceRow>,
}

impl VecSource {
    pub fn new(rows: Vec<SentenceRow>) -> Self {
        Self { rows }
    }
}

impl SentenceSource for VecSource {
    fn for_each_row(&mut self, visit: &mut dyn FnMut(SentenceRow) -> Result<()>) -> Result<usize> {
        let mut count = 0;
        for row in &self.rows {
            visit(row.clone())?;
            count += 1;
        }
        Ok(count)
    }

    fn describe(&self) -> String {
        format!("memory ({} rows)", self.rows.len())
    }
}

/// In-memory sink collecting entries
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    pub entries: Vec<String>,
    pub finished: bool,
}

impl EntrySink for VecSink {
    fn write_entry(&mut self, text: &str) -> Result<()> {
        self.entries.push(text.to_string());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
