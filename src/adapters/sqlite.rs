//! SQLite sentence source
//!
//! Reads `(id, text)` pairs positionally from the result set of a query,
//! `SELECT * FROM sentences;` by default. Column 0 is the row id and the text
//! column defaults to index 1.

use crate::adapters::traits::SentenceSource;
use crate::domain::{Result, ScrubError, SentenceRow};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

/// Default query over the `sentences` table
pub const DEFAULT_QUERY: &str = "SELECT * FROM sentences;";

/// Default text column index
pub const DEFAULT_TEXT_COLUMN: usize = 1;

/// Read-only SQLite source
pub struct SqliteSource {
    conn: Connection,
    path: PathBuf,
    query: String,
    text_column: usize,
}

impl SqliteSource {
    /// Open `path` read-only; a missing file is an error, never created
    ///
    /// # Errors
    ///
    /// Returns [`ScrubError::Database`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            ScrubError::Database(format!("Cannot open database {}: {e}", path.display()))
        })?;

        tracing::debug!(database = %path.display(), "Opened sentence database");

        Ok(Self {
            conn,
            path: path.to_path_buf(),
            query: DEFAULT_QUERY.to_string(),
            text_column: DEFAULT_TEXT_COLUMN,
        })
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_text_column(mut self, index: usize) -> Self {
        self.text_column = index;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SentenceSource for SqliteSource {
    fn for_each_row(&mut self, visit: &mut dyn FnMut(SentenceRow) -> Result<()>) -> Result<usize> {
        let mut stmt = self.conn.prepare(&self.query)?;

        let columns = stmt.column_count();
        if columns == 0 || self.text_column >= columns {
            return Err(ScrubError::Database(format!(
                "Query returns {columns} column(s); text column index {} is out of range",
                self.text_column
            )));
        }

        let mut rows = stmt.query([])?;
        let mut count = 0;
        while let Some(row) = rows.next()? {
            let id = render_value(row.get_ref(0)?);
            let text = render_value(row.get_ref(self.text_column)?);
            visit(SentenceRow::new(id, text))?;
            count += 1;
        }
        Ok(count)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Render any SQLite value as text; NULL becomes empty
fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    }
}
