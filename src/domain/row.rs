//! Sentence rows read from the source database

use serde::{Deserialize, Serialize};

/// One row of the `sentences` table
///
/// Only the identifier and the free-text column are kept; everything else in
/// the row is owned by whoever populated the database and ignored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceRow {
    /// First column rendered as text
    pub id: String,
    /// The free-text column to redact
    pub text: String,
}

impl SentenceRow {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}
