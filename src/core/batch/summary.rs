//! Run summary and reporting

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// A row that failed under the skip policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    pub row_id: String,
    pub message: String,
}

/// Summary of one batch run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,

    #[serde(rename = "duration_ms", serialize_with = "serialize_duration_ms")]
    pub duration: Duration,

    /// Rows handed out by the source
    pub rows_read: usize,

    /// Entries written to the output
    pub rows_written: usize,

    /// Rows dropped under the skip policy
    pub rows_skipped: usize,

    /// Rows whose detected language was unsupported
    pub language_fallbacks: usize,

    /// Spans replaced across all rows
    pub entities_redacted: usize,

    /// Replaced spans per entity label
    pub entities_by_type: BTreeMap<String, usize>,

    /// Rows per language actually used
    pub rows_by_language: BTreeMap<String, usize>,

    pub errors: Vec<RowError>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            duration: Duration::from_secs(0),
            rows_read: 0,
            rows_written: 0,
            rows_skipped: 0,
            language_fallbacks: 0,
            entities_redacted: 0,
            entities_by_type: BTreeMap::new(),
            rows_by_language: BTreeMap::new(),
            errors: Vec::new(),
            output_path: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Record a skipped row
    pub fn add_error(&mut self, row_id: impl Into<String>, message: impl Into<String>) {
        self.rows_skipped += 1;
        self.errors.push(RowError {
            row_id: row_id.into(),
            message: message.into(),
        });
    }

    /// Record one replaced span
    pub fn add_entity(&mut self, label: &str) {
        self.entities_redacted += 1;
        *self.entities_by_type.entry(label.to_string()).or_default() += 1;
    }

    pub fn add_language(&mut self, language: &str) {
        *self.rows_by_language.entry(language.to_string()).or_default() += 1;
    }

    /// Every row read was written
    pub fn is_successful(&self) -> bool {
        self.rows_skipped == 0 && self.errors.is_empty()
    }

    /// Written rows as a percentage of rows read
    pub fn success_rate(&self) -> f64 {
        if self.rows_read == 0 {
            return 100.0;
        }
        (self.rows_written as f64 / self.rows_read as f64) * 100.0
    }

    pub fn log_summary(&self) {
        tracing::info!(
            rows_read = self.rows_read,
            rows_written = self.rows_written,
            rows_skipped = self.rows_skipped,
            language_fallbacks = self.language_fallbacks,
            entities_redacted = self.entities_redacted,
            duration_ms = self.duration.as_millis() as u64,
            success_rate = format!("{:.2}%", self.success_rate()),
            "Run summary"
        );

        if !self.errors.is_empty() {
            tracing::warn!(error_count = self.errors.len(), "Run completed with skipped rows");
            for error in &self.errors {
                tracing::warn!(row_id = %error.row_id, message = %error.message, "Skipped row");
            }
        }
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

fn serialize_duration_ms<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}
