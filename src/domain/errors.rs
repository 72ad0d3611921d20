//! Domain error types
//!
//! This module defines the error hierarchy for Scrubber.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Scrubber error type
///
/// This is the primary error type used throughout the library. Setup
/// failures (`Configuration`, `ModelLoad`, `Pattern`) happen before any row
/// is read; the remaining variants are raised while a batch is running.
#[derive(Debug, Error)]
pub enum ScrubError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A declared language model could not be loaded
    #[error("Failed to load model '{model}' for language '{language}': {reason}")]
    ModelLoad {
        language: String,
        model: String,
        reason: String,
    },

    /// Analysis was requested for a language the engine was not set up for
    #[error("No recognizers or model registered for language '{0}'")]
    UnsupportedLanguage(String),

    /// Invalid recognizer pattern or pattern library
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Source database errors
    #[error("Database error: {0}")]
    Database(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// PII detection failed
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Anonymization of detected spans failed
    #[error("Anonymization error: {0}")]
    Anonymization(String),

    /// A single row failed while the batch was running
    #[error("Row '{row_id}' failed: {source}")]
    RowFailed {
        row_id: String,
        #[source]
        source: Box<ScrubError>,
    },
}

impl ScrubError {
    /// Wraps an error with the id of the row being processed
    pub fn for_row(row_id: impl Into<String>, source: ScrubError) -> Self {
        ScrubError::RowFailed {
            row_id: row_id.into(),
            source: Box::new(source),
        }
    }

    /// Whether the error happened during engine setup rather than a run
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            ScrubError::ModelLoad { .. } | ScrubError::Pattern(_)
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ScrubError {
    fn from(err: std::io::Error) -> Self {
        ScrubError::Io(err.to_string())
    }
}

// Conversion from rusqlite errors
impl From<rusqlite::Error> for ScrubError {
    fn from(err: rusqlite::Error) -> Self {
        ScrubError::Database(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ScrubError {
    fn from(err: toml::de::Error) -> Self {
        ScrubError::Configuration(format!("TOML parse error: {err}"))
    }
}
