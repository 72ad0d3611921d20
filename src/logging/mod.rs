//! Logging and observability
//!
//! Structured logging with:
//! - Console output on stderr, so redacted text printed on stdout stays clean
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use scrubber::logging::init_logging;
//! use scrubber::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a row that failed and was skipped
///
/// # Example
///
/// ```no_run
/// use scrubber::log_row_skipped;
/// use scrubber::domain::ScrubError;
///
/// let error = ScrubError::Analysis("regex timeout".to_string());
/// log_row_skipped!("42", &error);
/// ```
#[macro_export]
macro_rules! log_row_skipped {
    ($row_id:expr, $error:expr) => {
        tracing::warn!(
            row_id = %$row_id,
            error = %$error,
            "Row failed, skipping"
        );
    };
}

/// Log the completion of a batch run
///
/// # Example
///
/// ```no_run
/// use scrubber::log_run_complete;
/// use std::time::Duration;
///
/// log_run_complete!(120, 118, Duration::from_secs(3));
/// ```
#[macro_export]
macro_rules! log_run_complete {
    ($rows_read:expr, $rows_written:expr, $duration:expr) => {
        tracing::info!(
            rows_read = $rows_read,
            rows_written = $rows_written,
            duration_ms = $duration.as_millis() as u64,
            "Analysis finished"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use scrubber::log_error_with_context;
/// use scrubber::domain::ScrubError;
///
/// let error = ScrubError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log per-row progress
///
/// # Example
///
/// ```no_run
/// use scrubber::log_row_processed;
///
/// log_row_processed!("17", "es", 2);
/// ```
#[macro_export]
macro_rules! log_row_processed {
    ($row_id:expr, $language:expr, $entities:expr) => {
        tracing::debug!(
            row_id = %$row_id,
            language = %$language,
            entities = $entities,
            "Row redacted"
        );
    };
}
