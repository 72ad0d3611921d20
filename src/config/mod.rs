//! Configuration management for Scrubber.
//!
//! # Overview
//!
//! Scrubber reads an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SCRUBBER_*` environment overrides
//! - Built-in job profiles supplying every unset value
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use scrubber::config::{load_config, JobSettings};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("scrubber.toml")?;
//! let settings = JobSettings::resolve(&config)?;
//!
//! println!("Profile: {}", settings.profile);
//! println!("Database: {}", settings.database.display());
//! println!("Output: {}", settings.output.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`JobConfig`] - Profile, language detection, error policy
//! - [`SourceConfig`] - SQLite database, query, text column
//! - [`OutputConfig`] - Output file and mode
//! - `[languages]` - Language → model mapping
//! - [`AnalyzerConfig`](crate::analysis::AnalyzerConfig) - Recognizers, threshold, models
//! - [`AnonymizerConfig`](crate::analysis::AnonymizerConfig) - Per-entity operators
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [job]
//! profile = "multilingual"
//! on_error = "skip"
//!
//! [source]
//! database = "${SCRUBBER_DB}"
//!
//! [output]
//! path = "foreign_result.txt"
//! mode = "truncate"
//! ```

pub mod loader;
pub mod profile;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_str, load_optional_config};
pub use profile::{JobProfile, JobSettings};
pub use schema::{
    ApplicationConfig, JobConfig, LoggingConfig, OutputConfig, ScrubberConfig, SourceConfig,
};
