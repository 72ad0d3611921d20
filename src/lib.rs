//! # Scrubber - batch PII redaction
//!
//! Scrubber reads rows of free text from a SQLite `sentences` table, detects
//! personally identifiable information in each row, replaces it with
//! placeholders, and writes the redacted text to a flat file.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Batch orchestration (runner, error policy, summary)
//! - [`analysis`] - PII analyzer and anonymizer behind [`analysis::RedactionService`]
//! - [`language`] - Supported languages, detection and fallback
//! - [`adapters`] - SQLite source and output file sink
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration and job profiles
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scrubber::config::{load_optional_config, JobSettings};
//! use scrubber::core::batch::BatchCoordinator;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_optional_config("scrubber.toml")?;
//!     let settings = JobSettings::resolve(&config)?;
//!
//!     // Loads every language model; fails before any row is read
//!     let coordinator = BatchCoordinator::new(settings)?;
//!     let summary = coordinator.execute()?;
//!
//!     println!("Redacted {} rows", summary.rows_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Redacting a single text
//!
//! ```rust
//! use scrubber::analysis::{PiiRedactor, RedactionService, RedactorSettings};
//! use scrubber::domain::LanguageCode;
//! use scrubber::language::SupportedLanguages;
//!
//! # fn main() -> scrubber::domain::Result<()> {
//! let settings = RedactorSettings::new(SupportedLanguages::english(), vec!["all".into()]);
//! let redactor = PiiRedactor::setup(&settings)?;
//!
//! let out = redactor.redact(
//!     "Contact me at jane@example.com or 555-123-4567.",
//!     &LanguageCode::english(),
//! )?;
//! assert_eq!(out.text, "Contact me at <EMAIL_ADDRESS> or <PHONE_NUMBER>.");
//! # Ok(())
//! # }
//! ```
//!
//! ## Language fallback
//!
//! Rows whose detected language is not supported are processed as the
//! default language instead:
//!
//! ```rust
//! use scrubber::domain::LanguageCode;
//! use scrubber::language::{resolve_language, SupportedLanguages};
//!
//! let supported = SupportedLanguages::multilingual();
//! let language = resolve_language(Some("xx"), &supported, &LanguageCode::english());
//! assert_eq!(language.as_str(), "en");
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`], backed by
//! [`domain::ScrubError`]. The CLI maps errors to exit codes.

pub mod adapters;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod language;
pub mod logging;
