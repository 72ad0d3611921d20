//! PII analysis and anonymization
//!
//! # Architecture
//!
//! The pipeline consists of:
//! - **NLP engine**: one model per supported language (tokens, gazetteer)
//! - **Recognizers**: pattern recognizers from the pattern library, plus a
//!   gazetteer recognizer per model, registered per language
//! - **Analyzer**: runs the recognizers for a language, applies context
//!   enhancement, thresholds and de-duplication
//! - **Anonymizer**: resolves overlaps and applies per-entity operators
//!
//! [`PiiRedactor`] ties them together behind [`RedactionService`].
//!
//! # Usage
//!
//! ```rust,no_run
//! use scrubber::analysis::{PiiRedactor, RedactionService, RedactorSettings};
//! use scrubber::domain::LanguageCode;
//! use scrubber::language::SupportedLanguages;
//!
//! # fn example() -> scrubber::domain::Result<()> {
//! let settings = RedactorSettings::new(
//!     SupportedLanguages::multilingual(),
//!     vec!["email".into(), "phone".into(), "ip".into(), "credit_card".into()],
//! );
//! let redactor = PiiRedactor::setup(&settings)?;
//! let out = redactor.redact("Llámame al 612 345 678", &LanguageCode::new("es").unwrap())?;
//! # Ok(())
//! # }
//! ```

pub mod analyzer;
pub mod anonymizer;
pub mod config;
pub mod context;
pub mod engine;
pub mod models;
pub mod nlp;
pub mod recognizer;
pub mod registry;

// Re-export main types
pub use analyzer::AnalyzerEngine;
pub use anonymizer::{AnonymizerEngine, EngineResult, Operator};
pub use config::{AnalyzerConfig, AnonymizerConfig};
pub use engine::{PiiRedactor, RedactionService, RedactorSettings};
pub use models::{EntityType, RecognizerResult};
pub use registry::RecognizerRegistry;
