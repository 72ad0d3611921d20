//! Domain models and types for Scrubber.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`LanguageCode`], [`ModelId`])
//! - **Source records** ([`SentenceRow`])
//! - **Error types** ([`ScrubError`])
//! - **Result type alias** ([`Result`])
//!
//! ```rust
//! use scrubber::domain::{LanguageCode, ModelId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let language = LanguageCode::new("es")?;
//! let model = ModelId::new("es_core_news_sm")?;
//! // let wrong: LanguageCode = model;  // Compile error!
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod result;
pub mod row;

// Re-export commonly used types for convenience
pub use errors::ScrubError;
pub use ids::{LanguageCode, ModelId};
pub use result::Result;
pub use row::SentenceRow;
