//! Recognizers: components that find PII spans for one language
//!
//! Two kinds ship with the crate:
//! - [`PatternRecognizer`]: regex patterns from the pattern library plus an
//!   optional checksum validator
//! - [`GazetteerRecognizer`]: known terms declared by an NLP model

pub mod gazetteer;
pub mod pattern;
pub mod validators;

pub use gazetteer::GazetteerRecognizer;
pub use pattern::{PatternLibrary, PatternRecognizer, BUILTIN_RECOGNIZERS};
pub use validators::{Validation, Validator};

use crate::analysis::models::{EntityType, RecognizerResult};
use crate::analysis::nlp::NlpArtifacts;
use crate::domain::{LanguageCode, Result};

/// Trait for PII recognizer implementations
pub trait Recognizer: Send + Sync {
    /// Recognizer name, reported on every result it produces
    fn name(&self) -> &str;

    /// The single language this instance serves
    fn supported_language(&self) -> &LanguageCode;

    /// Entity types this recognizer can report
    fn supported_entities(&self) -> Vec<EntityType>;

    /// Words that raise confidence when they precede a match
    fn context(&self) -> &[String] {
        &[]
    }

    /// Find spans in `text`
    fn analyze(&self, text: &str, artifacts: &NlpArtifacts) -> Result<Vec<RecognizerResult>>;
}
