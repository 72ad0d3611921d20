//! Domain identifier types with validation
//!
//! Newtype wrappers for language codes and model identifiers so the two can
//! never be swapped by accident.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Two-letter ISO 639-1 language code, always lowercase
///
/// # Examples
///
/// ```
/// use scrubber::domain::ids::LanguageCode;
///
/// let code = LanguageCode::new("ES").unwrap();
/// assert_eq!(code.as_str(), "es");
/// assert!(LanguageCode::new("spanish").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Creates a new LanguageCode, normalizing to lowercase
    pub fn new(code: impl Into<String>) -> Result<Self, String> {
        let code = code.into().trim().to_lowercase();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(format!(
                "Invalid language code '{code}'. Expected a two-letter ISO 639-1 code"
            ));
        }
        Ok(Self(code))
    }

    /// English, the fallback language
    pub fn english() -> Self {
        Self("en".to_string())
    }

    /// Returns the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of an NLP model, e.g. `en_core_web_sm`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelId(String);

impl ModelId {
    /// Creates a new ModelId. Path separators are rejected because the id is
    /// used as a file stem inside the models directory.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Model ID cannot be empty".to_string());
        }
        if id.contains('/') || id.contains('\\') || id.contains("..") {
            return Err(format!("Model ID '{id}' must not contain path components"));
        }
        Ok(Self(id))
    }

    /// Returns the model id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ModelId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ModelId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModelId> for String {
    fn from(id: ModelId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code_normalizes_case() {
        let code = LanguageCode::new(" DE ").unwrap();
        assert_eq!(code.as_str(), "de");
        assert_eq!(code.to_string(), "de");
    }

    #[test]
    fn test_language_code_rejects_invalid() {
        assert!(LanguageCode::new("").is_err());
        assert!(LanguageCode::new("eng").is_err());
        assert!(LanguageCode::new("e1").is_err());
    }

    #[test]
    fn test_language_code_deserializes_from_string() {
        let code: LanguageCode = serde_json::from_str("\"FR\"").unwrap();
        assert_eq!(code, LanguageCode::new("fr").unwrap());
        assert!(serde_json::from_str::<LanguageCode>("\"french\"").is_err());
    }

    #[test]
    fn test_model_id_validation() {
        assert!(ModelId::new("en_core_web_sm").is_ok());
        assert!(ModelId::new("").is_err());
        assert!(ModelId::new("../etc/passwd").is_err());
        assert!(ModelId::new("models/en").is_err());
    }
}
