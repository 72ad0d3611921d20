//! Recognizer registry

use crate::analysis::nlp::NlpEngine;
use crate::analysis::recognizer::{GazetteerRecognizer, PatternLibrary, Recognizer};
use crate::domain::{LanguageCode, Result, ScrubError};
use std::collections::BTreeSet;

/// Append-only collection of recognizers, each bound to one language
#[derive(Default)]
pub struct RecognizerRegistry {
    recognizers: Vec<Box<dyn Recognizer>>,
}

impl RecognizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a recognizer; order is insertion order
    pub fn add_recognizer(&mut self, recognizer: Box<dyn Recognizer>) {
        tracing::trace!(
            recognizer = recognizer.name(),
            language = %recognizer.supported_language(),
            "Registered recognizer"
        );
        self.recognizers.push(recognizer);
    }

    /// Register one instance of every `keys` recognizer for every language
    /// the NLP engine has a model for, plus a gazetteer recognizer for each
    /// model that declares terms.
    pub fn load(library: &PatternLibrary, keys: &[String], nlp: &NlpEngine) -> Result<Self> {
        tracing::info!("Setting up regex recognizers ...");
        let mut registry = Self::new();

        for key in keys {
            if !library.contains(key) {
                return Err(ScrubError::Configuration(format!(
                    "Unknown recognizer '{key}'"
                )));
            }
        }

        for model in nlp.models() {
            for key in keys {
                let recognizer = library.recognizer(key, model.language())?;
                registry.add_recognizer(Box::new(recognizer));
            }
            if let Some(gazetteer) = GazetteerRecognizer::from_model(model)? {
                registry.add_recognizer(Box::new(gazetteer));
            }
        }

        tracing::info!(
            recognizers = registry.len(),
            "Finished regex recognizers setup!"
        );
        Ok(registry)
    }

    /// Recognizers serving `language`, in registration order
    pub fn recognizers_for<'a>(
        &'a self,
        language: &'a LanguageCode,
    ) -> impl Iterator<Item = &'a dyn Recognizer> + 'a {
        self.recognizers
            .iter()
            .filter(move |r| r.supported_language() == language)
            .map(|r| r.as_ref())
    }

    pub fn supports(&self, language: &LanguageCode) -> bool {
        self.recognizers_for(language).next().is_some()
    }

    pub fn languages(&self) -> BTreeSet<LanguageCode> {
        self.recognizers
            .iter()
            .map(|r| r.supported_language().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::SupportedLanguages;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_one_instance_per_language() {
        let nlp = NlpEngine::load(&SupportedLanguages::multilingual(), None).unwrap();
        let library = PatternLibrary::builtin().unwrap();
        let registry = RecognizerRegistry::load(
            &library,
            &keys(&["email", "phone", "ip", "credit_card"]),
            &nlp,
        )
        .unwrap();

        assert_eq!(registry.len(), 7 * 4);
        assert_eq!(registry.languages().len(), 7);
        let es = LanguageCode::new("es").unwrap();
        let names: Vec<&str> = registry.recognizers_for(&es).map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec![
                "EmailRecognizer",
                "PhoneRecognizer",
                "IpRecognizer",
                "CreditCardRecognizer"
            ]
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let nlp = NlpEngine::load(&SupportedLanguages::english(), None).unwrap();
        let library = PatternLibrary::builtin().unwrap();
        let result = RecognizerRegistry::load(&library, &keys(&["passport"]), &nlp);
        assert!(result.is_err());
    }

    #[test]
    fn test_supports_only_registered_languages() {
        let nlp = NlpEngine::load(&SupportedLanguages::spanish(), None).unwrap();
        let library = PatternLibrary::builtin().unwrap();
        let registry = RecognizerRegistry::load(&library, &keys(&["email"]), &nlp).unwrap();

        assert!(registry.supports(&LanguageCode::new("es").unwrap()));
        assert!(!registry.supports(&LanguageCode::english()));
    }
}
