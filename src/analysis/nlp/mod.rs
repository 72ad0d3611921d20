//! NLP engine: one loaded model per supported language

pub mod model;

pub use model::{NlpModel, Token, BUILTIN_MODELS};

use crate::domain::{LanguageCode, Result, ScrubError};
use crate::language::SupportedLanguages;
use std::collections::BTreeMap;
use std::path::Path;

/// Per-text output of the NLP engine, consumed by recognizers
#[derive(Debug, Clone, Default)]
pub struct NlpArtifacts {
    pub tokens: Vec<Token>,
}

impl NlpArtifacts {
    /// Up to `window` tokens ending before byte offset `start`
    pub fn tokens_before(&self, start: usize, window: usize) -> &[Token] {
        let end = self.tokens.partition_point(|t| t.end <= start);
        &self.tokens[end.saturating_sub(window)..end]
    }
}

/// NLP engine holding every declared model
#[derive(Debug)]
pub struct NlpEngine {
    models: BTreeMap<LanguageCode, NlpModel>,
}

impl NlpEngine {
    /// Load every model in the supported-language set
    ///
    /// Fails on the first model that cannot be loaded; a partially loaded
    /// engine is never returned.
    pub fn load(languages: &SupportedLanguages, models_dir: Option<&Path>) -> Result<Self> {
        tracing::info!(languages = languages.len(), "Setting up nlp engine ...");

        let mut models = BTreeMap::new();
        for (language, model_id) in languages.iter() {
            let model = NlpModel::load(language, model_id, models_dir)?;
            models.insert(language.clone(), model);
        }

        tracing::info!("Nlp engine setup finished!");
        Ok(Self { models })
    }

    pub fn model(&self, language: &LanguageCode) -> Option<&NlpModel> {
        self.models.get(language)
    }

    pub fn models(&self) -> impl Iterator<Item = &NlpModel> {
        self.models.values()
    }

    pub fn supports(&self, language: &LanguageCode) -> bool {
        self.models.contains_key(language)
    }

    /// Tokenize `text` with the model for `language`
    pub fn process(&self, text: &str, language: &LanguageCode) -> Result<NlpArtifacts> {
        let model = self
            .model(language)
            .ok_or_else(|| ScrubError::UnsupportedLanguage(language.to_string()))?;
        Ok(NlpArtifacts {
            tokens: model.tokenize(text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_multilingual_defaults() {
        let engine = NlpEngine::load(&SupportedLanguages::multilingual(), None).unwrap();
        for code in ["en", "es", "fr", "de", "it", "pt", "nl"] {
            assert!(engine.supports(&LanguageCode::new(code).unwrap()));
        }
    }

    #[test]
    fn test_process_unsupported_language() {
        let engine = NlpEngine::load(&SupportedLanguages::english(), None).unwrap();
        let err = engine
            .process("hola", &LanguageCode::new("es").unwrap())
            .unwrap_err();
        assert!(matches!(err, ScrubError::UnsupportedLanguage(_)));
    }

    #[test]
    fn test_tokens_before_window() {
        let engine = NlpEngine::load(&SupportedLanguages::english(), None).unwrap();
        let text = "my work phone number is 555";
        let artifacts = engine.process(text, &LanguageCode::english()).unwrap();
        let start = text.find("555").unwrap();

        let window: Vec<&str> = artifacts
            .tokens_before(start, 3)
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(window, vec!["phone", "number", "is"]);
        assert!(artifacts.tokens_before(0, 5).is_empty());
    }
}
