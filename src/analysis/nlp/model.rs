//! Per-language NLP models
//!
//! A model provides tokenization for context scoring and, optionally, a
//! gazetteer of known entity terms. Built-in models carry no gazetteer;
//! models loaded from a models directory can declare one:
//!
//! ```toml
//! language = "en"
//!
//! [entities]
//! PERSON = ["Jane Doe", "John Smith"]
//! LOCATION = ["Springfield"]
//! ```

use crate::analysis::models::EntityType;
use crate::domain::{LanguageCode, ModelId, Result, ScrubError};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Model identifiers available without a models directory, with their language
pub const BUILTIN_MODELS: &[(&str, &str)] = &[
    ("en_core_web_sm", "en"),
    ("en_core_web_lg", "en"),
    ("es_core_news_sm", "es"),
    ("fr_core_news_sm", "fr"),
    ("de_core_news_sm", "de"),
    ("it_core_news_sm", "it"),
    ("pt_core_news_sm", "pt"),
    ("nl_core_news_sm", "nl"),
];

/// A token with its byte span in the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lowercased token text
    pub text: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Deserialize)]
struct ModelFile {
    language: String,
    #[serde(default)]
    entities: BTreeMap<String, Vec<String>>,
}

/// Loaded NLP model for one language
#[derive(Debug)]
pub struct NlpModel {
    id: ModelId,
    language: LanguageCode,
    gazetteer: BTreeMap<EntityType, Vec<String>>,
    word_regex: Regex,
}

impl NlpModel {
    /// Load a model for `language`
    ///
    /// With a models directory the model must exist as
    /// `<models_dir>/<model_id>.toml`; without one it must be a built-in id.
    /// Either way the model's language has to match the declared one.
    pub fn load(language: &LanguageCode, id: &ModelId, models_dir: Option<&Path>) -> Result<Self> {
        let fail = |reason: String| ScrubError::ModelLoad {
            language: language.to_string(),
            model: id.to_string(),
            reason,
        };

        let (model_language, gazetteer) = match models_dir {
            Some(dir) => {
                let path = dir.join(format!("{}.toml", id.as_str()));
                let content = std::fs::read_to_string(&path)
                    .map_err(|e| fail(format!("cannot read {}: {e}", path.display())))?;
                let file: ModelFile = toml::from_str(&content)
                    .map_err(|e| fail(format!("invalid model file {}: {e}", path.display())))?;

                let mut gazetteer = BTreeMap::new();
                for (entity, terms) in file.entities {
                    let entity: EntityType = entity.parse().map_err(|e| fail(format!("{e}")))?;
                    let terms: Vec<String> = terms
                        .into_iter()
                        .map(|t| t.trim().to_string())
                        .filter(|t| !t.is_empty())
                        .collect();
                    gazetteer.insert(entity, terms);
                }
                (file.language, gazetteer)
            }
            None => {
                let builtin = BUILTIN_MODELS
                    .iter()
                    .find(|(name, _)| *name == id.as_str())
                    .ok_or_else(|| fail("unknown built-in model".to_string()))?;
                (builtin.1.to_string(), BTreeMap::new())
            }
        };

        let model_language = LanguageCode::new(model_language).map_err(fail)?;
        if &model_language != language {
            return Err(fail(format!(
                "model is for language '{model_language}', not '{language}'"
            )));
        }

        let word_regex = Regex::new(r"\w+").map_err(|e| fail(e.to_string()))?;

        tracing::debug!(
            language = %language,
            model = %id,
            gazetteer_entities = gazetteer.len(),
            "Loaded NLP model"
        );

        Ok(Self {
            id: id.clone(),
            language: model_language,
            gazetteer,
            word_regex,
        })
    }

    pub fn id(&self) -> &ModelId {
        &self.id
    }

    pub fn language(&self) -> &LanguageCode {
        &self.language
    }

    /// Gazetteer terms by entity type
    pub fn gazetteer(&self) -> &BTreeMap<EntityType, Vec<String>> {
        &self.gazetteer
    }

    /// Split text into lowercased word tokens
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        self.word_regex
            .find_iter(text)
            .map(|m| Token {
                text: m.as_str().to_lowercase(),
                start: m.start(),
                end: m.end(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn en() -> LanguageCode {
        LanguageCode::new("en").unwrap()
    }

    #[test]
    fn test_builtin_model_loads() {
        let model = NlpModel::load(&en(), &ModelId::new("en_core_web_sm").unwrap(), None).unwrap();
        assert_eq!(model.language(), &en());
        assert!(model.gazetteer().is_empty());
    }

    #[test]
    fn test_unknown_builtin_model_fails() {
        let err = NlpModel::load(&en(), &ModelId::new("en_core_web_trf").unwrap(), None)
            .unwrap_err();
        assert!(matches!(err, ScrubError::ModelLoad { .. }));
    }

    #[test]
    fn test_language_mismatch_fails() {
        let es = LanguageCode::new("es").unwrap();
        let err = NlpModel::load(&es, &ModelId::new("en_core_web_sm").unwrap(), None)
            .unwrap_err();
        assert!(err.to_string().contains("not 'es'"));
    }

    #[test]
    fn test_model_file_with_gazetteer() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("en_custom.toml"),
            "language = \"en\"\n[entities]\nPERSON = [\"Jane Doe\", \" \"]\n",
        )
        .unwrap();

        let model = NlpModel::load(&en(), &ModelId::new("en_custom").unwrap(), Some(dir.path()))
            .unwrap();
        assert_eq!(
            model.gazetteer().get(&EntityType::Person).unwrap(),
            &vec!["Jane Doe".to_string()]
        );
    }

    #[test]
    fn test_missing_model_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = NlpModel::load(&en(), &ModelId::new("en_core_web_sm").unwrap(), Some(dir.path()))
            .unwrap_err();
        assert!(err.is_setup_error());
    }

    #[test]
    fn test_tokenize_offsets_and_case() {
        let model = NlpModel::load(&en(), &ModelId::new("en_core_web_sm").unwrap(), None).unwrap();
        let tokens = model.tokenize("Call Él now");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["call", "él", "now"]);
        assert_eq!(&"Call Él now"[tokens[1].start..tokens[1].end], "Él");
    }
}
