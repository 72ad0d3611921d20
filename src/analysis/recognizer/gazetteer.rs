//! Recognizer for entity terms declared by an NLP model

use super::Recognizer;
use crate::analysis::models::{EntityType, RecognizerResult};
use crate::analysis::nlp::{NlpArtifacts, NlpModel};
use crate::domain::{LanguageCode, Result, ScrubError};
use regex::Regex;

const GAZETTEER_SCORE: f32 = 0.85;

/// Case-insensitive whole-word matcher over a model's gazetteer
#[derive(Debug)]
pub struct GazetteerRecognizer {
    name: String,
    language: LanguageCode,
    matchers: Vec<(EntityType, Regex)>,
}

impl GazetteerRecognizer {
    /// Build a recognizer from a model, or `None` when the model declares
    /// no terms
    pub fn from_model(model: &NlpModel) -> Result<Option<Self>> {
        let mut matchers = Vec::new();

        for (entity, terms) in model.gazetteer() {
            if terms.is_empty() {
                continue;
            }
            // Longest first so "Jane Doe" wins over "Jane"
            let mut terms: Vec<&String> = terms.iter().collect();
            terms.sort_by(|a, b| b.len().cmp(&a.len()));
            let alternation = terms
                .iter()
                .map(|t| regex::escape(t))
                .collect::<Vec<_>>()
                .join("|");
            let regex = Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).map_err(|e| {
                ScrubError::ModelLoad {
                    language: model.language().to_string(),
                    model: model.id().to_string(),
                    reason: format!("gazetteer for {entity} does not compile: {e}"),
                }
            })?;
            matchers.push((*entity, regex));
        }

        if matchers.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self {
            name: format!("GazetteerRecognizer({})", model.id()),
            language: model.language().clone(),
            matchers,
        }))
    }
}

impl Recognizer for GazetteerRecognizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn supported_language(&self) -> &LanguageCode {
        &self.language
    }

    fn supported_entities(&self) -> Vec<EntityType> {
        self.matchers.iter().map(|(entity, _)| *entity).collect()
    }

    fn analyze(&self, text: &str, _artifacts: &NlpArtifacts) -> Result<Vec<RecognizerResult>> {
        let mut results = Vec::new();
        for (entity, regex) in &self.matchers {
            for matched in regex.find_iter(text) {
                results.push(RecognizerResult::new(
                    *entity,
                    matched.start(),
                    matched.end(),
                    GAZETTEER_SCORE,
                    &self.name,
                ));
            }
        }
        Ok(results)
    }
}
