//! Pattern library and regex-based recognizers

use super::{Recognizer, Validation, Validator};
use crate::analysis::models::{EntityType, RecognizerResult};
use crate::analysis::nlp::NlpArtifacts;
use crate::domain::{LanguageCode, Result, ScrubError};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Keys of the recognizers in the embedded pattern library
pub const BUILTIN_RECOGNIZERS: &[&str] = &[
    "email",
    "phone",
    "ip",
    "credit_card",
    "url",
    "us_ssn",
    "iban",
];

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    pub name: String,
    pub regex: String,
    /// Confidence score (0.0 - 1.0)
    pub score: f32,
}

/// Recognizer definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RecognizerDefinition {
    pub name: String,
    pub entity: String,
    #[serde(default)]
    pub validator: Validator,
    #[serde(default)]
    pub context: Vec<String>,
    pub patterns: Vec<PatternDefinition>,
}

#[derive(Debug, Deserialize)]
struct LibraryFile {
    recognizers: BTreeMap<String, RecognizerDefinition>,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub name: String,
    pub regex: Regex,
    pub score: f32,
}

/// Parsed and compiled pattern library
///
/// Every regex is compiled once when the library loads; building a
/// recognizer for another language reuses the compiled patterns.
#[derive(Debug)]
pub struct PatternLibrary {
    entries: BTreeMap<String, LibraryEntry>,
}

#[derive(Debug, Clone)]
struct LibraryEntry {
    name: String,
    entity: EntityType,
    validator: Validator,
    context: Vec<String>,
    patterns: Vec<CompiledPattern>,
}

impl PatternLibrary {
    /// Read a pattern library from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScrubError::Pattern(format!(
                "Failed to read pattern library {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Parse a pattern library from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let file: LibraryFile = toml::from_str(content)
            .map_err(|e| ScrubError::Pattern(format!("Failed to parse pattern library: {e}")))?;

        let mut entries = BTreeMap::new();
        for (key, def) in file.recognizers {
            let entity: EntityType = def.entity.parse().map_err(|_| {
                ScrubError::Pattern(format!(
                    "Invalid entity in recognizer '{key}': {}",
                    def.entity
                ))
            })?;

            if def.patterns.is_empty() {
                return Err(ScrubError::Pattern(format!(
                    "Recognizer '{key}' defines no patterns"
                )));
            }

            let mut patterns = Vec::with_capacity(def.patterns.len());
            for pattern in def.patterns {
                if !(0.0..=1.0).contains(&pattern.score) {
                    return Err(ScrubError::Pattern(format!(
                        "Score {} of pattern '{}' in '{key}' is outside 0.0..=1.0",
                        pattern.score, pattern.name
                    )));
                }
                let regex = Regex::new(&pattern.regex).map_err(|e| {
                    ScrubError::Pattern(format!(
                        "Invalid regex in pattern '{}' of '{key}': {e}",
                        pattern.name
                    ))
                })?;
                patterns.push(CompiledPattern {
                    name: pattern.name,
                    regex,
                    score: pattern.score,
                });
            }

            entries.insert(
                key,
                LibraryEntry {
                    name: def.name,
                    entity,
                    validator: def.validator,
                    context: def.context.iter().map(|w| w.to_lowercase()).collect(),
                    patterns,
                },
            );
        }

        Ok(Self { entries })
    }

    /// The embedded default library
    pub fn builtin() -> Result<Self> {
        let default_toml = include_str!("../../../patterns/recognizers.toml");
        Self::from_toml(default_toml)
    }

    /// Recognizer keys defined in this library
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Build the recognizer `key` for `language`
    pub fn recognizer(&self, key: &str, language: &LanguageCode) -> Result<PatternRecognizer> {
        let entry = self.entries.get(key).ok_or_else(|| {
            ScrubError::Configuration(format!("Unknown recognizer '{key}' in pattern library"))
        })?;

        Ok(PatternRecognizer {
            name: entry.name.clone(),
            entity: entry.entity,
            language: language.clone(),
            validator: entry.validator,
            context: entry.context.clone(),
            patterns: entry.patterns.clone(),
        })
    }
}

/// Regex-based recognizer for one entity type and one language
#[derive(Debug, Clone)]
pub struct PatternRecognizer {
    name: String,
    entity: EntityType,
    language: LanguageCode,
    validator: Validator,
    context: Vec<String>,
    patterns: Vec<CompiledPattern>,
}

impl PatternRecognizer {
    pub fn entity(&self) -> EntityType {
        self.entity
    }

    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }
}

impl Recognizer for PatternRecognizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn supported_language(&self) -> &LanguageCode {
        &self.language
    }

    fn supported_entities(&self) -> Vec<EntityType> {
        vec![self.entity]
    }

    fn context(&self) -> &[String] {
        &self.context
    }

    fn analyze(&self, text: &str, _artifacts: &NlpArtifacts) -> Result<Vec<RecognizerResult>> {
        let mut results = Vec::new();

        for pattern in &self.patterns {
            for matched in pattern.regex.find_iter(text) {
                if matched.as_str().is_empty() {
                    continue;
                }
                let score = match self.validator.validate(matched.as_str()) {
                    Validation::Keep => pattern.score,
                    Validation::Score(score) => score,
                    Validation::Reject => continue,
                };
                results.push(RecognizerResult::new(
                    self.entity,
                    matched.start(),
                    matched.end(),
                    score,
                    &self.name,
                ));
            }
        }

        Ok(results)
    }
}
