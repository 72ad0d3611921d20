//! Analyzer and anonymizer configuration

use crate::analysis::anonymizer::{AnonymizerEngine, Operator};
use crate::analysis::models::EntityType;
use crate::domain::{Result, ScrubError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Detection engine settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Recognizer keys to register per language; `["all"]` selects every
    /// recognizer in the pattern library. Unset means the job profile's list.
    #[serde(default)]
    pub recognizers: Option<Vec<String>>,

    /// Minimum score for a detection to be kept
    #[serde(default)]
    pub score_threshold: f32,

    /// Directory holding `<model_id>.toml` model files
    #[serde(default)]
    pub models_dir: Option<PathBuf>,

    /// Alternative pattern library replacing the built-in one
    #[serde(default)]
    pub pattern_library: Option<PathBuf>,
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.score_threshold) {
            return Err(ScrubError::Configuration(format!(
                "analyzer.score_threshold must be between 0.0 and 1.0, got {}",
                self.score_threshold
            )));
        }

        if let Some(ref recognizers) = self.recognizers {
            if recognizers.is_empty() {
                return Err(ScrubError::Configuration(
                    "analyzer.recognizers cannot be empty".to_string(),
                ));
            }
        }

        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                return Err(ScrubError::Configuration(format!(
                    "Pattern library file not found: {}",
                    path.display()
                )));
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                return Err(ScrubError::Configuration(format!(
                    "Pattern library must be a TOML file: {}",
                    path.display()
                )));
            }
        }

        if let Some(ref dir) = self.models_dir {
            if !dir.is_dir() {
                return Err(ScrubError::Configuration(format!(
                    "Models directory not found: {}",
                    dir.display()
                )));
            }
        }

        Ok(())
    }
}

/// Redaction engine settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnonymizerConfig {
    /// Operator for entity types without an entry in `operators`
    #[serde(default)]
    pub default_operator: Operator,

    /// Operators keyed by entity label (e.g. `PHONE_NUMBER`)
    #[serde(default)]
    pub operators: BTreeMap<String, Operator>,
}

impl AnonymizerConfig {
    pub fn validate(&self) -> Result<()> {
        self.default_operator.validate()?;
        for (entity, operator) in &self.operators {
            entity.parse::<EntityType>()?;
            operator.validate()?;
        }
        Ok(())
    }

    /// Build the anonymizer engine
    pub fn build(&self) -> Result<AnonymizerEngine> {
        let mut engine = AnonymizerEngine::new().with_default_operator(self.default_operator.clone());
        for (entity, operator) in &self.operators {
            operator.validate()?;
            engine = engine.with_operator(entity.parse()?, operator.clone());
        }
        Ok(engine)
    }
}
