//! PII redaction service
//!
//! This module provides the [`RedactionService`] seam used by the batch
//! runner and [`PiiRedactor`], the implementation that chains the analyzer
//! and the anonymizer.
//!
//! # Examples
//!
//! ```no_run
//! use scrubber::analysis::{PiiRedactor, RedactionService, RedactorSettings};
//! use scrubber::domain::LanguageCode;
//! use scrubber::language::SupportedLanguages;
//!
//! # fn example() -> scrubber::domain::Result<()> {
//! let settings = RedactorSettings::new(SupportedLanguages::english(), vec!["all".to_string()]);
//! let redactor = PiiRedactor::setup(&settings)?;
//!
//! let out = redactor.redact("Mail jane@example.com", &LanguageCode::english())?;
//! assert_eq!(out.text, "Mail <EMAIL_ADDRESS>");
//! # Ok(())
//! # }
//! ```

use crate::analysis::analyzer::AnalyzerEngine;
use crate::analysis::anonymizer::{AnonymizerEngine, EngineResult};
use crate::analysis::config::{AnalyzerConfig, AnonymizerConfig};
use crate::analysis::nlp::NlpEngine;
use crate::analysis::recognizer::PatternLibrary;
use crate::analysis::registry::RecognizerRegistry;
use crate::domain::{LanguageCode, Result};
use crate::language::SupportedLanguages;
use std::path::PathBuf;
use std::time::Instant;

/// Text → redacted text, for a language the service was set up with
///
/// Implementations are immutable once built and are passed by reference to
/// the batch runner, so tests can substitute a stub.
pub trait RedactionService {
    fn redact(&self, text: &str, language: &LanguageCode) -> Result<EngineResult>;
}

/// Everything needed to build a [`PiiRedactor`]
#[derive(Debug, Clone)]
pub struct RedactorSettings {
    pub languages: SupportedLanguages,
    /// Recognizer keys, or `["all"]`
    pub recognizers: Vec<String>,
    pub score_threshold: f32,
    pub models_dir: Option<PathBuf>,
    pub pattern_library: Option<PathBuf>,
    pub anonymizer: AnonymizerConfig,
}

impl RedactorSettings {
    pub fn new(languages: SupportedLanguages, recognizers: Vec<String>) -> Self {
        Self {
            languages,
            recognizers,
            score_threshold: 0.0,
            models_dir: None,
            pattern_library: None,
            anonymizer: AnonymizerConfig::default(),
        }
    }

    /// Take threshold, models directory and pattern library from `config`
    pub fn with_analyzer_config(mut self, config: &AnalyzerConfig) -> Self {
        self.score_threshold = config.score_threshold;
        self.models_dir = config.models_dir.clone();
        self.pattern_library = config.pattern_library.clone();
        self
    }

    pub fn with_anonymizer_config(mut self, config: AnonymizerConfig) -> Self {
        self.anonymizer = config;
        self
    }
}

/// Analyzer plus anonymizer, built once per process
pub struct PiiRedactor {
    analyzer: AnalyzerEngine,
    anonymizer: AnonymizerEngine,
}

impl PiiRedactor {
    pub fn new(analyzer: AnalyzerEngine, anonymizer: AnonymizerEngine) -> Self {
        Self {
            analyzer,
            anonymizer,
        }
    }

    /// Load every model, register every recognizer, build the anonymizer
    ///
    /// # Errors
    ///
    /// Fails if any declared model cannot be loaded, the pattern library is
    /// invalid, a recognizer key is unknown, or an operator is misconfigured.
    pub fn setup(settings: &RedactorSettings) -> Result<Self> {
        let start = Instant::now();
        tracing::info!("Setting up analyzer ...");

        let library = match settings.pattern_library {
            Some(ref path) => PatternLibrary::from_file(path)?,
            None => PatternLibrary::builtin()?,
        };

        let keys: Vec<String> = if settings.recognizers.iter().any(|k| k == "all") {
            library.keys().map(str::to_string).collect()
        } else {
            settings.recognizers.clone()
        };

        let nlp = NlpEngine::load(&settings.languages, settings.models_dir.as_deref())?;
        let registry = RecognizerRegistry::load(&library, &keys, &nlp)?;
        let analyzer =
            AnalyzerEngine::new(nlp, registry).with_score_threshold(settings.score_threshold);
        let anonymizer = settings.anonymizer.build()?;

        tracing::info!(
            languages = settings.languages.len(),
            recognizers = analyzer.registry().len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Finished analyzer setup!"
        );

        Ok(Self::new(analyzer, anonymizer))
    }

    pub fn analyzer(&self) -> &AnalyzerEngine {
        &self.analyzer
    }

    pub fn anonymizer(&self) -> &AnonymizerEngine {
        &self.anonymizer
    }
}

impl RedactionService for PiiRedactor {
    fn redact(&self, text: &str, language: &LanguageCode) -> Result<EngineResult> {
        let results = self.analyzer.analyze(text, language)?;
        self.anonymizer.anonymize(text, &results)
    }
}
