//! Analyzer engine: runs every recognizer for a language over a text

use crate::analysis::context::ContextEnhancer;
use crate::analysis::models::{EntityType, RecognizerResult};
use crate::analysis::nlp::NlpEngine;
use crate::analysis::registry::RecognizerRegistry;
use crate::domain::{LanguageCode, Result, ScrubError};
use std::cmp::Ordering;

/// Detection engine
///
/// Built once at startup from an [`NlpEngine`] and a filled
/// [`RecognizerRegistry`]; immutable afterwards.
pub struct AnalyzerEngine {
    nlp: NlpEngine,
    registry: RecognizerRegistry,
    context: ContextEnhancer,
    score_threshold: f32,
}

impl AnalyzerEngine {
    pub fn new(nlp: NlpEngine, registry: RecognizerRegistry) -> Self {
        Self {
            nlp,
            registry,
            context: ContextEnhancer::default(),
            score_threshold: 0.0,
        }
    }

    /// Drop results scoring below `threshold`
    pub fn with_score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_context_enhancer(mut self, context: ContextEnhancer) -> Self {
        self.context = context;
        self
    }

    pub fn registry(&self) -> &RecognizerRegistry {
        &self.registry
    }

    pub fn nlp(&self) -> &NlpEngine {
        &self.nlp
    }

    /// Whether both a model and at least one recognizer exist for `language`
    pub fn supports(&self, language: &LanguageCode) -> bool {
        self.nlp.supports(language) && self.registry.supports(language)
    }

    /// Detect PII in `text`, ordered by start offset
    pub fn analyze(&self, text: &str, language: &LanguageCode) -> Result<Vec<RecognizerResult>> {
        self.analyze_entities(text, language, None)
    }

    /// Like [`analyze`](Self::analyze), restricted to `entities` when given
    pub fn analyze_entities(
        &self,
        text: &str,
        language: &LanguageCode,
        entities: Option<&[EntityType]>,
    ) -> Result<Vec<RecognizerResult>> {
        if !self.registry.supports(language) {
            return Err(ScrubError::UnsupportedLanguage(language.to_string()));
        }
        let artifacts = self.nlp.process(text, language)?;

        let mut results = Vec::new();
        for recognizer in self.registry.recognizers_for(language) {
            if let Some(wanted) = entities {
                if !recognizer
                    .supported_entities()
                    .iter()
                    .any(|e| wanted.contains(e))
                {
                    continue;
                }
            }

            let mut found = recognizer.analyze(text, &artifacts).map_err(|e| {
                ScrubError::Analysis(format!("recognizer {} failed: {e}", recognizer.name()))
            })?;
            self.context
                .enhance(&mut found, &artifacts, recognizer.context());
            results.extend(found);
        }

        results.retain(|r| {
            r.score >= self.score_threshold
                && !r.is_empty()
                && entities.map_or(true, |wanted| wanted.contains(&r.entity_type))
        });

        let mut results = remove_duplicates(results);
        results.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));

        tracing::trace!(
            language = %language,
            detections = results.len(),
            "Analyzed text"
        );
        Ok(results)
    }
}

/// Drop exact duplicates and spans contained in a same-type span that scores
/// at least as high. Results of different types are left for the anonymizer
/// to resolve.
pub fn remove_duplicates(mut results: Vec<RecognizerResult>) -> Vec<RecognizerResult> {
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(b.len().cmp(&a.len()))
            .then(a.start.cmp(&b.start))
    });

    let mut kept: Vec<RecognizerResult> = Vec::with_capacity(results.len());
    for result in results {
        if result.score <= 0.0 {
            continue;
        }
        let redundant = kept.iter().any(|k| {
            k.same_span(&result)
                || (k.entity_type == result.entity_type && result.contained_in(k))
        });
        if !redundant {
            kept.push(result);
        }
    }
    kept
}
