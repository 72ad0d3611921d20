//! Anonymizer engine
//!
//! Substitutes detected spans with operator output. Overlapping spans of
//! different entity types are resolved before substitution: higher score
//! wins, then the longer span.

pub mod operators;

pub use operators::Operator;

use crate::analysis::models::{EntityType, RecognizerResult};
use crate::domain::{Result, ScrubError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One substitution, with offsets into the anonymized text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorResult {
    pub entity_type: EntityType,
    pub operator: String,
    pub start: usize,
    pub end: usize,
}

/// Output of [`AnonymizerEngine::anonymize`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineResult {
    pub text: String,
    pub items: Vec<OperatorResult>,
}

impl EngineResult {
    /// Result for text that needed no substitution
    pub fn unchanged(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            items: Vec::new(),
        }
    }
}

/// Redaction engine with per-entity operators
#[derive(Debug, Clone, Default)]
pub struct AnonymizerEngine {
    default_operator: Operator,
    operators: HashMap<EntityType, Operator>,
}

impl AnonymizerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_operator(mut self, operator: Operator) -> Self {
        self.default_operator = operator;
        self
    }

    pub fn with_operator(mut self, entity: EntityType, operator: Operator) -> Self {
        self.operators.insert(entity, operator);
        self
    }

    pub fn operator_for(&self, entity: EntityType) -> &Operator {
        self.operators.get(&entity).unwrap_or(&self.default_operator)
    }

    /// Replace every accepted span in `text`
    pub fn anonymize(&self, text: &str, results: &[RecognizerResult]) -> Result<EngineResult> {
        for result in results {
            if result.start > result.end
                || result.end > text.len()
                || !text.is_char_boundary(result.start)
                || !text.is_char_boundary(result.end)
            {
                return Err(ScrubError::Anonymization(format!(
                    "span {}..{} of {} is not valid for text of {} bytes",
                    result.start,
                    result.end,
                    result.entity_type,
                    text.len()
                )));
            }
        }

        let accepted = resolve_conflicts(results);

        let mut output = String::with_capacity(text.len());
        let mut items = Vec::with_capacity(accepted.len());
        let mut cursor = 0;
        for result in accepted {
            output.push_str(&text[cursor..result.start]);

            let operator = self.operator_for(result.entity_type);
            let replacement = operator.apply(&text[result.start..result.end], result.entity_type);
            let start = output.len();
            output.push_str(&replacement);
            items.push(OperatorResult {
                entity_type: result.entity_type,
                operator: operator.name().to_string(),
                start,
                end: output.len(),
            });

            cursor = result.end;
        }
        output.push_str(&text[cursor..]);

        Ok(EngineResult {
            text: output,
            items,
        })
    }
}

/// Pick a non-overlapping subset of `results`, ordered by start
fn resolve_conflicts(results: &[RecognizerResult]) -> Vec<&RecognizerResult> {
    let mut ranked: Vec<&RecognizerResult> = results.iter().filter(|r| !r.is_empty()).collect();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then(b.len().cmp(&a.len()))
            .then(a.start.cmp(&b.start))
    });

    let mut accepted: Vec<&RecognizerResult> = Vec::with_capacity(ranked.len());
    for candidate in ranked {
        if accepted.iter().all(|a| !a.overlaps(candidate)) {
            accepted.push(candidate);
        }
    }
    accepted.sort_by_key(|r| r.start);
    accepted
}
