//! Context-aware score enhancement
//!
//! A pattern match preceded by one of its recognizer's context words (for
//! example "phone" before a digit run) is more likely to be real PII. The
//! enhancer looks at a window of tokens before each match and raises the
//! score when a context word is present.

use crate::analysis::models::RecognizerResult;
use crate::analysis::nlp::NlpArtifacts;

/// Context enhancement parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextEnhancer {
    /// Added to the score when context is found
    pub similarity_factor: f32,
    /// Floor applied to the score when context is found
    pub min_score_with_context: f32,
    /// Number of tokens inspected before the match
    pub prefix_window: usize,
}

impl Default for ContextEnhancer {
    fn default() -> Self {
        Self {
            similarity_factor: 0.35,
            min_score_with_context: 0.4,
            prefix_window: 5,
        }
    }
}

impl ContextEnhancer {
    /// Raise `results` scores in place where `context` words precede them.
    /// Returns the number of results that were enhanced.
    pub fn enhance(
        &self,
        results: &mut [RecognizerResult],
        artifacts: &NlpArtifacts,
        context: &[String],
    ) -> usize {
        if context.is_empty() {
            return 0;
        }

        let mut enhanced = 0;
        for result in results.iter_mut() {
            let found = artifacts
                .tokens_before(result.start, self.prefix_window)
                .iter()
                .any(|token| context.iter().any(|word| token.text == *word));

            if found {
                let boosted = (result.score + self.similarity_factor)
                    .max(self.min_score_with_context)
                    .min(1.0);
                result.score = boosted;
                enhanced += 1;
            }
        }
        enhanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::EntityType;
    use crate::analysis::nlp::Token;

    fn artifacts(text: &str) -> NlpArtifacts {
        let mut tokens = Vec::new();
        let mut offset = 0;
        for word in text.split(' ') {
            tokens.push(Token {
                text: word.to_lowercase(),
                start: offset,
                end: offset + word.len(),
            });
            offset += word.len() + 1;
        }
        NlpArtifacts { tokens }
    }

    #[test]
    fn test_boost_when_context_precedes() {
        let text = "my phone is 5551234567";
        let mut results = vec![RecognizerResult::new(
            EntityType::PhoneNumber,
            12,
            22,
            0.4,
            "PhoneRecognizer",
        )];
        let count = ContextEnhancer::default().enhance(
            &mut results,
            &artifacts(text),
            &["phone".to_string()],
        );

        assert_eq!(count, 1);
        assert!((results[0].score - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_no_boost_outside_window() {
        let text = "phone a b c d e f 5551234567";
        let start = text.find('5').unwrap();
        let mut results = vec![RecognizerResult::new(
            EntityType::PhoneNumber,
            start,
            text.len(),
            0.4,
            "PhoneRecognizer",
        )];
        let count = ContextEnhancer::default().enhance(
            &mut results,
            &artifacts(text),
            &["phone".to_string()],
        );

        assert_eq!(count, 0);
        assert_eq!(results[0].score, 0.4);
    }

    #[test]
    fn test_word_prefix_is_not_context() {
        let text = "tell me 5551234567";
        let start = text.find('5').unwrap();
        let mut results = vec![RecognizerResult::new(
            EntityType::PhoneNumber,
            start,
            text.len(),
            0.4,
            "PhoneRecognizer",
        )];
        let count = ContextEnhancer::default().enhance(
            &mut results,
            &artifacts(text),
            &["tel".to_string()],
        );

        assert_eq!(count, 0);
        assert_eq!(results[0].score, 0.4);
    }

    #[test]
    fn test_boost_is_capped() {
        let mut results = vec![RecognizerResult::new(EntityType::CreditCard, 5, 24, 1.0, "cc")];
        ContextEnhancer::default().enhance(&mut results, &artifacts("card 4111111111111111111"), &[
            "card".to_string(),
        ]);
        assert_eq!(results[0].score, 1.0);
    }
}
