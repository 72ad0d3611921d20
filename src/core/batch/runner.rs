//! Row-by-row batch runner
//!
//! For every row from the source: pick a language, redact through the
//! injected [`RedactionService`], write the entry. Output order equals
//! source order.

use crate::adapters::{EntrySink, SentenceSource};
use crate::analysis::RedactionService;
use crate::core::batch::summary::RunSummary;
use crate::domain::{LanguageCode, Result, ScrubError, SentenceRow};
use crate::language::LanguageResolver;
use crate::{log_row_processed, log_row_skipped, log_run_complete};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

/// What a failing row does to the batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop at the first failing row
    #[default]
    Abort,
    /// Log the row, count it, continue
    Skip,
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abort => write!(f, "abort"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(format!(
                "Invalid error policy '{other}'. Must be 'abort' or 'skip'"
            )),
        }
    }
}

/// How each row's language is chosen
#[derive(Debug)]
pub enum LanguageMode {
    /// Every row uses this language
    Fixed(LanguageCode),
    /// Detect per row, falling back to the resolver's default
    Detect(LanguageResolver),
}

struct RowOutcome {
    language: LanguageCode,
    fell_back: bool,
}

/// Drives rows from a source through redaction into a sink
pub struct BatchRunner<'a> {
    service: &'a dyn RedactionService,
    language: LanguageMode,
    policy: ErrorPolicy,
}

impl<'a> BatchRunner<'a> {
    pub fn new(service: &'a dyn RedactionService, language: LanguageMode) -> Self {
        Self {
            service,
            language,
            policy: ErrorPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Process every row of `source` into `sink`
    ///
    /// The sink is finished whether the run succeeds or aborts; entries
    /// written before an abort stay written.
    ///
    /// # Errors
    ///
    /// Under [`ErrorPolicy::Abort`], the first redaction failure is returned
    /// as [`ScrubError::RowFailed`]. Source and sink failures abort under
    /// either policy.
    pub fn run(
        &self,
        source: &mut dyn SentenceSource,
        sink: &mut dyn EntrySink,
    ) -> Result<RunSummary> {
        let start = Instant::now();
        let mut summary = RunSummary::new();

        tracing::info!(source = %source.describe(), policy = %self.policy, "Analysis started ...");

        let result = source.for_each_row(&mut |row| {
            summary.rows_read += 1;
            self.handle_row(row, sink, &mut summary)
        });
        let finished = sink.finish();

        result?;
        finished?;

        let summary = summary.with_duration(start.elapsed());
        log_run_complete!(summary.rows_read, summary.rows_written, summary.duration);
        Ok(summary)
    }

    fn handle_row(
        &self,
        row: SentenceRow,
        sink: &mut dyn EntrySink,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let outcome = self.resolve(&row.text);
        let redacted = match self.service.redact(&row.text, &outcome.language) {
            Ok(redacted) => redacted,
            Err(e) => {
                return match self.policy {
                    ErrorPolicy::Abort => Err(ScrubError::for_row(row.id, e)),
                    ErrorPolicy::Skip => {
                        log_row_skipped!(row.id, e);
                        summary.add_error(row.id, e.to_string());
                        Ok(())
                    }
                };
            }
        };

        sink.write_entry(&redacted.text)
            .map_err(|e| ScrubError::for_row(row.id.as_str(), e))?;

        summary.rows_written += 1;
        summary.add_language(outcome.language.as_str());
        if outcome.fell_back {
            summary.language_fallbacks += 1;
        }
        for item in &redacted.items {
            summary.add_entity(item.entity_type.label());
        }

        log_row_processed!(row.id, outcome.language, redacted.items.len());
        Ok(())
    }

    fn resolve(&self, text: &str) -> RowOutcome {
        match &self.language {
            LanguageMode::Fixed(language) => RowOutcome {
                language: language.clone(),
                fell_back: false,
            },
            LanguageMode::Detect(resolver) => {
                let resolution = resolver.resolve(text);
                RowOutcome {
                    language: resolution.language,
                    fell_back: resolution.fell_back,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{VecSink, VecSource};
    use crate::analysis::EngineResult;
    use crate::language::{LanguageDetector, SupportedLanguages};
    use std::cell::RefCell;

    /// Upper-cases text and records the language of every call
    #[derive(Default)]
    struct RecordingService {
        calls: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl RedactionService for RecordingService {
        fn redact(&self, text: &str, language: &LanguageCode) -> Result<EngineResult> {
            self.calls.borrow_mut().push(language.to_string());
            if self.fail_on == Some(text) {
                return Err(ScrubError::Analysis("boom".to_string()));
            }
            Ok(EngineResult::unchanged(text.to_uppercase()))
        }
    }

    struct FixedDetector(&'static str);

    impl LanguageDetector for FixedDetector {
        fn detect(&self, _text: &str) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    fn rows(texts: &[&str]) -> VecSource {
        VecSource::new(
            texts
                .iter()
                .enumerate()
                .map(|(i, t)| SentenceRow::new((i + 1).to_string(), *t))
                .collect(),
        )
    }

    #[test]
    fn test_preserves_row_order() {
        let service = RecordingService::default();
        let runner = BatchRunner::new(&service, LanguageMode::Fixed(LanguageCode::english()));
        let mut sink = VecSink::default();

        let summary = runner.run(&mut rows(&["a", "b", "c"]), &mut sink).unwrap();

        assert_eq!(sink.entries, vec!["A", "B", "C"]);
        assert!(sink.finished);
        assert_eq!(summary.rows_read, 3);
        assert_eq!(summary.rows_written, 3);
        assert_eq!(summary.rows_by_language["en"], 3);
    }

    #[test]
    fn test_abort_stops_at_failing_row() {
        let service = RecordingService {
            fail_on: Some("b"),
            ..Default::default()
        };
        let runner = BatchRunner::new(&service, LanguageMode::Fixed(LanguageCode::english()));
        let mut sink = VecSink::default();

        let err = runner
            .run(&mut rows(&["a", "b", "c"]), &mut sink)
            .unwrap_err();

        assert!(matches!(err, ScrubError::RowFailed { ref row_id, .. } if row_id == "2"));
        assert_eq!(sink.entries, vec!["A"]);
        assert!(sink.finished);
        assert_eq!(service.calls.borrow().len(), 2);
    }

    #[test]
    fn test_skip_continues_past_failing_row() {
        let service = RecordingService {
            fail_on: Some("b"),
            ..Default::default()
        };
        let runner = BatchRunner::new(&service, LanguageMode::Fixed(LanguageCode::english()))
            .with_policy(ErrorPolicy::Skip);
        let mut sink = VecSink::default();

        let summary = runner.run(&mut rows(&["a", "b", "c"]), &mut sink).unwrap();

        assert_eq!(sink.entries, vec!["A", "C"]);
        assert_eq!(summary.rows_read, 3);
        assert_eq!(summary.rows_skipped, 1);
        assert_eq!(summary.errors[0].row_id, "2");
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_unsupported_detection_uses_fallback() {
        let service = RecordingService::default();
        let resolver = LanguageResolver::new(
            Box::new(FixedDetector("xx")),
            SupportedLanguages::multilingual(),
            LanguageCode::english(),
        )
        .unwrap();
        let runner = BatchRunner::new(&service, LanguageMode::Detect(resolver));
        let mut sink = VecSink::default();

        let summary = runner
            .run(&mut rows(&["Hola, me llamo Juan"]), &mut sink)
            .unwrap();

        assert_eq!(*service.calls.borrow(), vec!["en"]);
        assert_eq!(summary.language_fallbacks, 1);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("SKIP".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::Skip);
        assert_eq!("abort".parse::<ErrorPolicy>().unwrap(), ErrorPolicy::Abort);
        assert!("retry".parse::<ErrorPolicy>().is_err());
    }
}
