//! Integration tests for the redaction service and language fallback

use scrubber::adapters::{VecSink, VecSource};
use scrubber::analysis::{EngineResult, PiiRedactor, RedactionService, RedactorSettings};
use scrubber::core::batch::{BatchRunner, LanguageMode};
use scrubber::domain::{LanguageCode, Result, SentenceRow};
use scrubber::language::{LanguageDetector, LanguageResolver, SupportedLanguages};
use std::cell::RefCell;

fn english_redactor() -> PiiRedactor {
    let settings = RedactorSettings::new(SupportedLanguages::english(), vec!["all".to_string()]);
    PiiRedactor::setup(&settings).unwrap()
}

fn en() -> LanguageCode {
    LanguageCode::english()
}

/// Records the language of every call and returns the text unchanged
#[derive(Default)]
struct RecordingService {
    calls: RefCell<Vec<(String, String)>>,
}

impl RedactionService for RecordingService {
    fn redact(&self, text: &str, language: &LanguageCode) -> Result<EngineResult> {
        self.calls
            .borrow_mut()
            .push((text.to_string(), language.to_string()));
        Ok(EngineResult::unchanged(text))
    }
}

/// Always reports the same language
struct FixedDetector(&'static str);

impl LanguageDetector for FixedDetector {
    fn detect(&self, _text: &str) -> Option<String> {
        Some(self.0.to_string())
    }
}

#[test]
fn test_contact_sentence_keeps_surrounding_words() {
    let redactor = english_redactor();
    let out = redactor
        .redact("Contact me at jane@example.com or 555-123-4567.", &en())
        .unwrap();

    assert!(!out.text.contains("jane@example.com"));
    assert!(!out.text.contains("555-123-4567"));
    assert!(out.text.starts_with("Contact me at "));
    assert!(out.text.contains(" or "));
    assert_eq!(out.items.len(), 2);
}

#[test]
fn test_no_verbatim_pii_remains() {
    let redactor = english_redactor();
    let cases = [
        ("Write to john.doe@mail.example.org today", "john.doe@mail.example.org"),
        ("Call 555-123-4567 after six", "555-123-4567"),
        ("The server at 192.168.1.20 is down", "192.168.1.20"),
        ("Paid with 4111 1111 1111 1111 yesterday", "4111 1111 1111 1111"),
        ("My SSN is 078-05-1120.", "078-05-1120"),
        ("IBAN DE89 3704 0044 0532 0130 00 please", "DE89 3704 0044 0532 0130 00"),
    ];

    for (text, pii) in cases {
        let out = redactor.redact(text, &en()).unwrap();
        assert!(
            !out.text.contains(pii),
            "'{pii}' survived redaction: {}",
            out.text
        );
        assert!(!out.items.is_empty());
    }
}

#[test]
fn test_luhn_invalid_card_is_kept() {
    let settings =
        RedactorSettings::new(SupportedLanguages::english(), vec!["credit_card".to_string()]);
    let redactor = PiiRedactor::setup(&settings).unwrap();

    let text = "Reference 4111 1111 1111 1112 is not a card";
    let out = redactor.redact(text, &en()).unwrap();
    assert_eq!(out.text, text);
    assert!(out.items.is_empty());
}

#[test]
fn test_redaction_is_idempotent() {
    let redactor = english_redactor();
    let first = redactor
        .redact("Mail jane@example.com from 10.0.0.1", &en())
        .unwrap();
    let second = redactor.redact(&first.text, &en()).unwrap();

    assert_eq!(second.text, first.text);
    assert!(second.items.is_empty());
}

#[test]
fn test_text_without_pii_is_unchanged() {
    let redactor = english_redactor();
    let text = "The weather in the valley was mild all week.";
    let out = redactor.redact(text, &en()).unwrap();
    assert_eq!(out.text, text);
}

#[test]
fn test_spanish_redaction() {
    let settings = RedactorSettings::new(
        SupportedLanguages::multilingual(),
        vec!["email".to_string(), "phone".to_string()],
    );
    let redactor = PiiRedactor::setup(&settings).unwrap();
    let es = LanguageCode::new("es").unwrap();

    let out = redactor
        .redact("Escríbeme a maria@ejemplo.es, por favor.", &es)
        .unwrap();
    assert_eq!(out.text, "Escríbeme a <EMAIL_ADDRESS>, por favor.");
}

#[test]
fn test_unsupported_detection_falls_back_to_english() {
    let service = RecordingService::default();
    let resolver = LanguageResolver::new(
        Box::new(FixedDetector("xx")),
        SupportedLanguages::multilingual(),
        en(),
    )
    .unwrap();

    let mut source = VecSource::new(vec![SentenceRow::new(
        "1",
        "Hola, me llamo María y vivo en Sevilla.",
    )]);
    let mut sink = VecSink::default();

    let summary = BatchRunner::new(&service, LanguageMode::Detect(resolver))
        .run(&mut source, &mut sink)
        .unwrap();

    let calls = service.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, "en");
    assert_eq!(summary.language_fallbacks, 1);
    assert_eq!(sink.entries, vec!["Hola, me llamo María y vivo en Sevilla."]);
}

#[test]
fn test_supported_detection_is_passed_through() {
    let service = RecordingService::default();
    let resolver = LanguageResolver::new(
        Box::new(FixedDetector("es")),
        SupportedLanguages::multilingual(),
        en(),
    )
    .unwrap();

    let mut source = VecSource::new(vec![SentenceRow::new("1", "Buenos días")]);
    let mut sink = VecSink::default();

    let summary = BatchRunner::new(&service, LanguageMode::Detect(resolver))
        .run(&mut source, &mut sink)
        .unwrap();

    assert_eq!(service.calls.borrow()[0].1, "es");
    assert_eq!(summary.language_fallbacks, 0);
}
