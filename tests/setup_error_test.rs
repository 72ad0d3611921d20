//! Engine setup must fail before any row is read

use scrubber::analysis::{PiiRedactor, RedactorSettings};
use scrubber::cli::{exit_code_for, EXIT_CONFIG, EXIT_SETUP};
use scrubber::config::{JobSettings, ScrubberConfig};
use scrubber::core::batch::BatchCoordinator;
use scrubber::domain::{LanguageCode, ModelId, ScrubError};
use scrubber::language::SupportedLanguages;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_unknown_builtin_model() {
    let mut languages = SupportedLanguages::english();
    languages.insert(
        LanguageCode::new("sv").unwrap(),
        ModelId::new("sv_core_news_sm").unwrap(),
    );

    let err = PiiRedactor::setup(&RedactorSettings::new(languages, vec!["all".to_string()]))
        .err()
        .unwrap();
    match err {
        ScrubError::ModelLoad {
            ref language,
            ref model,
            ..
        } => {
            assert_eq!(language, "sv");
            assert_eq!(model, "sv_core_news_sm");
        }
        other => panic!("expected ModelLoad, got {other:?}"),
    }
    assert_eq!(exit_code_for(&err), EXIT_SETUP);
}

#[test]
fn test_model_missing_from_models_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("en_core_web_lg.toml"),
        "language = \"en\"\n\n[entities]\nPERSON = [\"Jane Doe\"]\n",
    )
    .unwrap();

    let mut settings =
        RedactorSettings::new(SupportedLanguages::multilingual(), vec!["email".to_string()]);
    settings.models_dir = Some(dir.path().to_path_buf());

    let err = PiiRedactor::setup(&settings).err().unwrap();
    assert!(matches!(err, ScrubError::ModelLoad { .. }));
}

#[test]
fn test_model_for_wrong_language() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("en_core_web_lg.toml"), "language = \"de\"\n").unwrap();

    let mut settings =
        RedactorSettings::new(SupportedLanguages::english(), vec!["email".to_string()]);
    settings.models_dir = Some(dir.path().to_path_buf());

    let err = PiiRedactor::setup(&settings).err().unwrap();
    assert!(matches!(err, ScrubError::ModelLoad { .. }));
}

#[test]
fn test_unknown_recognizer_key() {
    let err = PiiRedactor::setup(&RedactorSettings::new(
        SupportedLanguages::english(),
        vec!["shoe_size".to_string()],
    ))
    .err()
    .unwrap();
    assert!(matches!(err, ScrubError::Configuration(_)));
    assert_eq!(exit_code_for(&err), EXIT_CONFIG);
}

#[test]
fn test_setup_failure_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("never.txt");

    let mut config = ScrubberConfig::default();
    config.source.database = Some(dir.path().join("sentences.db"));
    config.output.path = Some(output.clone());
    let mut settings = JobSettings::resolve(&config).unwrap();
    settings.languages.insert(
        LanguageCode::new("sv").unwrap(),
        ModelId::new("sv_core_news_sm").unwrap(),
    );

    assert!(BatchCoordinator::new(settings).is_err());
    assert!(!output.exists());
}
