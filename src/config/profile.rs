//! Built-in job profiles and resolved job settings
//!
//! A profile bundles the defaults of one batch job: which languages and
//! recognizers the engine is built with, whether rows are language-detected,
//! and where input comes from and output goes to. Explicit configuration
//! always wins over profile values.

use crate::adapters::OutputMode;
use crate::analysis::{AnalyzerConfig, AnonymizerConfig, RedactorSettings};
use crate::config::schema::ScrubberConfig;
use crate::core::batch::ErrorPolicy;
use crate::domain::{LanguageCode, Result, ScrubError};
use crate::language::SupportedLanguages;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Built-in batch job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobProfile {
    /// English text, every predefined recognizer, large English model
    English,
    /// Spanish text, email and phone recognizers only
    Spanish,
    /// Seven European languages with per-row language detection
    #[default]
    Multilingual,
}

impl JobProfile {
    pub const ALL: [JobProfile; 3] = [Self::English, Self::Spanish, Self::Multilingual];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Spanish => "spanish",
            Self::Multilingual => "multilingual",
        }
    }

    pub fn languages(&self) -> SupportedLanguages {
        match self {
            Self::English => SupportedLanguages::english(),
            Self::Spanish => SupportedLanguages::spanish(),
            Self::Multilingual => SupportedLanguages::multilingual(),
        }
    }

    pub fn recognizers(&self) -> Vec<String> {
        let keys: &[&str] = match self {
            Self::English => &["all"],
            Self::Spanish => &["email", "phone"],
            Self::Multilingual => &["email", "phone", "ip", "credit_card"],
        };
        keys.iter().map(|k| k.to_string()).collect()
    }

    pub fn detect_language(&self) -> bool {
        matches!(self, Self::Multilingual)
    }

    /// Language used when detection is off, and the fallback when it is on
    pub fn default_language(&self) -> LanguageCode {
        match self {
            Self::Spanish => LanguageCode::new("es").unwrap_or_else(|_| LanguageCode::english()),
            Self::English | Self::Multilingual => LanguageCode::english(),
        }
    }

    pub fn database(&self) -> PathBuf {
        match self {
            Self::English => PathBuf::from("test.db"),
            Self::Spanish | Self::Multilingual => PathBuf::from("foreign_test.db"),
        }
    }

    pub fn output(&self) -> PathBuf {
        match self {
            Self::English => PathBuf::from("english_result.txt"),
            Self::Spanish => PathBuf::from("spanish_result.txt"),
            Self::Multilingual => PathBuf::from("foreign_result.txt"),
        }
    }

    pub fn output_mode(&self) -> OutputMode {
        match self {
            Self::English | Self::Spanish => OutputMode::Append,
            Self::Multilingual => OutputMode::Truncate,
        }
    }
}

impl fmt::Display for JobProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobProfile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" | "en" => Ok(Self::English),
            "spanish" | "es" => Ok(Self::Spanish),
            "multilingual" | "foreign" => Ok(Self::Multilingual),
            other => Err(format!(
                "Invalid job profile '{other}'. Must be one of: english, spanish, multilingual"
            )),
        }
    }
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct JobSettings {
    pub profile: JobProfile,
    pub languages: SupportedLanguages,
    pub recognizers: Vec<String>,
    pub detect_language: bool,
    /// Fixed language, or the fallback when detecting
    pub language: LanguageCode,
    pub on_error: ErrorPolicy,
    pub database: PathBuf,
    pub query: String,
    pub text_column: usize,
    pub output: PathBuf,
    pub output_mode: OutputMode,
    pub analyzer: AnalyzerConfig,
    pub anonymizer: AnonymizerConfig,
}

impl JobSettings {
    /// Fill every unset value from the profile and check consistency
    ///
    /// # Errors
    ///
    /// Returns [`ScrubError::Configuration`] if the fixed or fallback
    /// language is not one of the supported languages.
    pub fn resolve(config: &ScrubberConfig) -> Result<Self> {
        let profile = config.job.profile;
        let languages = config
            .languages
            .clone()
            .unwrap_or_else(|| profile.languages());
        let detect_language = config
            .job
            .detect_language
            .unwrap_or_else(|| profile.detect_language() && config.job.language.is_none());

        let language = if detect_language {
            config.job.default_language.clone()
        } else {
            config
                .job
                .language
                .clone()
                .or_else(|| config.job.default_language.clone())
        }
        .unwrap_or_else(|| profile.default_language());

        if !languages.contains(&language) {
            let role = if detect_language { "Fallback" } else { "Fixed" };
            return Err(ScrubError::Configuration(format!(
                "{role} language '{language}' is not one of the supported languages ({})",
                languages
                    .codes()
                    .map(LanguageCode::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        Ok(Self {
            profile,
            languages,
            recognizers: config
                .analyzer
                .recognizers
                .clone()
                .unwrap_or_else(|| profile.recognizers()),
            detect_language,
            language,
            on_error: config.job.on_error,
            database: config
                .source
                .database
                .clone()
                .unwrap_or_else(|| profile.database()),
            query: config.source.query.clone(),
            text_column: config.source.text_column,
            output: config.output.path.clone().unwrap_or_else(|| profile.output()),
            output_mode: config.output.mode.unwrap_or_else(|| profile.output_mode()),
            analyzer: config.analyzer.clone(),
            anonymizer: config.anonymizer.clone(),
        })
    }

    /// Engine settings for [`PiiRedactor::setup`](crate::analysis::PiiRedactor::setup)
    pub fn redactor_settings(&self) -> RedactorSettings {
        RedactorSettings::new(self.languages.clone(), self.recognizers.clone())
            .with_analyzer_config(&self.analyzer)
            .with_anonymizer_config(self.anonymizer.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn config_for(profile: JobProfile) -> ScrubberConfig {
        let mut config = ScrubberConfig::default();
        config.job.profile = profile;
        config
    }

    #[test_case(JobProfile::English, "test.db", "english_result.txt", OutputMode::Append, false, "en")]
    #[test_case(JobProfile::Spanish, "foreign_test.db", "spanish_result.txt", OutputMode::Append, false, "es")]
    #[test_case(JobProfile::Multilingual, "foreign_test.db", "foreign_result.txt", OutputMode::Truncate, true, "en")]
    fn test_profile_defaults(
        profile: JobProfile,
        database: &str,
        output: &str,
        mode: OutputMode,
        detect: bool,
        language: &str,
    ) {
        let settings = JobSettings::resolve(&config_for(profile)).unwrap();
        assert_eq!(settings.database, PathBuf::from(database));
        assert_eq!(settings.output, PathBuf::from(output));
        assert_eq!(settings.output_mode, mode);
        assert_eq!(settings.detect_language, detect);
        assert_eq!(settings.language.as_str(), language);
        assert_eq!(settings.on_error, ErrorPolicy::Abort);
    }

    #[test]
    fn test_profile_recognizers() {
        assert_eq!(JobProfile::English.recognizers(), vec!["all"]);
        assert_eq!(JobProfile::Spanish.recognizers(), vec!["email", "phone"]);
        assert_eq!(JobProfile::Multilingual.recognizers().len(), 4);
    }

    #[test]
    fn test_explicit_values_win() {
        let mut config = config_for(JobProfile::English);
        config.output.path = Some(PathBuf::from("custom.txt"));
        config.output.mode = Some(OutputMode::Truncate);
        config.analyzer.recognizers = Some(vec!["email".to_string()]);

        let settings = JobSettings::resolve(&config).unwrap();
        assert_eq!(settings.output, PathBuf::from("custom.txt"));
        assert_eq!(settings.output_mode, OutputMode::Truncate);
        assert_eq!(settings.recognizers, vec!["email"]);
    }

    #[test]
    fn test_forced_language_disables_detection() {
        let mut config = config_for(JobProfile::Multilingual);
        config.job.language = Some(LanguageCode::new("fr").unwrap());

        let settings = JobSettings::resolve(&config).unwrap();
        assert!(!settings.detect_language);
        assert_eq!(settings.language.as_str(), "fr");
    }

    #[test]
    fn test_unsupported_fixed_language_rejected() {
        let mut config = config_for(JobProfile::Spanish);
        config.job.language = Some(LanguageCode::new("fr").unwrap());

        let err = JobSettings::resolve(&config).unwrap_err();
        assert!(matches!(err, ScrubError::Configuration(_)));
    }

    #[test]
    fn test_unsupported_fallback_rejected() {
        let mut config = config_for(JobProfile::Spanish);
        config.job.detect_language = Some(true);
        config.job.default_language = Some(LanguageCode::english());

        let err = JobSettings::resolve(&config).unwrap_err();
        assert!(err.to_string().contains("Fallback language 'en'"));
    }

    #[test]
    fn test_profile_parsing() {
        assert_eq!("English".parse::<JobProfile>().unwrap(), JobProfile::English);
        assert_eq!("foreign".parse::<JobProfile>().unwrap(), JobProfile::Multilingual);
        assert!("klingon".parse::<JobProfile>().is_err());
    }
}
