//! Configuration schema types
//!
//! Every section is optional; fields left unset are filled from the selected
//! job profile when the configuration is resolved into [`JobSettings`].
//!
//! [`JobSettings`]: crate::config::JobSettings

use crate::adapters::sqlite::{DEFAULT_QUERY, DEFAULT_TEXT_COLUMN};
use crate::adapters::OutputMode;
use crate::analysis::{AnalyzerConfig, AnonymizerConfig};
use crate::config::profile::JobProfile;
use crate::core::batch::ErrorPolicy;
use crate::domain::LanguageCode;
use crate::language::SupportedLanguages;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main Scrubber configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrubberConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Job selection and behaviour
    #[serde(default)]
    pub job: JobConfig,

    /// Source database
    #[serde(default)]
    pub source: SourceConfig,

    /// Output file
    #[serde(default)]
    pub output: OutputConfig,

    /// Language → model mapping, replacing the profile's set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<SupportedLanguages>,

    /// Detection engine
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Redaction engine
    #[serde(default)]
    pub anonymizer: AnonymizerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ScrubberConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.job.validate()?;
        self.source.validate()?;
        self.output.validate()?;

        if let Some(ref languages) = self.languages {
            if languages.is_empty() {
                return Err("[languages] cannot be empty".to_string());
            }
        }

        self.analyzer.validate().map_err(|e| e.to_string())?;
        self.anonymizer.validate().map_err(|e| e.to_string())?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Job configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobConfig {
    /// Built-in job profile supplying every unset value
    #[serde(default)]
    pub profile: JobProfile,

    /// Detect each row's language instead of using a fixed one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detect_language: Option<bool>,

    /// Fixed language for every row when detection is off
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageCode>,

    /// Fallback for unsupported detections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_language: Option<LanguageCode>,

    /// What a failing row does to the batch
    #[serde(default)]
    pub on_error: ErrorPolicy,
}

impl JobConfig {
    fn validate(&self) -> Result<(), String> {
        if self.detect_language == Some(true) && self.language.is_some() {
            return Err(
                "job.language forces a fixed language and cannot be combined with detect_language = true"
                    .to_string(),
            );
        }
        Ok(())
    }
}

/// Source database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// SQLite database file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Query producing the rows; column 0 is the id
    #[serde(default = "default_query")]
    pub query: String,

    /// Index of the free-text column
    #[serde(default = "default_text_column")]
    pub text_column: usize,
}

impl SourceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.query.trim().is_empty() {
            return Err("source.query cannot be empty".to_string());
        }
        if self.text_column == 0 {
            return Err("source.text_column must be > 0 (column 0 holds the row id)".to_string());
        }
        Ok(())
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            database: None,
            query: default_query(),
            text_column: default_text_column(),
        }
    }
}

/// Output file configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<OutputMode>,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref path) = self.path {
            if path.as_os_str().is_empty() {
                return Err("output.path cannot be empty".to_string());
            }
            if path.is_dir() {
                return Err(format!(
                    "output.path '{}' is a directory",
                    path.display()
                ));
            }
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local_enabled = true".to_string());
        }

        Ok(())
    }

    /// Console-only logging
    pub fn console() -> Self {
        Self {
            local_enabled: false,
            ..Self::default()
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_query() -> String {
    DEFAULT_QUERY.to_string()
}

fn default_text_column() -> usize {
    DEFAULT_TEXT_COLUMN
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
