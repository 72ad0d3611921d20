//! Redact command implementation
//!
//! Redacts a single text with the engine of the selected profile.

use crate::analysis::{PiiRedactor, RedactionService};
use crate::cli::{exit_code_for, EXIT_CONFIG, EXIT_SUCCESS};
use crate::config::{JobProfile, JobSettings, ScrubberConfig};
use crate::domain::LanguageCode;
use crate::language::{LanguageResolver, WhatlangDetector};
use clap::Args;

/// Arguments for the redact command
#[derive(Args, Debug)]
pub struct RedactArgs {
    /// Text to redact
    #[arg(short, long)]
    pub text: String,

    /// Language of the text; detected when the profile detects languages
    #[arg(long)]
    pub language: Option<LanguageCode>,

    /// Job profile (english, spanish, multilingual)
    #[arg(short, long)]
    pub profile: Option<JobProfile>,

    /// Print the full result, including replaced spans, as JSON
    #[arg(long)]
    pub json: bool,
}

impl RedactArgs {
    /// Execute the redact command
    pub fn execute(&self, mut config: ScrubberConfig) -> anyhow::Result<i32> {
        if let Some(profile) = self.profile {
            config.job.profile = profile;
        }
        if let Some(ref language) = self.language {
            config.job.language = Some(language.clone());
            config.job.detect_language = Some(false);
        }

        let settings = match JobSettings::resolve(&config) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let redactor = match PiiRedactor::setup(&settings.redactor_settings()) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Failed to set up analyzer: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let language = if settings.detect_language {
            let resolver = LanguageResolver::new(
                Box::new(WhatlangDetector::new()),
                settings.languages.clone(),
                settings.language.clone(),
            )?;
            resolver.resolve(&self.text).language
        } else {
            settings.language.clone()
        };

        let result = match redactor.redact(&self.text, &language) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Redaction failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if self.json {
            let output = serde_json::json!({
                "language": language.as_str(),
                "text": result.text,
                "items": result.items,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", result.text);
        }

        Ok(EXIT_SUCCESS)
    }
}
