//! Validate config command implementation
//!
//! Loads the configuration, resolves it against its job profile and prints
//! the effective settings.

use crate::cli::{EXIT_CONFIG, EXIT_SUCCESS};
use crate::config::{JobSettings, ScrubberConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config: &ScrubberConfig, config_source: &str) -> anyhow::Result<i32> {
        tracing::info!(config_source = %config_source, "Validating configuration");

        println!("🔍 Validating configuration: {config_source}");
        println!();
        println!("✅ Configuration file loaded successfully");

        if let Err(e) = config.validate() {
            println!("❌ Configuration validation failed");
            println!("   Error: {e}");
            println!();
            return Ok(EXIT_CONFIG);
        }

        let settings = match JobSettings::resolve(config) {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Job settings are inconsistent");
                println!("   Error: {e}");
                println!();
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Profile: {}", settings.profile);
        println!("  Database: {}", settings.database.display());
        println!("  Query: {}", settings.query);
        println!("  Text Column: {}", settings.text_column);
        println!(
            "  Output: {} ({})",
            settings.output.display(),
            settings.output_mode
        );
        println!(
            "  Languages: {}",
            settings
                .languages
                .iter()
                .map(|(code, model)| format!("{code}={model}"))
                .collect::<Vec<_>>()
                .join(", ")
        );
        if settings.detect_language {
            println!("  Language Detection: on (fallback {})", settings.language);
        } else {
            println!("  Language Detection: off (fixed {})", settings.language);
        }
        println!("  Recognizers: {:?}", settings.recognizers);
        println!("  Score Threshold: {}", settings.analyzer.score_threshold);
        println!("  On Error: {}", settings.on_error);
        println!();
        Ok(EXIT_SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LanguageCode;

    #[test]
    fn test_default_config_is_valid() {
        let args = ValidateArgs {};
        let code = args
            .execute(&ScrubberConfig::default(), "(defaults)")
            .unwrap();
        assert_eq!(code, EXIT_SUCCESS);
    }

    #[test]
    fn test_inconsistent_language_reported() {
        let mut config = ScrubberConfig::default();
        config.job.profile = crate::config::JobProfile::English;
        config.job.language = Some(LanguageCode::new("de").unwrap());

        let code = ValidateArgs {}.execute(&config, "(test)").unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }
}
