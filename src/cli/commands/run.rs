//! Run command implementation
//!
//! Redacts every row of the source database into the output file.

use crate::adapters::OutputMode;
use crate::cli::{exit_code_for, EXIT_CONFIG, EXIT_PARTIAL, EXIT_SUCCESS};
use crate::config::{JobProfile, JobSettings, ScrubberConfig};
use crate::core::batch::{BatchCoordinator, ErrorPolicy, RunSummary};
use crate::domain::LanguageCode;
use crate::log_error_with_context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Job profile (english, spanish, multilingual)
    #[arg(short, long)]
    pub profile: Option<JobProfile>,

    /// Override the source SQLite database
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Override the output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Use this language for every row (disables detection)
    #[arg(long, conflicts_with = "detect_language")]
    pub language: Option<LanguageCode>,

    /// Detect each row's language
    #[arg(long)]
    pub detect_language: bool,

    /// Behaviour on a failing row (abort or skip)
    #[arg(long, value_name = "POLICY")]
    pub on_error: Option<ErrorPolicy>,

    /// Truncate the output file before writing
    #[arg(long, conflicts_with = "append")]
    pub truncate: bool,

    /// Append to the output file
    #[arg(long)]
    pub append: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut ScrubberConfig) {
        if let Some(profile) = self.profile {
            tracing::info!(profile = %profile, "Overriding job profile from CLI");
            config.job.profile = profile;
        }
        if let Some(ref database) = self.database {
            config.source.database = Some(database.clone());
        }
        if let Some(ref output) = self.output {
            config.output.path = Some(output.clone());
        }
        if let Some(ref language) = self.language {
            tracing::info!(language = %language, "Forcing language from CLI");
            config.job.language = Some(language.clone());
            config.job.detect_language = Some(false);
        }
        if self.detect_language {
            config.job.detect_language = Some(true);
            config.job.language = None;
        }
        if let Some(policy) = self.on_error {
            config.job.on_error = policy;
        }
        if self.truncate {
            config.output.mode = Some(OutputMode::Truncate);
        } else if self.append {
            config.output.mode = Some(OutputMode::Append);
        }
    }

    /// Execute the run command
    pub fn execute(&self, mut config: ScrubberConfig) -> anyhow::Result<i32> {
        tracing::info!("Starting run command");

        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        let settings = match JobSettings::resolve(&config) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Invalid job settings");
                eprintln!("{e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let coordinator = match BatchCoordinator::new(settings) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Engine setup failed");
                eprintln!("Failed to set up analyzer: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let summary = match coordinator.execute() {
            Ok(s) => s,
            Err(e) => {
                log_error_with_context!(&e, "Run failed");
                eprintln!("Run failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print_summary(&summary);
        }

        Ok(if summary.is_successful() {
            EXIT_SUCCESS
        } else {
            EXIT_PARTIAL
        })
    }
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("📊 Run Summary:");
    println!("  Rows Read: {}", summary.rows_read);
    println!("  Rows Written: {}", summary.rows_written);
    println!("  Rows Skipped: {}", summary.rows_skipped);
    println!("  Language Fallbacks: {}", summary.language_fallbacks);
    println!("  Entities Redacted: {}", summary.entities_redacted);
    for (entity, count) in &summary.entities_by_type {
        println!("    {entity}: {count}");
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    if let Some(ref path) = summary.output_path {
        println!("  Output: {}", path.display());
    }
    println!();

    if !summary.errors.is_empty() {
        println!("⚠️  Skipped rows:");
        for (i, error) in summary.errors.iter().enumerate() {
            if i < 10 {
                println!("  - row {}: {}", error.row_id, error.message);
            }
        }
        if summary.errors.len() > 10 {
            println!("  ... and {} more", summary.errors.len() - 10);
        }
        println!();
        println!("⚠️  Run completed with skipped rows");
    } else {
        println!("✅ Run completed successfully!");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn parse(args: &[&str]) -> RunArgs {
        let mut argv = vec!["scrubber", "run"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Commands::Run(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_run_args_defaults() {
        let args = parse(&[]);
        assert!(args.profile.is_none());
        assert!(args.language.is_none());
        assert!(!args.detect_language);
        assert!(!args.json);
    }

    #[test]
    fn test_overrides_applied() {
        let args = parse(&[
            "--profile",
            "spanish",
            "--database",
            "other.db",
            "--on-error",
            "skip",
            "--truncate",
        ]);
        let mut config = ScrubberConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.job.profile, JobProfile::Spanish);
        assert_eq!(config.source.database, Some(PathBuf::from("other.db")));
        assert_eq!(config.job.on_error, ErrorPolicy::Skip);
        assert_eq!(config.output.mode, Some(OutputMode::Truncate));
    }

    #[test]
    fn test_language_override_disables_detection() {
        let args = parse(&["--language", "fr"]);
        let mut config = ScrubberConfig::default();
        args.apply_overrides(&mut config);

        let settings = JobSettings::resolve(&config).unwrap();
        assert!(!settings.detect_language);
        assert_eq!(settings.language.as_str(), "fr");
    }

    #[test]
    fn test_language_conflicts_with_detection() {
        let result = Cli::try_parse_from(["scrubber", "run", "--language", "fr", "--detect-language"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let result = Cli::try_parse_from(["scrubber", "run", "--profile", "klingon"]);
        assert!(result.is_err());
    }
}
