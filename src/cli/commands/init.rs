//! Init command implementation
//!
//! Writes a sample configuration file filled with a profile's defaults.

use crate::cli::{EXIT_CONFIG, EXIT_FATAL, EXIT_SUCCESS};
use crate::config::JobProfile;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "scrubber.toml")]
    pub output: String,

    /// Profile whose defaults fill the file
    #[arg(short, long, default_value = "multilingual")]
    pub profile: JobProfile,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, profile = %self.profile, "Initializing configuration file");

        println!("📝 Initializing Scrubber configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, generate_config(self.profile)) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point [source].database at your sentences database");
                println!("  2. Validate configuration: scrubber validate-config");
                println!("  3. Run: scrubber run");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }
}

/// Sample configuration carrying the profile's values
pub fn generate_config(profile: JobProfile) -> String {
    let languages: String = profile
        .languages()
        .iter()
        .map(|(code, model)| format!("{code} = \"{model}\"\n"))
        .collect();
    let recognizers = profile
        .recognizers()
        .iter()
        .map(|r| format!("\"{r}\""))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"# Scrubber Configuration File
# Batch PII redaction for SQLite sentence tables

[application]
log_level = "info"

[job]
profile = "{profile}"
detect_language = {detect}
default_language = "{language}"
on_error = "abort"  # abort | skip

[source]
database = "{database}"
# database = "${{SCRUBBER_DATABASE}}"
query = "SELECT * FROM sentences;"
text_column = 1

[output]
path = "{output}"
mode = "{mode}"  # append | truncate

[languages]
{languages}
[analyzer]
recognizers = [{recognizers}]
score_threshold = 0.0
# models_dir = "models"
# pattern_library = "patterns.toml"

# Per-entity operators: replace (default), redact, mask, hash
# [anonymizer.operators.PHONE_NUMBER]
# type = "mask"
# masking_char = "*"
# chars_to_mask = 4
# from_end = true

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"  # daily | hourly | never
"#,
        profile = profile,
        detect = profile.detect_language(),
        language = profile.default_language(),
        database = profile.database().display(),
        output = profile.output().display(),
        mode = profile.output_mode(),
        languages = languages,
        recognizers = recognizers,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config_str, JobSettings};
    use tempfile::TempDir;
    use test_case::test_case;

    #[test_case(JobProfile::English)]
    #[test_case(JobProfile::Spanish)]
    #[test_case(JobProfile::Multilingual)]
    fn test_generated_config_round_trips(profile: JobProfile) {
        let config = load_config_str(&generate_config(profile)).unwrap();
        let settings = JobSettings::resolve(&config).unwrap();

        assert_eq!(settings.profile, profile);
        assert_eq!(settings.languages, profile.languages());
        assert_eq!(settings.output, profile.output());
        assert_eq!(settings.output_mode, profile.output_mode());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scrubber.toml");
        fs::write(&path, "# existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            profile: JobProfile::English,
            force: false,
        };
        assert_eq!(args.execute().unwrap(), EXIT_CONFIG);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# existing");

        let args = InitArgs { force: true, ..args };
        assert_eq!(args.execute().unwrap(), EXIT_SUCCESS);
        assert!(fs::read_to_string(&path).unwrap().contains("profile = \"english\""));
    }
}
