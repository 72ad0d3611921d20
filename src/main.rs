use scrubber::cli::{exit_code_for, Cli, Commands, EXIT_FATAL};
use scrubber::config::{LoggingConfig, ScrubberConfig};
use scrubber::domain::Result;
use scrubber::logging::init_logging;
use clap::Parser;
use std::process;

fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Init needs no configuration; every other command loads it up front so
    // its logging section can be honoured.
    let loaded: Option<Result<ScrubberConfig>> = match cli.command {
        Commands::Init(_) => None,
        _ => Some(cli.load_config()),
    };

    let (log_level, logging_config) = match loaded {
        Some(Ok(ref config)) => (
            cli.log_level
                .clone()
                .unwrap_or_else(|| config.application.log_level.clone()),
            config.logging.clone(),
        ),
        _ => (
            cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
            LoggingConfig::console(),
        ),
    };

    let _guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(exit_code_for(&e));
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Scrubber - batch PII redaction"
    );

    let exit_code = match execute_command(&cli, loaded) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // Flush the file logger before exiting
    drop(_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
fn execute_command(cli: &Cli, loaded: Option<Result<ScrubberConfig>>) -> anyhow::Result<i32> {
    let config = match (&cli.command, loaded) {
        (Commands::Init(args), _) => return args.execute(),
        (_, Some(Ok(config))) => config,
        (_, Some(Err(e))) => {
            tracing::error!(error = %e, "Failed to load configuration");
            println!("❌ Failed to load configuration: {}", cli.config_source());
            println!("   Error: {e}");
            return Ok(exit_code_for(&e));
        }
        (_, None) => ScrubberConfig::default(),
    };

    match &cli.command {
        Commands::Run(args) => args.execute(config),
        Commands::Redact(args) => args.execute(config),
        Commands::ValidateConfig(args) => args.execute(&config, &cli.config_source()),
        Commands::Init(args) => args.execute(),
    }
}
