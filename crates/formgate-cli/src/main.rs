//! Formgate CLI - validate form files and drive signup and login
//!
//! This is the main entry point for the Formgate CLI application, providing
//! commands for validating forms, submitting them to the backend and
//! managing the stored session.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Load configuration before logging so its [logging] table applies
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(e, cli.use_color()),
    };

    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli, config).await {
        Ok(()) => process::exit(0),
        Err(e) => exit_with(e, control::SHOULD_COLORIZE.should_colorize()),
    }
}

fn exit_with(e: error::Error, use_color: bool) -> ! {
    eprintln!("{}", error::format_error(&e, use_color));

    if e.should_show_help() {
        eprintln!("\nFor more information, try '--help'");
    }

    process::exit(e.exit_code());
}

/// Main application logic
#[instrument(skip_all, fields(request_id = logging::current_request_id().unwrap_or("-")))]
async fn run(cli: Cli, config: Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let mut output = OutputWriter::new(
        cli.output,
        cli.use_color() && config.output.color,
        cli.quiet,
        config.output.progress,
    );

    tracing::info!(verbosity = cli.verbosity_level(), "Executing command");

    // Handle the subcommand
    match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, &config, &mut output).await,
        Commands::Signup(args) => handlers::handle_signup(args, &config, &mut output).await,
        Commands::Login(args) => handlers::handle_login(args, &config, &mut output).await,
        Commands::Users(args) => handlers::handle_users(args, &config, &mut output).await,
        Commands::Session(args) => handlers::handle_session(args, &config, &mut output).await,
        Commands::Config(args) => handlers::handle_config(args, &config, &mut output).await,
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    let mut problems = Vec::new();
    if let Err(e) = logging_config.apply_settings(&config.logging, cli.verbosity_level()) {
        problems.push(e);
    }

    // Apply environment overrides
    if let Err(e) = logging_config.merge_with_env() {
        problems.push(e);
    }

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
    }

    logging::init_logging(logging_config)?;

    // Reported only now that a subscriber is installed
    for problem in problems {
        tracing::warn!("{}", problem);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["formgate", "-vv", "validate", "login", "bob.json"]);
        assert_eq!(cli.verbosity_level(), 2);
        assert!(matches!(cli.command, Commands::Validate(_)));

        let cli = Cli::parse_from(["formgate", "--quiet", "session", "show"]);
        assert_eq!(cli.verbosity_level(), 0);
        assert!(matches!(cli.command, Commands::Session(_)));
    }

    #[test]
    fn test_login_file_conflicts_with_flags() {
        let result = Cli::try_parse_from([
            "formgate", "login", "--name", "Bob", "--file", "bob.json",
        ]);
        assert!(result.is_err());
    }
}
