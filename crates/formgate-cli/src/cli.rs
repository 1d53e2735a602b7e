//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Formgate CLI - validate and submit signup/login forms
///
/// Checks form files against the signup and login schemas, submits them to
/// the account backend, and manages the local login session.
#[derive(Parser, Debug)]
#[command(
    name = "formgate",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "FORMGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a form file without submitting it
    Validate(ValidateArgs),

    /// Create an account from a signup form file
    Signup(SignupArgs),

    /// Log in and store the session
    Login(LoginArgs),

    /// List registered users
    Users(UsersArgs),

    /// Inspect or clear the stored session
    Session(SessionArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Which form a file holds
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormKind {
    Signup,
    Login,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Form to validate against
    #[arg(value_enum)]
    pub form: FormKind,

    /// Path to the form file (JSON or YAML)
    #[arg(value_name = "FORM_FILE")]
    pub file: PathBuf,

    /// Latest accepted birth year (defaults to the current year)
    #[arg(long, value_name = "YEAR")]
    pub current_year: Option<i64>,
}

/// Arguments for the signup command
#[derive(Parser, Debug)]
pub struct SignupArgs {
    /// Path to the signup form file (JSON or YAML)
    #[arg(value_name = "FORM_FILE")]
    pub file: PathBuf,

    /// Backend base URL override
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

/// Arguments for the login command
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Account name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Account password
    #[arg(short, long, env = "FORMGATE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Read the login form from a file instead (JSON or YAML)
    ///
    /// The file takes precedence over a password from the environment.
    #[arg(short, long, value_name = "FORM_FILE", conflicts_with = "name")]
    pub file: Option<PathBuf>,

    /// Backend base URL override
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

/// Arguments for the users command
#[derive(Parser, Debug)]
pub struct UsersArgs {
    /// Backend base URL override
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

/// Arguments for the session command
#[derive(Parser, Debug)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub action: SessionAction,
}

/// Session actions
#[derive(Subcommand, Debug)]
pub enum SessionAction {
    /// Show who is logged in
    Show,

    /// Log out by removing the stored session
    Clear,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a configuration file with default values
    Init(ConfigInitArgs),

    /// Show current configuration values
    Show(ConfigShowArgs),
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file (defaults to .formgate.toml)
    #[arg(long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Write to the user config directory instead
    #[arg(long, conflicts_with = "path")]
    pub user: bool,

    /// Force overwrite existing config files
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
