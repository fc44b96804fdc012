//! CLI commands

mod ping;
mod uri;
mod validate;

pub use ping::{PingCommand, PingReport};
pub use uri::UriCommand;
pub use validate::ValidateCommand;

use clap::{Parser, Subcommand, ValueEnum};
use moorage_core::{Model, MoorageError};
use moorage_parser::{parse_env, parse_file, DEFAULT_ENV_PREFIX};

/// Moorage - MongoDB connection management
#[derive(Parser, Debug)]
#[command(name = "moorage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short = 'f', long = "file", global = true, default_value = "moorage.yaml")]
    pub config: String,

    /// Read a single connection from `{PREFIX}_*` environment variables
    /// instead of the configuration file (`MONGO_DB` when no prefix is given)
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = DEFAULT_ENV_PREFIX
    )]
    pub env_prefix: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect and check that the server answers
    Ping(PingCommand),

    /// Print the connection strings built from the configuration
    Uri(UriCommand),

    /// Load and validate the configuration
    Validate(ValidateCommand),
}

impl Cli {
    /// Load the configuration model from the environment or the file
    pub fn load_model(&self) -> Result<Model, MoorageError> {
        match &self.env_prefix {
            Some(prefix) => parse_env(prefix),
            None => parse_file(&self.config),
        }
    }
}

/// Message printed for a failed command
///
/// The full error chain with `--verbose`, otherwise a message free of
/// connection strings and credentials.
pub fn render_error(err: &anyhow::Error, verbose: bool) -> String {
    if verbose {
        return format!("{:#}", err);
    }
    match err.downcast_ref::<MoorageError>() {
        Some(e) => e.sanitized_message(),
        None => err.to_string(),
    }
}

/// Narrow a model down to one connection when a name is given
pub(crate) fn select_connections(model: &Model, name: Option<&str>) -> Result<Model, MoorageError> {
    let Some(name) = name else {
        return Ok(model.clone());
    };

    let connection = model
        .find_connection(name)
        .ok_or_else(|| MoorageError::ConnectorNotFound(name.to_string()))?;

    Ok(Model {
        connections: vec![connection.clone()],
        ..model.clone()
    })
}
