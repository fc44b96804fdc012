//! Configuration parsing for Moorage
//!
//! This crate handles parsing of YAML configuration files, environment
//! variable substitution, environment-sourced configuration and validation.

pub mod env;
pub mod validator;
pub mod yaml;

pub use env::{conf_from_env, EnvSubstitutor, DEFAULT_ENV_PREFIX};
pub use validator::ConfigValidator;
pub use yaml::YamlParser;

use moorage_core::{Model, MoorageError};

/// Parse a configuration file from a path
pub fn parse_file(path: &str) -> Result<Model, MoorageError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| MoorageError::Config(format!("Failed to read file '{}': {}", path, e)))?;

    parse_string(&content)
}

/// Parse a configuration from a string
pub fn parse_string(content: &str) -> Result<Model, MoorageError> {
    let model = YamlParser::parse(content)?;

    let validator = ConfigValidator::new();
    validator.validate(&model)?;

    Ok(model)
}

/// Build a single-connection model from `{prefix}_*` environment variables
pub fn parse_env(prefix: &str) -> Result<Model, MoorageError> {
    let model = Model::single(conf_from_env(prefix)?);
    ConfigValidator::new().validate(&model)?;
    Ok(model)
}
