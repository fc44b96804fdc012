//! Configuration validation
//!
//! [`ConfigValidator::validate_conf`] is also what the connector runs before
//! handing a configuration to the driver when options are validated eagerly.

use moorage_core::{Conf, Model, MoorageError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Regex pattern for valid connection names (lower-kebab-case or lower_snake_case)
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9]*(?:[-_][a-z0-9]+)*$").unwrap()
});

/// Characters MongoDB refuses in database names
const DB_NAME_FORBIDDEN: &[char] = &['/', '\\', '.', ' ', '"', '$'];

/// Characters that would split the authority part of the URI
const HOST_FORBIDDEN: &[char] = &['/', '@', '?', '#'];

/// Characters that would split the query string
const OPTION_KEY_FORBIDDEN: &[char] = &['&', '=', '?', '#'];
const OPTION_VALUE_FORBIDDEN: &[char] = &['&', '#'];

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate the entire model configuration
    ///
    /// Connection options are only checked when the model validates them
    /// eagerly; with deferred validation the driver is the one to reject them.
    pub fn validate(&self, model: &Model) -> Result<(), MoorageError> {
        if model.connections.is_empty() {
            return Err(MoorageError::Validation(
                "At least one connection must be configured".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for connection in &model.connections {
            self.validate_name(&connection.name)?;

            if !names.insert(connection.name.as_str()) {
                return Err(MoorageError::Validation(format!(
                    "Duplicate connection name: '{}'",
                    connection.name
                )));
            }

            if !model.validation.is_eager() {
                continue;
            }

            self.validate_conf(&connection.conf).map_err(|e| match e {
                MoorageError::InvalidOptions(msg) => MoorageError::Validation(format!(
                    "Connection '{}': {}",
                    connection.name, msg
                )),
                other => other,
            })?;
        }

        Ok(())
    }

    /// Validate a single connection configuration
    pub fn validate_conf(&self, conf: &Conf) -> Result<(), MoorageError> {
        Self::validate_db_name(&conf.db)?;
        Self::validate_host(conf)?;
        Self::validate_options(conf)?;
        Ok(())
    }

    fn validate_name(&self, name: &str) -> Result<(), MoorageError> {
        if name.is_empty() {
            return Err(MoorageError::Validation(
                "Connection name cannot be empty".to_string(),
            ));
        }

        if !NAME_PATTERN.is_match(name) {
            return Err(MoorageError::Validation(format!(
                "Invalid connection name '{}': must be lower-kebab-case or lower_snake_case",
                name
            )));
        }

        Ok(())
    }

    fn validate_db_name(db: &str) -> Result<(), MoorageError> {
        if db.is_empty() {
            return Err(MoorageError::InvalidOptions(
                "Database name cannot be empty".to_string(),
            ));
        }

        if let Some(c) = db.chars().find(|c| DB_NAME_FORBIDDEN.contains(c)) {
            return Err(MoorageError::InvalidOptions(format!(
                "Database name '{}' contains forbidden character '{}'",
                db, c
            )));
        }

        Ok(())
    }

    fn validate_host(conf: &Conf) -> Result<(), MoorageError> {
        let host = conf.host.as_str();

        if host.is_empty() {
            return Err(MoorageError::InvalidOptions("Host cannot be empty".to_string()));
        }

        if host.contains("://") {
            return Err(MoorageError::InvalidOptions(format!(
                "Host '{}' must not include a scheme; it is derived from the port",
                host
            )));
        }

        if host.chars().any(char::is_whitespace) {
            return Err(MoorageError::InvalidOptions(format!(
                "Host '{}' contains whitespace",
                host
            )));
        }

        if let Some(c) = host.chars().find(|c| HOST_FORBIDDEN.contains(c)) {
            return Err(MoorageError::InvalidOptions(format!(
                "Host '{}' contains forbidden character '{}'",
                host, c
            )));
        }

        // Bracketed IPv6 literals are the only hosts allowed to carry colons
        let is_ipv6 = host.starts_with('[') && host.ends_with(']');
        if host.contains(':') && !is_ipv6 {
            return Err(MoorageError::InvalidOptions(format!(
                "Host '{}' must not contain ':'; set the port separately",
                host
            )));
        }

        Ok(())
    }

    fn validate_options(conf: &Conf) -> Result<(), MoorageError> {
        for (key, value) in &conf.options {
            if key.is_empty() {
                return Err(MoorageError::InvalidOptions(
                    "Option name cannot be empty".to_string(),
                ));
            }

            if key.chars().any(char::is_whitespace)
                || key.chars().any(|c| OPTION_KEY_FORBIDDEN.contains(&c))
            {
                return Err(MoorageError::InvalidOptions(format!(
                    "Option name '{}' contains a forbidden character",
                    key
                )));
            }

            if value.chars().any(char::is_whitespace)
                || value.chars().any(|c| OPTION_VALUE_FORBIDDEN.contains(&c))
            {
                return Err(MoorageError::InvalidOptions(format!(
                    "Value of option '{}' contains a forbidden character",
                    key
                )));
            }
        }

        Ok(())
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
