//! YAML configuration parser

use moorage_core::{Conf, Connection, Model, MoorageError};
use moorage_types::OptionsValidation;
use serde::Deserialize;
use std::collections::HashMap;

use crate::env::EnvSubstitutor;

/// YAML parser for Moorage configuration files
pub struct YamlParser;

/// Multi-connection schema: a map of connection name to configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConnectionsFile {
    connections: HashMap<String, Conf>,

    #[serde(default)]
    validation: OptionsValidation,

    #[serde(default)]
    app_name: Option<String>,
}

impl YamlParser {
    /// Parse a YAML string into a Model
    pub fn parse(content: &str) -> Result<Model, MoorageError> {
        // First, substitute environment variables in the YAML content
        let substituted = EnvSubstitutor::new().substitute(content)?;
        Self::parse_raw(&substituted)
    }

    /// Parse a YAML string without environment variable substitution
    pub fn parse_raw(content: &str) -> Result<Model, MoorageError> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| MoorageError::Config(format!("YAML parse error: {}", e)))?;

        if value.get("connections").is_some() {
            let file: ConnectionsFile = serde_yaml::from_value(value).map_err(|e| {
                MoorageError::Config(format!("Invalid 'connections' section: {}", e))
            })?;
            return Ok(file_to_model(file));
        }

        // Fallback to a bare single-connection record.
        let conf: Conf = serde_yaml::from_value(value)
            .map_err(|e| MoorageError::Config(format!("YAML parse error: {}", e)))?;
        Ok(Model::single(conf))
    }
}

fn file_to_model(file: ConnectionsFile) -> Model {
    let mut connections: Vec<Connection> = file
        .connections
        .into_iter()
        .map(|(name, conf)| Connection::new(name, conf))
        .collect();
    connections.sort_by(|a, b| a.name.cmp(&b.name));

    Model {
        connections,
        validation: file.validation,
        app_name: file.app_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moorage_core::DEFAULT_CONNECTION;

    #[test]
    fn test_parse_single_connection() {
        let yaml = r#"
db: mongo
addr: localhost
port: 49998
username: user
password: pass
auth_source: admin
timeout: 10
"#;
        let model = YamlParser::parse(yaml).unwrap();
        assert_eq!(model.connections.len(), 1);

        let conn = &model.connections[0];
        assert_eq!(conn.name, DEFAULT_CONNECTION);
        assert_eq!(conn.conf.host, "localhost");
        assert_eq!(conn.conf.port, 49998);
        assert_eq!(model.validation, OptionsValidation::Eager);
    }

    #[test]
    fn test_parse_connections_map() {
        let yaml = r#"
validation: deferred
app_name: billing
connections:
  primary:
    db: billing
    host: cluster0.example.net
    username: svc
    password: pass
    auth_source: admin
    timeout: 5
    options:
      readPreference: secondaryPreferred
  local:
    db: billing
    host: localhost
    port: 27017
    username: svc
    password: pass
    auth_source: admin
    timeout: 2
"#;
        let model = YamlParser::parse(yaml).unwrap();
        assert_eq!(model.names(), vec!["local", "primary"]);
        assert_eq!(model.validation, OptionsValidation::Deferred);
        assert_eq!(model.app_name.as_deref(), Some("billing"));

        let primary = model.find_connection("primary").unwrap();
        assert_eq!(primary.conf.port, 0);
        assert_eq!(
            primary.conf.options.get("readPreference").map(String::as_str),
            Some("secondaryPreferred")
        );
    }

    #[test]
    fn test_parse_substitutes_env() {
        std::env::set_var("MOORAGE_TEST_YAML_PASSWORD", "from-env");
        let yaml = r#"
db: mongo
host: localhost
username: user
password: "{{ env.MOORAGE_TEST_YAML_PASSWORD }}"
auth_source: admin
timeout: 10
"#;
        let model = YamlParser::parse(yaml).unwrap();
        assert_eq!(model.connections[0].conf.password, "from-env");
        std::env::remove_var("MOORAGE_TEST_YAML_PASSWORD");
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = YamlParser::parse_raw("db: [unclosed");
        assert!(matches!(result, Err(MoorageError::Config(_))));
    }

    #[test]
    fn test_parse_connections_map_reports_entry_error() {
        let yaml = r#"
connections:
  main:
    db: mongo
"#;
        let err = YamlParser::parse_raw(yaml).unwrap_err();
        assert!(err.to_string().contains("connections"));
    }

    #[test]
    fn test_parse_missing_fields() {
        let result = YamlParser::parse_raw("db: mongo\nhost: localhost\n");
        assert!(matches!(result, Err(MoorageError::Config(_))));
    }
}
