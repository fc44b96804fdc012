//! Root configuration model

use moorage_types::OptionsValidation;
use serde::{Deserialize, Serialize};

use super::Conf;

/// Name given to a connection read from a single-connection source
pub const DEFAULT_CONNECTION: &str = "default";

/// A named connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Unique name used to look the connection up
    pub name: String,

    #[serde(flatten)]
    pub conf: Conf,
}

impl Connection {
    pub fn new(name: impl Into<String>, conf: Conf) -> Self {
        Self {
            name: name.into(),
            conf,
        }
    }
}

/// Root configuration model that represents a Moorage configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Model {
    /// Connections, sorted by name once parsed
    #[serde(default)]
    pub connections: Vec<Connection>,

    /// When client options are validated
    #[serde(default)]
    pub validation: OptionsValidation,

    /// Application name reported to the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
}

impl Model {
    /// Model holding one connection named [`DEFAULT_CONNECTION`]
    pub fn single(conf: Conf) -> Self {
        Self {
            connections: vec![Connection::new(DEFAULT_CONNECTION, conf)],
            ..Self::default()
        }
    }

    /// Find a connection by name
    pub fn find_connection(&self, name: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.name == name)
    }

    /// Names of all connections, in model order
    pub fn names(&self) -> Vec<&str> {
        self.connections.iter().map(|c| c.name.as_str()).collect()
    }
}
