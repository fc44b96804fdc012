//! Connection configuration record

use moorage_types::UriScheme;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::uri;

/// Everything needed to open one MongoDB connection
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conf {
    /// Target database name
    pub db: String,

    /// Server host or seedlist address
    #[serde(alias = "addr")]
    pub host: String,

    /// Server port; 0 selects the seedlist scheme
    #[serde(default)]
    pub port: u16,

    pub username: String,

    pub password: String,

    /// Database the credentials are verified against
    pub auth_source: String,

    /// Server selection, connect and ping timeout in seconds
    pub timeout: u64,

    /// Extra connection string query parameters
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub options: HashMap<String, String>,
}

impl Conf {
    /// Create a configuration for the seedlist scheme with no extra options
    pub fn new(
        db: impl Into<String>,
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        auth_source: impl Into<String>,
        timeout: u64,
    ) -> Self {
        Self {
            db: db.into(),
            host: host.into(),
            port: 0,
            username: username.into(),
            password: password.into(),
            auth_source: auth_source.into(),
            timeout,
            options: HashMap::new(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Scheme implied by the port
    pub fn scheme(&self) -> UriScheme {
        UriScheme::for_port(self.port)
    }

    /// Configured timeout, or `None` when it is 0 and the driver default applies
    pub fn timeout_duration(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }

    /// Connection string for this configuration
    pub fn uri(&self) -> String {
        uri::build_uri(self)
    }

    /// Connection string with the password masked
    pub fn redacted_uri(&self) -> String {
        uri::redacted_uri(self)
    }
}

impl fmt::Debug for Conf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Conf")
            .field("db", &self.db)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"****")
            .field("auth_source", &self.auth_source)
            .field("timeout", &self.timeout)
            .field("options", &self.options)
            .finish()
    }
}
