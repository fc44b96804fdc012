//! Connection string scheme definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheme used at the front of a MongoDB connection string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UriScheme {
    /// DNS seedlist discovery (`mongodb+srv://`), no explicit port
    Srv,
    /// Direct host and port (`mongodb://`)
    Direct,
}

impl UriScheme {
    /// Pick the scheme for a configured port, where 0 means "unset"
    pub fn for_port(port: u16) -> Self {
        if port == 0 {
            UriScheme::Srv
        } else {
            UriScheme::Direct
        }
    }

    /// URI prefix, without the `://` separator
    pub fn as_str(&self) -> &'static str {
        match self {
            UriScheme::Srv => "mongodb+srv",
            UriScheme::Direct => "mongodb",
        }
    }

    /// Returns true if the scheme carries an explicit port
    pub fn has_port(&self) -> bool {
        matches!(self, UriScheme::Direct)
    }
}

impl fmt::Display for UriScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_for_port() {
        assert_eq!(UriScheme::for_port(0), UriScheme::Srv);
        assert_eq!(UriScheme::for_port(27017), UriScheme::Direct);
        assert!(!UriScheme::Srv.has_port());
        assert!(UriScheme::Direct.has_port());
    }

    #[test]
    fn test_scheme_display() {
        assert_eq!(UriScheme::Srv.to_string(), "mongodb+srv");
        assert_eq!(UriScheme::Direct.to_string(), "mongodb");
    }
}
