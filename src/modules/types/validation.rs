//! Client options validation policy

use serde::{Deserialize, Serialize};
use std::fmt;

/// When client options are checked relative to driver construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionsValidation {
    /// Check the configuration before the driver sees it and fail with a
    /// dedicated invalid-options error
    #[default]
    Eager,
    /// Hand the configuration straight to the driver and let it reject
    /// malformed input while parsing the connection string
    Deferred,
}

impl OptionsValidation {
    /// Returns true if options are checked before client construction
    pub fn is_eager(&self) -> bool {
        matches!(self, OptionsValidation::Eager)
    }
}

impl fmt::Display for OptionsValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsValidation::Eager => write!(f, "eager"),
            OptionsValidation::Deferred => write!(f, "deferred"),
        }
    }
}
