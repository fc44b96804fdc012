//! Type definitions for Moorage
//!
//! Shared enums used across the Moorage crates: the connection string scheme
//! and the client options validation policy.

pub mod scheme;
pub mod validation;

pub use scheme::UriScheme;
pub use validation::OptionsValidation;
