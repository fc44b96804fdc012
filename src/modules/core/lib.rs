//! Core domain logic for Moorage
//!
//! This crate contains the connection configuration model, the connection
//! string builder, and the error types shared by the other Moorage crates.

pub mod domain;
pub mod error;
pub mod uri;

pub use domain::*;
pub use error::{MoorageError, Result};
pub use uri::{build_options, build_uri, redacted_uri};
