//! Moorage CLI
//!
//! This crate provides the command-line interface for Moorage:
//! - ping: connect and check connectivity
//! - uri: print the built connection strings
//! - validate: check the configuration

pub mod commands;

pub use commands::{render_error, Cli, Commands, LogFormat};
