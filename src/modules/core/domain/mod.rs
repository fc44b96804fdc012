//! Domain models for Moorage configuration

mod conf;
mod model;

pub use conf::Conf;
pub use model::{Connection, Model, DEFAULT_CONNECTION};
