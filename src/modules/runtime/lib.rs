//! Connector runtime for Moorage
//!
//! This crate builds clients from configuration, validates connectivity and
//! caches collection handles.

pub mod connectors;

pub use connectors::{
    ClientSettings, ConnectOptions, Connector, ConnectorManager, DocumentClient, MongoClient,
    MongoConnector,
};
