//! Database connectors for Moorage
//!
//! A [`Connector`] wraps one [`DocumentClient`] (MongoDB by default) and
//! caches collection handles; [`ConnectorManager`] keeps several of them by
//! name.

mod connector;
mod manager;
#[cfg(test)]
mod mock;
mod mongodb;
mod traits;

pub use connector::{ConnectOptions, Connector, MongoConnector};
pub use manager::ConnectorManager;
pub use mongodb::MongoClient;
pub use traits::{ClientSettings, DocumentClient};
