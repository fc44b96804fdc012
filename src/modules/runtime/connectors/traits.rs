//! Document database client trait

use async_trait::async_trait;
use moorage_core::MoorageError;
use std::time::Duration;

/// Settings applied when a client is constructed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSettings {
    /// Server selection and connect timeout; `None` keeps the driver default
    pub timeout: Option<Duration>,

    /// Application name reported to the server
    pub app_name: Option<String>,
}

/// Client for a document database
///
/// The connector only configures and wraps a client: pooling, the wire
/// protocol and authentication all live behind this trait. Implementations
/// must be safe to share between tasks.
#[async_trait]
pub trait DocumentClient: Send + Sync + Sized + 'static {
    /// Handle to a collection, cheap to clone
    type Collection: Clone + Send + Sync + 'static;

    /// Build a client from a connection string
    ///
    /// Success does not mean the server is reachable, only that the client
    /// object exists. Reachability is established by [`DocumentClient::ping`].
    async fn connect(uri: &str, settings: &ClientSettings) -> Result<Self, MoorageError>;

    /// Resolve a collection within a database
    ///
    /// Collections are created implicitly by the server on first write, so
    /// this never fails.
    fn collection(&self, database: &str, name: &str) -> Self::Collection;

    /// Round-trip liveness probe
    async fn ping(&self) -> Result<(), MoorageError>;

    /// Release every resource held by the client
    async fn shutdown(&self) -> Result<(), MoorageError>;

    /// Get the client type name
    fn client_type(&self) -> &'static str;
}
