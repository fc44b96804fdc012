//! Connector: one client, one database, cached collection handles

use moorage_core::{Conf, MoorageError};
use moorage_parser::ConfigValidator;
use moorage_types::OptionsValidation;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

use super::mongodb::MongoClient;
use super::traits::{ClientSettings, DocumentClient};

/// Options for [`Connector::connect_with`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectOptions {
    /// Whether the configuration is checked before the driver sees it
    pub validation: OptionsValidation,

    /// Application name reported to the server
    pub app_name: Option<String>,
}

/// Connection to a single database
///
/// Holds the client, the target database name and a cache of collection
/// handles. The connection is attempted when the connector is built; use
/// [`Connector::check_connectivity`] to confirm the server answers, and
/// [`Connector::disconnect`] to release the client.
pub struct Connector<C: DocumentClient = MongoClient> {
    client: C,
    database: String,
    timeout: Option<Duration>,
    collections: RwLock<HashMap<String, C::Collection>>,
}

/// Connector over the MongoDB driver
pub type MongoConnector = Connector<MongoClient>;

impl<C: DocumentClient> Connector<C> {
    /// Build a connector with default options (eager validation)
    pub async fn connect(conf: &Conf) -> Result<Self, MoorageError> {
        Self::connect_with(conf, &ConnectOptions::default()).await
    }

    /// Build a connector: URI, optional validation, then client construction
    pub async fn connect_with(conf: &Conf, options: &ConnectOptions) -> Result<Self, MoorageError> {
        if options.validation.is_eager() {
            ConfigValidator::new().validate_conf(conf)?;
        }

        let uri = conf.uri();
        let settings = ClientSettings {
            timeout: conf.timeout_duration(),
            app_name: options.app_name.clone(),
        };

        debug!(
            uri = %conf.redacted_uri(),
            validation = %options.validation,
            "Creating client"
        );
        let client = C::connect(&uri, &settings).await?;

        Ok(Self {
            client,
            database: conf.db.clone(),
            timeout: settings.timeout,
            collections: RwLock::new(HashMap::new()),
        })
    }

    /// Wrap an existing client; the collection cache starts empty
    pub fn from_client(client: C, database: impl Into<String>) -> Self {
        Self {
            client,
            database: database.into(),
            timeout: None,
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Target database name
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Timeout applied to the connectivity check, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Underlying client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Get a handle to a collection of the target database
    ///
    /// The first lookup for a name resolves it through the client and caches
    /// the handle; later lookups return the cached handle.
    pub async fn collection(&self, name: &str) -> C::Collection {
        if let Some(collection) = self.collections.read().await.get(name) {
            return collection.clone();
        }

        let mut collections = self.collections.write().await;
        // Another task may have resolved it while we waited for the write lock
        collections
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!(database = %self.database, collection = name, "Resolving collection");
                self.client.collection(&self.database, name)
            })
            .clone()
    }

    /// Number of cached collection handles
    pub async fn cached_collections(&self) -> usize {
        self.collections.read().await.len()
    }

    /// Ping the server, bounded by the connector timeout
    pub async fn check_connectivity(&self) -> Result<(), MoorageError> {
        let probe = self.client.ping();
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, probe).await.map_err(|_| {
                MoorageError::Connectivity(format!(
                    "ping did not complete within {}s",
                    timeout.as_secs_f64()
                ))
            })?,
            None => probe.await,
        }
    }

    /// Shut the client down and drop cached handles
    pub async fn disconnect(&self) -> Result<(), MoorageError> {
        self.collections.write().await.clear();
        self.client.shutdown().await
    }
}

impl<C: DocumentClient + Default> Default for Connector<C> {
    fn default() -> Self {
        Self::from_client(C::default(), String::new())
    }
}
