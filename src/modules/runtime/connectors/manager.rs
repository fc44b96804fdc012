//! Connector manager for named connections

use moorage_core::{Model, MoorageError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::connector::{ConnectOptions, Connector};
use super::mongodb::MongoClient;
use super::traits::DocumentClient;

/// Upper bound on concurrent pings in [`ConnectorManager::health_check_all`]
const HEALTH_CHECK_CONCURRENCY: usize = 16;

/// Manages the connectors of a configuration model
pub struct ConnectorManager<C: DocumentClient = MongoClient> {
    connectors: RwLock<HashMap<String, Arc<Connector<C>>>>,
}

impl<C: DocumentClient> ConnectorManager<C> {
    /// Create a new empty connector manager
    pub fn new() -> Self {
        Self {
            connectors: RwLock::new(HashMap::new()),
        }
    }

    /// Connect every connection of the model
    ///
    /// Connectors are built in parallel. If any fails, the ones that were
    /// built are disconnected and none are registered. A connector already
    /// registered under the same name is disconnected and replaced.
    pub async fn initialize(&self, model: &Model) -> Result<(), MoorageError> {
        use tokio::task::JoinSet;

        let options = ConnectOptions {
            validation: model.validation,
            app_name: model.app_name.clone(),
        };

        let mut set = JoinSet::new();
        for connection in model.connections.iter().cloned() {
            let options = options.clone();
            set.spawn(async move {
                let connector = Connector::<C>::connect_with(&connection.conf, &options)
                    .await
                    .map_err(|e| with_connection_name(&connection.name, e))?;
                Ok::<_, MoorageError>((connection.name, connector))
            });
        }

        // Drain every task so no built connector is dropped while still connected
        let mut built = Vec::with_capacity(model.connections.len());
        let mut failure = None;
        while let Some(result) = set.join_next().await {
            let outcome = result
                .map_err(|e| MoorageError::Internal(format!("Task join error: {}", e)))
                .and_then(|r| r);
            match outcome {
                Ok((name, connector)) => built.push((name, Arc::new(connector))),
                Err(e) => {
                    failure.get_or_insert(e);
                }
            }
        }

        if let Some(err) = failure {
            disconnect_each(built).await;
            return Err(err);
        }

        let mut replaced = Vec::new();
        {
            let mut connectors = self.connectors.write().await;
            for (name, connector) in built {
                info!(
                    connection = %name,
                    client = connector.client().client_type(),
                    database = %connector.database(),
                    "Connector ready"
                );
                if let Some(old) = connectors.insert(name.clone(), connector) {
                    replaced.push((name, old));
                }
            }
        }
        disconnect_each(replaced).await;

        Ok(())
    }

    /// Get a connector by connection name
    pub async fn get(&self, name: &str) -> Result<Arc<Connector<C>>, MoorageError> {
        let connectors = self.connectors.read().await;
        connectors
            .get(name)
            .cloned()
            .ok_or_else(|| MoorageError::ConnectorNotFound(name.to_string()))
    }

    /// Check if a connector exists
    pub async fn has(&self, name: &str) -> bool {
        let connectors = self.connectors.read().await;
        connectors.contains_key(name)
    }

    /// Get the names of all registered connectors, sorted
    pub async fn names(&self) -> Vec<String> {
        let connectors = self.connectors.read().await;
        let mut names: Vec<String> = connectors.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check connectivity of all connectors in parallel
    pub async fn health_check_all(&self) -> HashMap<String, Result<(), String>> {
        use futures::stream::{self, StreamExt};

        let connectors = self.connectors.read().await;
        let connector_list: Vec<_> = connectors
            .iter()
            .map(|(name, connector)| (name.clone(), connector.clone()))
            .collect();
        drop(connectors); // Release read lock before network I/O

        stream::iter(connector_list)
            .map(|(name, connector)| async move {
                let result = connector.check_connectivity().await.map_err(|e| {
                    warn!(connection = %name, error = %e, "Connectivity check failed");
                    e.to_string()
                });
                (name, result)
            })
            .buffer_unordered(HEALTH_CHECK_CONCURRENCY)
            .collect()
            .await
    }

    /// Disconnect and unregister every connector
    pub async fn close_all(&self) -> Result<(), MoorageError> {
        let drained: Vec<_> = self.connectors.write().await.drain().collect();
        let mut errors = Vec::new();

        for (name, connector) in drained {
            match connector.disconnect().await {
                Ok(()) => info!(connection = %name, "Connector closed"),
                Err(e) => errors.push(format!("{}: {}", name, e)),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(MoorageError::Internal(format!(
                "Errors closing connectors: {}",
                errors.join(", ")
            )))
        }
    }
}

impl<C: DocumentClient> Default for ConnectorManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Disconnect connectors that are being discarded, logging failures
async fn disconnect_each<C: DocumentClient>(connectors: Vec<(String, Arc<Connector<C>>)>) {
    for (name, connector) in connectors {
        if let Err(e) = connector.disconnect().await {
            warn!(connection = %name, error = %e, "Failed to disconnect discarded connector");
        }
    }
}

/// Prefix the connection name onto the error message, keeping its kind
fn with_connection_name(name: &str, err: MoorageError) -> MoorageError {
    let label = |msg: String| format!("connection '{}': {}", name, msg);
    match err {
        MoorageError::InvalidOptions(msg) => MoorageError::InvalidOptions(label(msg)),
        MoorageError::Uri(msg) => MoorageError::Uri(label(msg)),
        MoorageError::Construction(msg) => MoorageError::Construction(label(msg)),
        MoorageError::Connectivity(msg) => MoorageError::Connectivity(label(msg)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::mock::{was_shut_down, MockClient};
    use moorage_core::{Conf, Connection};
    use moorage_types::OptionsValidation;

    fn connection(name: &str, host: &str) -> Connection {
        Connection::new(
            name,
            Conf::new("mongo", host, "user", "pass", "admin", 1).with_port(27017),
        )
    }

    fn model(connections: Vec<Connection>) -> Model {
        Model {
            connections,
            ..Model::default()
        }
    }

    #[tokio::test]
    async fn test_empty_manager() {
        let manager = ConnectorManager::<MockClient>::new();
        assert!(manager.names().await.is_empty());
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let manager = ConnectorManager::<MockClient>::new();
        let result = manager.get("nonexistent").await;
        assert!(matches!(result, Err(MoorageError::ConnectorNotFound(_))));
    }

    #[tokio::test]
    async fn test_initialize_registers_connectors() {
        let manager = ConnectorManager::<MockClient>::new();
        manager
            .initialize(&model(vec![
                connection("primary", "localhost"),
                connection("analytics", "analytics.local"),
            ]))
            .await
            .unwrap();

        assert_eq!(manager.names().await, vec!["analytics", "primary"]);
        assert!(manager.has("primary").await);

        let connector = manager.get("analytics").await.unwrap();
        assert!(connector.client().uri().contains("@analytics.local:27017/"));
    }

    #[tokio::test]
    async fn test_initialize_applies_model_options() {
        let manager = ConnectorManager::<MockClient>::new();
        let mut m = model(vec![connection("primary", "localhost::::::")]);
        m.validation = OptionsValidation::Deferred;
        m.app_name = Some("billing".to_string());

        let err = manager.initialize(&m).await.unwrap_err();
        assert!(matches!(err, MoorageError::Uri(_)));
        assert!(err.to_string().contains("primary"));
        assert!(manager.names().await.is_empty());

        m.connections = vec![connection("primary", "localhost")];
        manager.initialize(&m).await.unwrap();
        let connector = manager.get("primary").await.unwrap();
        assert_eq!(connector.client().settings().app_name.as_deref(), Some("billing"));
    }

    #[tokio::test]
    async fn test_health_check_all() {
        let manager = ConnectorManager::<MockClient>::new();
        manager
            .initialize(&model(vec![
                connection("up", "localhost"),
                connection("down", "unreachable.local"),
            ]))
            .await
            .unwrap();

        let results = manager.health_check_all().await;
        assert_eq!(results.len(), 2);
        assert!(results["up"].is_ok());
        assert!(results["down"].is_err());
    }

    #[tokio::test]
    async fn test_initialize_deferred_file_reaches_client() {
        let model = moorage_parser::parse_string(
            r#"
validation: deferred
connections:
  main:
    db: mongo
    host: "localhost::::::"
    port: 27017
    username: user
    password: pass
    auth_source: admin
    timeout: 5
"#,
        )
        .unwrap();

        let manager = ConnectorManager::<MockClient>::new();
        let err = manager.initialize(&model).await.unwrap_err();
        assert!(matches!(err, MoorageError::Uri(_)));
    }

    #[tokio::test]
    async fn test_initialize_replaces_and_disconnects() {
        let manager = ConnectorManager::<MockClient>::new();
        let m = model(vec![connection("main", "localhost")]);

        manager.initialize(&m).await.unwrap();
        let first = manager.get("main").await.unwrap();

        manager.initialize(&m).await.unwrap();
        let second = manager.get("main").await.unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.client().shutdowns(), 1);
        assert_eq!(second.client().shutdowns(), 0);
    }

    #[tokio::test]
    async fn test_failed_initialize_disconnects_built_connectors() {
        let manager = ConnectorManager::<MockClient>::new();
        let mut m = model(vec![
            connection("good", "partial-init-good.local"),
            connection("bad", "localhost::::::"),
        ]);
        m.validation = OptionsValidation::Deferred;

        assert!(manager.initialize(&m).await.is_err());
        assert!(manager.names().await.is_empty());
        assert!(was_shut_down("partial-init-good.local"));
    }

    #[tokio::test]
    async fn test_close_all() {
        let manager = ConnectorManager::<MockClient>::new();
        manager
            .initialize(&model(vec![connection("main", "localhost")]))
            .await
            .unwrap();
        let connector = manager.get("main").await.unwrap();

        manager.close_all().await.unwrap();
        assert!(manager.names().await.is_empty());
        assert_eq!(connector.client().shutdowns(), 1);
    }
}
