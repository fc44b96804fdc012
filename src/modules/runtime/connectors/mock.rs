//! In-memory client for connector tests

use async_trait::async_trait;
use moorage_core::MoorageError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::traits::{ClientSettings, DocumentClient};

/// URIs of every mock client shut down in this test process
static SHUTDOWN_LOG: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Returns true if a client whose URI contains `fragment` was shut down
pub fn was_shut_down(fragment: &str) -> bool {
    SHUTDOWN_LOG
        .lock()
        .unwrap()
        .iter()
        .any(|uri| uri.contains(fragment))
}

/// Collection resolved by [`MockClient`]
#[derive(Debug, PartialEq, Eq)]
pub struct ResolvedCollection {
    pub database: String,
    pub name: String,
}

pub type MockCollection = Arc<ResolvedCollection>;

/// Client whose behavior is chosen by the host in the URI
///
/// - a host containing `::` is rejected like a driver parse failure
/// - `unreachable` hosts fail the ping
/// - `hanging` hosts never answer the ping
#[derive(Debug, Default)]
pub struct MockClient {
    uri: String,
    settings: ClientSettings,
    resolutions: AtomicUsize,
    pings: AtomicUsize,
    shutdowns: AtomicUsize,
}

impl MockClient {
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::SeqCst)
    }

    pub fn pings(&self) -> usize {
        self.pings.load(Ordering::SeqCst)
    }

    pub fn shutdowns(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentClient for MockClient {
    type Collection = MockCollection;

    async fn connect(uri: &str, settings: &ClientSettings) -> Result<Self, MoorageError> {
        if uri.contains("::") {
            return Err(MoorageError::Uri(format!("invalid host in '{}'", uri)));
        }
        Ok(Self {
            uri: uri.to_string(),
            settings: settings.clone(),
            ..Self::default()
        })
    }

    fn collection(&self, database: &str, name: &str) -> MockCollection {
        self.resolutions.fetch_add(1, Ordering::SeqCst);
        Arc::new(ResolvedCollection {
            database: database.to_string(),
            name: name.to_string(),
        })
    }

    async fn ping(&self) -> Result<(), MoorageError> {
        self.pings.fetch_add(1, Ordering::SeqCst);
        if self.uri.contains("hanging") {
            std::future::pending::<()>().await;
        }
        if self.uri.contains("unreachable") {
            return Err(MoorageError::Connectivity(
                "server selection timeout".to_string(),
            ));
        }
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), MoorageError> {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        SHUTDOWN_LOG.lock().unwrap().push(self.uri.clone());
        Ok(())
    }

    fn client_type(&self) -> &'static str {
        "mock"
    }
}
