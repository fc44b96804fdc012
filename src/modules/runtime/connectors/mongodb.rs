//! MongoDB client implementation

use async_trait::async_trait;
use bson::Document;
use moorage_core::MoorageError;
use mongodb::error::{Error as DriverError, ErrorKind};
use mongodb::{options::ClientOptions, Client, Collection};

use super::traits::{ClientSettings, DocumentClient};

/// Database the ping command is sent to
const PING_DATABASE: &str = "admin";

/// [`DocumentClient`] backed by the official MongoDB driver
#[derive(Clone, Debug)]
pub struct MongoClient {
    client: Client,
}

/// Classify a connection string parse failure
///
/// Seedlist lookups happen while parsing, so a DNS failure means the
/// seedlist host could not be reached rather than a malformed string.
fn parse_error(err: DriverError) -> MoorageError {
    match err.kind.as_ref() {
        ErrorKind::DnsResolve { .. } => {
            MoorageError::Connectivity(format!("MongoDB seedlist lookup failed: {}", err))
        }
        _ => MoorageError::Uri(format!("MongoDB options parse failed: {}", err)),
    }
}

#[async_trait]
impl DocumentClient for MongoClient {
    type Collection = Collection<Document>;

    async fn connect(uri: &str, settings: &ClientSettings) -> Result<Self, MoorageError> {
        // Seedlist URIs are resolved through DNS here
        let mut options = ClientOptions::parse(uri).await.map_err(parse_error)?;

        if let Some(timeout) = settings.timeout {
            options.server_selection_timeout = Some(timeout);
            options.connect_timeout = Some(timeout);
        }
        if settings.app_name.is_some() {
            options.app_name = settings.app_name.clone();
        }

        let client = Client::with_options(options).map_err(|e| {
            MoorageError::Construction(format!("MongoDB client creation failed: {}", e))
        })?;

        Ok(Self { client })
    }

    fn collection(&self, database: &str, name: &str) -> Collection<Document> {
        self.client.database(database).collection::<Document>(name)
    }

    async fn ping(&self) -> Result<(), MoorageError> {
        self.client
            .database(PING_DATABASE)
            .run_command(bson::doc! { "ping": 1 }, None)
            .await
            .map_err(|e| MoorageError::Connectivity(format!("fail to ping mongo: {}", e)))?;
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), MoorageError> {
        self.client.clone().shutdown().await;
        Ok(())
    }

    fn client_type(&self) -> &'static str {
        "mongodb"
    }
}
