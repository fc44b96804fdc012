//! Ping command implementation

use clap::Args;
use moorage_core::{Model, MoorageError};
use moorage_runtime::{ConnectorManager, MongoClient};
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

use super::select_connections;

/// Ping command arguments
#[derive(Args, Debug)]
pub struct PingCommand {
    /// Only ping this connection
    #[arg(short, long)]
    pub name: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Outcome of pinging one connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PingReport {
    pub connection: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PingCommand {
    /// Execute the ping command
    pub async fn execute(&self, model: &Model) -> Result<(), MoorageError> {
        let model = select_connections(model, self.name.as_deref())?;
        info!(connections = ?model.names(), "Connecting");

        let manager = ConnectorManager::<MongoClient>::new();
        manager.initialize(&model).await?;
        let results = manager.health_check_all().await;
        manager.close_all().await?;

        let reports = Self::build_reports(results);
        if self.json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        } else {
            for report in &reports {
                match &report.error {
                    None => println!("{}: ok", report.connection),
                    Some(error) => println!("{}: FAILED ({})", report.connection, error),
                }
            }
        }

        let failed = reports.iter().filter(|r| !r.ok).count();
        if failed > 0 {
            return Err(MoorageError::Connectivity(format!(
                "{} of {} connections unreachable",
                failed,
                reports.len()
            )));
        }

        Ok(())
    }

    /// Turn health check results into reports sorted by connection name
    pub fn build_reports(results: HashMap<String, Result<(), String>>) -> Vec<PingReport> {
        let mut reports: Vec<PingReport> = results
            .into_iter()
            .map(|(connection, result)| PingReport {
                connection,
                ok: result.is_ok(),
                error: result.err(),
            })
            .collect();
        reports.sort_by(|a, b| a.connection.cmp(&b.connection));
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_reports_sorted() {
        let mut results = HashMap::new();
        results.insert("primary".to_string(), Ok(()));
        results.insert("analytics".to_string(), Err("timed out".to_string()));

        let reports = PingCommand::build_reports(results);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].connection, "analytics");
        assert!(!reports[0].ok);
        assert_eq!(reports[0].error.as_deref(), Some("timed out"));
        assert_eq!(reports[1].connection, "primary");
        assert!(reports[1].ok);
    }

    #[test]
    fn test_report_json_omits_missing_error() {
        let report = PingReport {
            connection: "primary".to_string(),
            ok: true,
            error: None,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"connection":"primary","ok":true}"#);
    }
}
