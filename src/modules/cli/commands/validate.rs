//! Validate command implementation

use clap::Args;
use moorage_core::{Model, MoorageError};
use moorage_parser::ConfigValidator;

/// Validate command arguments
#[derive(Args, Debug)]
pub struct ValidateCommand {}

impl ValidateCommand {
    /// Execute the validate command
    pub async fn execute(&self, model: &Model) -> Result<(), MoorageError> {
        // Loading already validated; repeated so the command stands on its own
        ConfigValidator::new().validate(model)?;

        for line in Self::summary(model) {
            println!("{}", line);
        }
        Ok(())
    }

    fn summary(model: &Model) -> Vec<String> {
        let mut lines = vec![format!(
            "{} connection(s), {} options validation",
            model.connections.len(),
            model.validation
        )];
        lines.extend(model.connections.iter().map(|c| {
            format!(
                "  {}: {} {} db={} timeout={}s",
                c.name, c.conf.scheme(), c.conf.host, c.conf.db, c.conf.timeout
            )
        }));
        lines
    }
}
