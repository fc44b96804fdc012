//! Uri command implementation

use clap::Args;
use moorage_core::{Model, MoorageError};

use super::select_connections;

/// Uri command arguments
#[derive(Args, Debug)]
pub struct UriCommand {
    /// Only print this connection
    #[arg(short, long)]
    pub name: Option<String>,

    /// Print the password instead of masking it
    #[arg(long)]
    pub show_password: bool,
}

impl UriCommand {
    /// Execute the uri command
    pub async fn execute(&self, model: &Model) -> Result<(), MoorageError> {
        let model = select_connections(model, self.name.as_deref())?;
        for line in self.render(&model) {
            println!("{}", line);
        }
        Ok(())
    }

    fn render(&self, model: &Model) -> Vec<String> {
        model
            .connections
            .iter()
            .map(|c| {
                let uri = if self.show_password {
                    c.conf.uri()
                } else {
                    c.conf.redacted_uri()
                };
                format!("{}: {}", c.name, uri)
            })
            .collect()
    }
}
