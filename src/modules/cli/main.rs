//! Moorage CLI
//!
//! Command-line interface for MongoDB connection management.

use anyhow::Context;
use clap::Parser;
use moorage_cli::{render_error, Cli, Commands, LogFormat};
use moorage_core::MoorageError;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", render_error(&e, verbose));
        let code = e
            .downcast_ref::<MoorageError>()
            .map(MoorageError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let registry = tracing_subscriber::registry().with(filter);
    match cli.log_format {
        LogFormat::Text => registry.with(fmt::layer().with_writer(std::io::stderr)).init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }

    let model = cli.load_model().context("failed to load configuration")?;

    // Execute command
    match &cli.command {
        Commands::Ping(cmd) => cmd.execute(&model).await?,
        Commands::Uri(cmd) => cmd.execute(&model).await?,
        Commands::Validate(cmd) => cmd.execute(&model).await?,
    }

    Ok(())
}
