use anyhow::{Context, Result};
use clap::Parser;
use jobsy::cli::{handle_command, Cli, Command};
use jobsy::environment::AppConfig;
use std::fs::OpenOptions;
use std::path::Path;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "jobsy=info,rocket=warn";

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(file)
                        .with_current_span(false)
                        .with_span_list(false),
                )
                .with(filter)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.command {
        Command::Serve => Some(AppConfig::load(&cli.config)?),
        _ => None,
    };
    init_logging(config.as_ref().and_then(|c| c.log_file.as_deref()))?;

    if let Some(config) = &config {
        tracing::info!(
            "Configuration loaded from {} (backend: {})",
            cli.config.display(),
            config.backend.base_url
        );
    }

    handle_command(cli.command, config).await
}
