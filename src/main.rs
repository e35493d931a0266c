mod commands;
mod config;
mod dashboard;
mod error;
mod graphql;
mod models;
mod search;
mod services;
mod session;

use anyhow::Context;
use clap::Parser;
use commands::{App, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = config::Config::load().context("Failed to load configuration")?;
    if let Some(url) = cli.graphql_url.clone() {
        config.graphql_url = url;
    }
    if let Some(path) = cli.session_file.clone() {
        config.session_file = path;
    }

    let app = App::new(config).context("Failed to set up API clients")?;

    app.run(cli.command).await
}
