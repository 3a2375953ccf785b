use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod handlers;
mod router;
mod schemas;
mod source;

#[cfg(test)]
mod test_utils;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads its env fallbacks
    let dotenv = config::load_dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match dotenv {
        Some(path) => tracing::debug!("Loaded environment from {}", path.display()),
        None => tracing::debug!("No .env file found"),
    }

    let cli = Cli::parse();
    cli.run().await?;

    Ok(())
}
