use anyhow::Result;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod config;
mod error;
mod launch;
mod solana;
mod web;

use crate::config::Config;
use crate::solana::client::SolanaClient;
use crate::web::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load environment variables
    dotenv().ok();

    let config = Arc::new(Config::load()?);
    info!("Configuration loaded successfully");

    let solana_client = Arc::new(SolanaClient::new(&config.solana_rpc_url));
    info!("Solana client initialized for {}", config.solana_rpc_url);

    let state = AppState::new(config.clone(), solana_client);

    web::server::start_server(state, config).await?;

    Ok(())
}
