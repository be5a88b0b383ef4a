//! Web API module for the SCOOP launch relay.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;

use std::sync::Arc;

use crate::config::Config;
use crate::launch::LaunchPipeline;
use crate::solana::client::SolanaClient;

/// Shared application state for all API handlers. Launches are stateless:
/// nothing here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub solana_client: Arc<SolanaClient>,
    pub pipeline: Arc<LaunchPipeline>,
}

impl AppState {
    pub fn new(config: Arc<Config>, solana_client: Arc<SolanaClient>) -> Self {
        let pipeline = Arc::new(LaunchPipeline::new(&config, solana_client.clone()));
        Self {
            config,
            solana_client,
            pipeline,
        }
    }
}
