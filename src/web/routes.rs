//! API route definitions

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;
use super::AppState;

/// Create all API routes
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(handlers::health_check))
        // Token launch relay
        .route("/api/deploy-token", post(handlers::deploy_token))
        // Key material
        .route("/api/generate-keypair", post(handlers::generate_keypair))
        // Funding wallet balance pre-check
        .route("/api/balance/:pubkey", get(handlers::get_balance))
        .with_state(state)
}
