//! Request and Response DTOs for the relay API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LaunchError;

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Token launch
// ============================================================================

/// Body of `POST /api/deploy-token`. Secret keys arrive in plain JSON: the
/// relay is same-origin-trusted by the browser client, an explicit trust
/// boundary of this design rather than an oversight.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployTokenRequest {
    pub image_url: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub description: String,
    pub mint_secret_key: String,
    pub mint_public_key: String,
    pub wallet_secret_key: String,
    pub wallet_public_key: String,
    pub sol_amount: f64,
    #[serde(default)]
    pub slippage: Option<f64>,
    #[serde(default)]
    pub priority_fee: Option<f64>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub telegram: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl DeployTokenRequest {
    /// Field validation run before any network call is made.
    pub fn validate(&self) -> Result<(), LaunchError> {
        if self.name.trim().is_empty() {
            return Err(LaunchError::InvalidRequest("Token name is required".to_string()));
        }
        if self.name.len() > 32 {
            return Err(LaunchError::InvalidRequest(
                "Token name must be at most 32 characters".to_string(),
            ));
        }
        if self.symbol.len() < 2
            || self.symbol.len() > 4
            || !self.symbol.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(LaunchError::InvalidRequest(
                "Token symbol must be 2-4 uppercase letters".to_string(),
            ));
        }
        if self.sol_amount <= 0.0 {
            return Err(LaunchError::InvalidRequest(
                "Purchase amount must be greater than zero".to_string(),
            ));
        }
        if self.image_url.trim().is_empty() {
            return Err(LaunchError::InvalidRequest("Image URL is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct DeployTokenResponse {
    pub signature: String,
    pub confirmed: bool,
}

/// 408 body: the transaction was submitted but confirmation was not observed
/// inside the polling window. The caller should check an explorer.
#[derive(Debug, Serialize)]
pub struct TimeoutResponse {
    pub signature: String,
    pub confirmed: bool,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Keypair generation
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct GenerateKeypairRequest {
    #[serde(default)]
    pub prefix: Option<String>,
}

// ============================================================================
// Balance
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub address: String,
    pub balance_sol: f64,
}
