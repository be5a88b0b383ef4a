use reqwest::Client;
use serde::{Deserialize, Serialize};
use solana_sdk::transaction::VersionedTransaction;
use std::time::Duration;
use tracing::{debug, error};

use crate::error::LaunchError;

/// The name/symbol/URI triple the trade API embeds in the create instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

#[derive(Debug, Serialize)]
pub struct CreateTradeRequest {
    #[serde(rename = "publicKey")]
    pub public_key: String,
    pub action: String,
    #[serde(rename = "tokenMetadata")]
    pub token_metadata: TokenMetadata,
    pub mint: String,
    #[serde(rename = "denominatedInSol")]
    pub denominated_in_sol: String,
    pub amount: f64,
    pub slippage: f64,
    #[serde(rename = "priorityFee")]
    pub priority_fee: f64,
    pub pool: String,
}

/// Client for the trade-construction API. It is the sole source of a valid
/// unsigned create transaction, so failures here are terminal.
#[derive(Debug, Clone)]
pub struct TradeClient {
    client: Client,
    base_url: String,
}

impl TradeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Requests a serialized, unsigned create transaction parameterized by
    /// the funding wallet, the mint, the metadata URI, and the purchase
    /// amount in SOL.
    pub async fn fetch_create_transaction(
        &self,
        wallet_public_key: &str,
        mint_public_key: &str,
        metadata: TokenMetadata,
        sol_amount: f64,
        slippage: f64,
        priority_fee: f64,
    ) -> Result<VersionedTransaction, LaunchError> {
        let request = CreateTradeRequest {
            public_key: wallet_public_key.to_string(),
            action: "create".to_string(),
            token_metadata: metadata,
            mint: mint_public_key.to_string(),
            denominated_in_sol: "true".to_string(),
            amount: sol_amount,
            slippage,
            priority_fee,
            pool: "pump".to_string(),
        };

        let url = format!("{}/api/trade-local", self.base_url);
        debug!("Requesting create transaction from {}", url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                LaunchError::TransactionConstruction(format!("Request to {} failed: {}", url, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Trade API error: status {}, body: {}", status, body);
            return Err(LaunchError::TransactionConstruction(format!(
                "Trade API returned status {}: {}",
                status, body
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            LaunchError::TransactionConstruction(format!("Failed to read response body: {}", e))
        })?;

        let transaction: VersionedTransaction = bincode::deserialize(&bytes).map_err(|e| {
            LaunchError::TransactionConstruction(format!(
                "Failed to deserialize transaction ({} bytes): {}",
                bytes.len(),
                e
            ))
        })?;

        debug!(
            "Received unsigned transaction with {} signature slots",
            transaction.signatures.len()
        );
        Ok(transaction)
    }
}
