use anyhow::Result;
use solana_client::{
    rpc_client::RpcClient,
    rpc_config::RpcSendTransactionConfig,
};
use solana_sdk::{
    commitment_config::{CommitmentConfig, CommitmentLevel},
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::VersionedTransaction,
};
use std::sync::Arc;
use tracing::{debug, error};

use crate::error::LaunchError;

/// Thin wrapper over the blocking Solana `RpcClient`. All calls are run on
/// the blocking thread pool so handlers never stall the async runtime.
#[derive(Clone)]
pub struct SolanaClient {
    rpc_client: Arc<RpcClient>,
}

impl SolanaClient {
    pub fn new(rpc_url: &str) -> Self {
        let rpc_client =
            RpcClient::new_with_commitment(rpc_url.to_string(), CommitmentConfig::confirmed());
        Self {
            rpc_client: Arc::new(rpc_client),
        }
    }

    // Helper to run blocking RPC calls in a tokio task.
    async fn run_blocking<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(Arc<RpcClient>) -> solana_client::client_error::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let client = self.rpc_client.clone();
        let value = tokio::task::spawn_blocking(move || f(client))
            .await?
            .map_err(|e| {
                error!("Solana RPC client error: {:?}", e);
                anyhow::anyhow!("RPC client error: {}", e)
            })?;
        Ok(value)
    }

    pub async fn get_latest_blockhash(&self) -> Result<Hash, LaunchError> {
        self.run_blocking(|client| client.get_latest_blockhash())
            .await
            .map_err(|e| LaunchError::Rpc(e.to_string()))
    }

    pub async fn get_sol_balance(&self, pubkey: &Pubkey) -> Result<f64, LaunchError> {
        let pubkey = *pubkey;
        let lamports = self
            .run_blocking(move |client| client.get_balance(&pubkey))
            .await
            .map_err(|e| LaunchError::Rpc(e.to_string()))?;
        Ok(lamports as f64 / 1_000_000_000.0)
    }

    /// Sends a signed transaction without waiting for confirmation.
    /// Submission is a one-shot: the RPC client is told not to retry.
    pub async fn send_versioned_transaction(
        &self,
        transaction: &VersionedTransaction,
    ) -> Result<Signature, LaunchError> {
        let transaction = transaction.clone();
        let config = RpcSendTransactionConfig {
            skip_preflight: false,
            preflight_commitment: Some(CommitmentLevel::Confirmed),
            encoding: Some(solana_transaction_status::UiTransactionEncoding::Base64),
            max_retries: Some(0),
            min_context_slot: None,
        };
        let signature = self
            .run_blocking(move |client| client.send_transaction_with_config(&transaction, config))
            .await
            .map_err(|e| LaunchError::Submission(e.to_string()))?;

        debug!("Transaction sent with signature: {}", signature);
        Ok(signature)
    }

    /// Checks whether a signature has reached the confirmed commitment level.
    pub async fn signature_confirmed(&self, signature: &Signature) -> Result<bool, LaunchError> {
        let signature = *signature;
        let response = self
            .run_blocking(move |client| client.get_signature_statuses(&[signature]))
            .await
            .map_err(|e| LaunchError::Rpc(e.to_string()))?;

        let status = response.value.into_iter().next().flatten();
        Ok(status
            .map(|s| s.satisfies_commitment(CommitmentConfig::confirmed()))
            .unwrap_or(false))
    }
}
