//! The token launch pipeline: metadata upload, unsigned transaction fetch,
//! signing, submission, and confirmation polling. Strictly sequential per
//! request; any stage failure short-circuits the rest.

pub mod confirm;
pub mod metadata;
pub mod signer;
pub mod trade;

use solana_sdk::{signature::Keypair, signer::Signer};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::error::LaunchError;
use crate::solana::client::SolanaClient;

use self::metadata::{MetadataClient, TokenProfile};
use self::trade::{TokenMetadata, TradeClient};

/// Everything a single launch needs, reconstructed from one HTTP request.
/// Held only in memory for the duration of the request.
pub struct LaunchRequest {
    pub image_url: String,
    pub profile: TokenProfile,
    pub mint_keypair: Keypair,
    pub wallet_keypair: Keypair,
    pub sol_amount: f64,
    pub slippage: f64,
    pub priority_fee: f64,
}

#[derive(Debug, Clone)]
pub struct LaunchOutcome {
    pub signature: String,
    pub confirmed: bool,
}

/// Sequences one launch end to end. Stateless across requests: concurrent
/// launches are independent and share nothing but the clients.
#[derive(Clone)]
pub struct LaunchPipeline {
    metadata: MetadataClient,
    trade: TradeClient,
    solana: Arc<SolanaClient>,
    confirm_timeout: Duration,
    poll_interval: Duration,
}

impl LaunchPipeline {
    pub fn new(config: &Config, solana: Arc<SolanaClient>) -> Self {
        Self {
            metadata: MetadataClient::new(&config.pump_fun_url),
            trade: TradeClient::new(&config.pump_portal_url),
            solana,
            confirm_timeout: Duration::from_secs(config.confirm_timeout_secs),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }

    pub async fn run(&self, request: LaunchRequest) -> Result<LaunchOutcome, LaunchError> {
        let mint_public_key = request.mint_keypair.pubkey().to_string();
        let wallet_public_key = request.wallet_keypair.pubkey().to_string();
        info!(
            "Launching {} ({}) for wallet {}, mint {}",
            request.profile.name, request.profile.symbol, wallet_public_key, mint_public_key
        );

        let ipfs = self
            .metadata
            .upload(&request.image_url, &request.profile)
            .await?;

        let unsigned = self
            .trade
            .fetch_create_transaction(
                &wallet_public_key,
                &mint_public_key,
                TokenMetadata {
                    name: ipfs.metadata.name,
                    symbol: ipfs.metadata.symbol,
                    uri: ipfs.metadata_uri,
                },
                request.sol_amount,
                request.slippage,
                request.priority_fee,
            )
            .await?;

        let signed = signer::attach_blockhash_and_sign(
            &self.solana,
            unsigned,
            &request.mint_keypair,
            &request.wallet_keypair,
        )
        .await?;

        let signature = confirm::submit_and_confirm(
            &self.solana,
            &signed,
            self.confirm_timeout,
            self.poll_interval,
        )
        .await?;

        Ok(LaunchOutcome {
            signature,
            confirmed: true,
        })
    }
}
