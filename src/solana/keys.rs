use serde::Serialize;
use solana_sdk::{
    signature::Keypair,
    signer::Signer,
};
use tracing::warn;

use crate::error::LaunchError;

/// Ceiling for the vanity brute-force search. Expected attempts grow as
/// roughly 58^k for a k-character prefix, so anything past 4-5 characters is
/// impractical regardless of the ceiling.
pub const DEFAULT_VANITY_ATTEMPTS: u32 = 10_000;

/// A freshly generated keypair in its wire representation: the public
/// address and the base-58 encoding of the 64-byte secret. The secret is
/// held only in memory and in the HTTP response; custody is the caller's
/// responsibility.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedKeypair {
    pub public_key: String,
    pub secret_key: String,
}

impl From<&Keypair> for GeneratedKeypair {
    fn from(keypair: &Keypair) -> Self {
        Self {
            public_key: keypair.pubkey().to_string(),
            secret_key: bs58::encode(keypair.to_bytes()).into_string(),
        }
    }
}

/// Generates a fresh keypair for a token mint or throwaway funding wallet.
pub fn generate_keypair() -> GeneratedKeypair {
    GeneratedKeypair::from(&Keypair::new())
}

/// Brute-force search for a keypair whose public address starts with
/// `prefix` (case-insensitive). Gives up deterministically once
/// `max_attempts` keypairs have been tried.
pub fn generate_vanity_keypair(
    prefix: &str,
    max_attempts: u32,
) -> Result<GeneratedKeypair, LaunchError> {
    let prefix = prefix.to_lowercase();
    if prefix.len() > 5 {
        warn!(
            "Vanity prefix {:?} is {} characters; a match within {} attempts is unlikely",
            prefix,
            prefix.len(),
            max_attempts
        );
    }

    for _ in 0..max_attempts {
        let keypair = Keypair::new();
        let address = keypair.pubkey().to_string();
        if address.to_lowercase().starts_with(&prefix) {
            return Ok(GeneratedKeypair::from(&keypair));
        }
    }

    Err(LaunchError::VanityExhausted {
        prefix,
        attempts: max_attempts,
    })
}

/// Reconstructs a keypair from the base-58 secret key form used on the wire.
pub fn keypair_from_base58(secret: &str) -> Result<Keypair, LaunchError> {
    let bytes = bs58::decode(secret)
        .into_vec()
        .map_err(|e| LaunchError::Wallet(format!("Invalid base58 secret key: {}", e)))?;
    Keypair::from_bytes(&bytes)
        .map_err(|e| LaunchError::Wallet(format!("Invalid secret key data: {}", e)))
}
