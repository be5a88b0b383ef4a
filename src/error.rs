use thiserror::Error;

/// Errors covering a single token launch attempt. None of these are retried
/// automatically; the confirmation poller re-checks status on a fixed
/// interval, which is polling rather than error retry.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Image fetch failed: {0}")]
    ImageFetch(String),

    #[error("Metadata upload failed: {0}")]
    MetadataUpload(String),

    #[error("Transaction construction failed: {0}")]
    TransactionConstruction(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Transaction submission failed: {0}")]
    Submission(String),

    /// The transaction may still land on chain after the relay gave up
    /// observing it; the signature is returned so the caller can check an
    /// explorer.
    #[error("Transaction confirmation timed out")]
    ConfirmationTimeout { signature: String },

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Could not find address with prefix {prefix:?} after {attempts} attempts")]
    VanityExhausted { prefix: String, attempts: u32 },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
