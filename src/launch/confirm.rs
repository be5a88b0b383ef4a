use solana_sdk::transaction::VersionedTransaction;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::error::LaunchError;
use crate::solana::client::SolanaClient;

/// Confirmation progression for a submitted transaction. `Confirmed` and
/// `TimedOut` are terminal; `TimedOut` means the relay stopped observing,
/// not that the transaction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationState {
    Submitted,
    Confirmed,
    TimedOut,
}

/// Pure transition function driven by elapsed time and the latest status
/// observation. A confirmed observation wins over the deadline so a launch
/// that lands on the final poll is still reported as confirmed.
pub fn advance(
    state: ConfirmationState,
    elapsed: Duration,
    timeout: Duration,
    observed_confirmed: bool,
) -> ConfirmationState {
    match state {
        ConfirmationState::Confirmed | ConfirmationState::TimedOut => state,
        ConfirmationState::Submitted => {
            if observed_confirmed {
                ConfirmationState::Confirmed
            } else if elapsed >= timeout {
                ConfirmationState::TimedOut
            } else {
                ConfirmationState::Submitted
            }
        }
    }
}

/// Submits a signed transaction and polls its signature status until it is
/// confirmed or the timeout elapses. Submission itself happens exactly once;
/// only the status check repeats. Transient status-query failures are logged
/// and treated as "not yet confirmed" so the poll stays bounded by the
/// timeout instead of aborting mid-flight.
pub async fn submit_and_confirm(
    solana: &SolanaClient,
    transaction: &VersionedTransaction,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<String, LaunchError> {
    let signature = solana.send_versioned_transaction(transaction).await?;
    info!("Transaction submitted: {}", signature);

    let started = Instant::now();
    let mut state = ConfirmationState::Submitted;

    loop {
        let observed_confirmed = match solana.signature_confirmed(&signature).await {
            Ok(confirmed) => confirmed,
            Err(e) => {
                warn!("Status check for {} failed: {}", signature, e);
                false
            }
        };

        state = advance(state, started.elapsed(), timeout, observed_confirmed);
        match state {
            ConfirmationState::Confirmed => {
                info!("Transaction {} confirmed", signature);
                return Ok(signature.to_string());
            }
            ConfirmationState::TimedOut => {
                warn!(
                    "Gave up waiting for {} after {:?}; it may still land",
                    signature, timeout
                );
                return Err(LaunchError::ConfirmationTimeout {
                    signature: signature.to_string(),
                });
            }
            ConfirmationState::Submitted => {
                tokio::time::sleep(poll_interval).await;
            }
        }
    }
}
