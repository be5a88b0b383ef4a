use solana_sdk::{signature::Keypair, transaction::VersionedTransaction};
use tracing::debug;

use crate::error::LaunchError;
use crate::solana::client::SolanaClient;

/// Attaches a current network blockhash and signs with both required
/// keypairs. The blockhash is fetched immediately before signing so the
/// transaction lands inside the chain's short validity window; both
/// signatures are required because the mint account is being created and the
/// funding wallet is spending funds.
pub async fn attach_blockhash_and_sign(
    solana: &SolanaClient,
    unsigned: VersionedTransaction,
    mint_keypair: &Keypair,
    wallet_keypair: &Keypair,
) -> Result<VersionedTransaction, LaunchError> {
    let blockhash = solana.get_latest_blockhash().await?;

    let mut message = unsigned.message;
    message.set_recent_blockhash(blockhash);
    debug!("Signing transaction with blockhash {}", blockhash);

    VersionedTransaction::try_new(message, &[wallet_keypair, mint_keypair])
        .map_err(|e| LaunchError::Signing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use solana_sdk::{
        hash::Hash, signature::Signature, signer::Signer, system_instruction, system_program,
        transaction::Transaction,
    };

    fn blockhash_response(blockhash: &Hash) -> String {
        serde_json::json!({
            "jsonrpc": "2.0",
            "result": {
                "context": { "apiVersion": "1.17.0", "slot": 123 },
                "value": {
                    "blockhash": blockhash.to_string(),
                    "lastValidBlockHeight": 300,
                }
            },
            "id": 1
        })
        .to_string()
    }

    fn version_response() -> String {
        serde_json::json!({
            "jsonrpc": "2.0",
            "result": { "solana-core": "1.17.0", "feature-set": 1 },
            "id": 1
        })
        .to_string()
    }

    // The RPC client probes the node version before fetching a blockhash, so
    // every mock server must answer `getVersion` too.
    async fn mock_get_version(server: &mut mockito::Server) {
        server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "method": "getVersion"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(version_response())
            .create_async()
            .await;
    }

    #[tokio::test]
    async fn signs_with_both_keypairs_and_fresh_blockhash() {
        let wallet = Keypair::new();
        let mint = Keypair::new();
        let blockhash = Hash::new_unique();

        let mut server = mockito::Server::new_async().await;
        mock_get_version(&mut server).await;
        server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "method": "getLatestBlockhash"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(blockhash_response(&blockhash))
            .create_async()
            .await;

        // A create-account instruction requires both the payer and the new
        // account to sign, matching the shape the trade API returns.
        let instruction = system_instruction::create_account(
            &wallet.pubkey(),
            &mint.pubkey(),
            1_000_000,
            82,
            &system_program::id(),
        );
        let unsigned = VersionedTransaction::from(Transaction::new_with_payer(
            &[instruction],
            Some(&wallet.pubkey()),
        ));

        let solana = SolanaClient::new(&server.url());
        let signed = attach_blockhash_and_sign(&solana, unsigned, &mint, &wallet)
            .await
            .unwrap();

        assert_eq!(*signed.message.recent_blockhash(), blockhash);
        assert_eq!(signed.signatures.len(), 2);
        assert!(signed
            .signatures
            .iter()
            .all(|sig| *sig != Signature::default()));
    }

    #[tokio::test]
    async fn missing_signer_is_a_signing_error() {
        let wallet = Keypair::new();
        let mint = Keypair::new();
        let other = Keypair::new();
        let blockhash = Hash::new_unique();

        let mut server = mockito::Server::new_async().await;
        mock_get_version(&mut server).await;
        server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "method": "getLatestBlockhash"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(blockhash_response(&blockhash))
            .create_async()
            .await;

        let instruction = system_instruction::create_account(
            &wallet.pubkey(),
            &mint.pubkey(),
            1_000_000,
            82,
            &system_program::id(),
        );
        let unsigned = VersionedTransaction::from(Transaction::new_with_payer(
            &[instruction],
            Some(&wallet.pubkey()),
        ));

        let solana = SolanaClient::new(&server.url());
        let err = attach_blockhash_and_sign(&solana, unsigned, &other, &wallet)
            .await
            .unwrap_err();

        assert!(matches!(err, LaunchError::Signing(_)));
    }
}
