//! Request handlers for the relay API

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use solana_sdk::{pubkey::Pubkey, signer::Signer};
use std::str::FromStr;
use tracing::{error, info};

use super::models::*;
use super::AppState;
use crate::error::LaunchError;
use crate::launch::metadata::TokenProfile;
use crate::launch::LaunchRequest;
use crate::solana::keys;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

fn bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse { error: message }),
    )
        .into_response()
}

/// The single relay route: sequences metadata upload, transaction
/// construction, signing, submission, and confirmation polling. Any stage
/// failure short-circuits with 500; a confirmation timeout is 408 with the
/// signature so the caller can keep watching on an explorer.
pub async fn deploy_token(
    State(state): State<AppState>,
    Json(request): Json<DeployTokenRequest>,
) -> Response {
    info!(
        "Launch request for {} ({}), wallet {}",
        request.name, request.symbol, request.wallet_public_key
    );

    if let Err(e) = request.validate() {
        return bad_request(e.to_string());
    }

    let mint_keypair = match keys::keypair_from_base58(&request.mint_secret_key) {
        Ok(keypair) => keypair,
        Err(e) => return bad_request(format!("Invalid mint secret key: {}", e)),
    };
    let wallet_keypair = match keys::keypair_from_base58(&request.wallet_secret_key) {
        Ok(keypair) => keypair,
        Err(e) => return bad_request(format!("Invalid wallet secret key: {}", e)),
    };

    // The client sends the public halves alongside the secrets; a mismatch
    // means the form state is corrupt and signing would fail anyway.
    if mint_keypair.pubkey().to_string() != request.mint_public_key {
        return bad_request("Mint public key does not match its secret key".to_string());
    }
    if wallet_keypair.pubkey().to_string() != request.wallet_public_key {
        return bad_request("Wallet public key does not match its secret key".to_string());
    }

    let launch = LaunchRequest {
        image_url: request.image_url,
        profile: TokenProfile {
            name: request.name,
            symbol: request.symbol,
            description: request.description,
            twitter: request.twitter,
            telegram: request.telegram,
            website: request.website,
        },
        mint_keypair,
        wallet_keypair,
        sol_amount: request.sol_amount,
        slippage: request.slippage.unwrap_or(state.config.default_slippage),
        priority_fee: request
            .priority_fee
            .unwrap_or(state.config.default_priority_fee),
    };

    match state.pipeline.run(launch).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(DeployTokenResponse {
                signature: outcome.signature,
                confirmed: outcome.confirmed,
            }),
        )
            .into_response(),
        Err(LaunchError::ConfirmationTimeout { signature }) => (
            StatusCode::REQUEST_TIMEOUT,
            Json(TimeoutResponse {
                signature,
                confirmed: false,
                error: "Transaction confirmation timed out".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Launch failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Generates a fresh mint or funding-wallet keypair, optionally with a
/// vanity address prefix. The secret is returned once and never stored.
pub async fn generate_keypair(
    State(_state): State<AppState>,
    request: Option<Json<GenerateKeypairRequest>>,
) -> Response {
    let request = request.map(|Json(r)| r).unwrap_or_default();

    match request.prefix.filter(|p| !p.is_empty()) {
        None => (StatusCode::OK, Json(keys::generate_keypair())).into_response(),
        Some(prefix) => {
            // The brute-force search is CPU bound; keep it off the async
            // workers.
            let result = tokio::task::spawn_blocking(move || {
                keys::generate_vanity_keypair(&prefix, keys::DEFAULT_VANITY_ATTEMPTS)
            })
            .await;

            match result {
                Ok(Ok(keypair)) => (StatusCode::OK, Json(keypair)).into_response(),
                Ok(Err(e @ LaunchError::VanityExhausted { .. })) => (
                    StatusCode::NOT_FOUND,
                    Json(ErrorResponse {
                        error: e.to_string(),
                    }),
                )
                    .into_response(),
                Ok(Err(e)) => bad_request(e.to_string()),
                Err(e) => {
                    error!("Vanity search task failed: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(ErrorResponse {
                            error: "Keypair generation failed".to_string(),
                        }),
                    )
                        .into_response()
                }
            }
        }
    }
}

/// SOL balance for a funding wallet, used by the client as a pre-launch
/// check.
pub async fn get_balance(
    State(state): State<AppState>,
    Path(pubkey): Path<String>,
) -> Result<Json<BalanceResponse>, (StatusCode, Json<ErrorResponse>)> {
    let pubkey = Pubkey::from_str(&pubkey).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Invalid public key: {}", e),
            }),
        )
    })?;

    let balance_sol = state.solana_client.get_sol_balance(&pubkey).await.map_err(|e| {
        error!("Balance lookup failed for {}: {}", pubkey, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to get wallet balance".to_string(),
            }),
        )
    })?;

    Ok(Json(BalanceResponse {
        address: pubkey.to_string(),
        balance_sol,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::solana::client::SolanaClient;
    use crate::web::server::create_app;
    use axum::body::Body;
    use axum::http::{header, Request};
    use axum::Router;
    use http_body_util::BodyExt;
    use mockito::Matcher;
    use solana_sdk::{
        hash::Hash, signature::Keypair, system_instruction, system_program,
        transaction::{Transaction, VersionedTransaction},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn test_state(upstream_url: &str, rpc_url: &str) -> AppState {
        let config = Arc::new(Config {
            solana_rpc_url: rpc_url.to_string(),
            pump_fun_url: upstream_url.to_string(),
            pump_portal_url: upstream_url.to_string(),
            api_host: "127.0.0.1".to_string(),
            api_port: 0,
            default_slippage: 10.0,
            default_priority_fee: 0.0005,
            confirm_timeout_secs: 1,
            poll_interval_ms: 50,
        });
        AppState::new(config, Arc::new(SolanaClient::new(rpc_url)))
    }

    fn deploy_body(
        image_url: &str,
        symbol: &str,
        mint: &Keypair,
        wallet: &Keypair,
    ) -> serde_json::Value {
        serde_json::json!({
            "imageUrl": image_url,
            "name": "Pepe Coin",
            "symbol": symbol,
            "description": "trending",
            "mintSecretKey": bs58::encode(mint.to_bytes()).into_string(),
            "mintPublicKey": mint.pubkey().to_string(),
            "walletSecretKey": bs58::encode(wallet.to_bytes()).into_string(),
            "walletPublicKey": wallet.pubkey().to_string(),
            "solAmount": 0.5
        })
    }

    async fn post_deploy(
        app: Router,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/deploy-token")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn rpc_result(value: serde_json::Value) -> String {
        serde_json::json!({
            "jsonrpc": "2.0",
            "result": value,
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
            .with_body(rpc_result(serde_json::json!({
                "solana-core": "1.17.0",
                "feature-set": 1
            })))
            .create_async()
            .await;
    }

    #[tokio::test]
    async fn validation_failure_is_a_400_with_an_error_body() {
        let app = create_app(test_state("http://127.0.0.1:1", "http://127.0.0.1:1"));

        let (status, body) = post_deploy(
            app,
            deploy_body(
                "https://example.com/pepe.png",
                "pepe", // lowercase, rejected before any network call
                &Keypair::new(),
                &Keypair::new(),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("2-4 uppercase letters"));
    }

    #[tokio::test]
    async fn pipeline_failure_is_a_500_with_an_error_body() {
        let mut upstream = mockito::Server::new_async().await;
        upstream
            .mock("GET", "/gone.png")
            .with_status(404)
            .create_async()
            .await;
        let ipfs_mock = upstream
            .mock("POST", "/api/ipfs")
            .expect(0)
            .create_async()
            .await;

        let app = create_app(test_state(&upstream.url(), "http://127.0.0.1:1"));

        let (status, body) = post_deploy(
            app,
            deploy_body(
                &format!("{}/gone.png", upstream.url()),
                "PEPE",
                &Keypair::new(),
                &Keypair::new(),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("Image fetch"));
        assert!(body.get("signature").is_none());
        ipfs_mock.assert_async().await;
    }

    #[tokio::test]
    async fn confirmation_timeout_is_a_408_with_the_signature() {
        let wallet = Keypair::new();
        let mint = Keypair::new();
        let blockhash = Hash::new_unique();

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
        let mut expected_message = unsigned.message.clone();
        expected_message.set_recent_blockhash(blockhash);
        let expected =
            VersionedTransaction::try_new(expected_message, &[&wallet, &mint]).unwrap();
        let expected_signature = expected.signatures[0].to_string();

        let mut upstream = mockito::Server::new_async().await;
        let mut rpc = mockito::Server::new_async().await;

        upstream
            .mock("GET", "/pepe.png")
            .with_status(200)
            .with_body("png-bytes")
            .create_async()
            .await;
        upstream
            .mock("POST", "/api/ipfs")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"metadata":{"name":"Pepe Coin","symbol":"PEPE"},"metadataUri":"ipfs://QmPepe"}"#,
            )
            .create_async()
            .await;
        upstream
            .mock("POST", "/api/trade-local")
            .with_status(200)
            .with_body(bincode::serialize(&unsigned).unwrap())
            .create_async()
            .await;

        mock_get_version(&mut rpc).await;
        rpc.mock("POST", "/")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "method": "getLatestBlockhash"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(rpc_result(serde_json::json!({
                "context": { "apiVersion": "1.17.0", "slot": 100 },
                "value": { "blockhash": blockhash.to_string(), "lastValidBlockHeight": 300 }
            })))
            .create_async()
            .await;
        rpc.mock("POST", "/")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "method": "sendTransaction"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(rpc_result(serde_json::json!(expected_signature)))
            .create_async()
            .await;
        // Status never reaches confirmed.
        rpc.mock("POST", "/")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "method": "getSignatureStatuses"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(rpc_result(serde_json::json!({
                "context": { "apiVersion": "1.17.0", "slot": 101 },
                "value": [null]
            })))
            .create_async()
            .await;

        let app = create_app(test_state(&upstream.url(), &rpc.url()));

        let (status, body) = post_deploy(
            app,
            deploy_body(
                &format!("{}/pepe.png", upstream.url()),
                "PEPE",
                &mint,
                &wallet,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            body,
            serde_json::json!({
                "signature": expected_signature,
                "confirmed": false,
                "error": "Transaction confirmation timed out"
            })
        );
    }

    #[tokio::test]
    async fn mismatched_wallet_public_key_is_rejected_before_launch() {
        let mut upstream = mockito::Server::new_async().await;
        let image_mock = upstream
            .mock("GET", "/pepe.png")
            .expect(0)
            .create_async()
            .await;

        let app = create_app(test_state(&upstream.url(), "http://127.0.0.1:1"));

        let mut body = deploy_body(
            &format!("{}/pepe.png", upstream.url()),
            "PEPE",
            &Keypair::new(),
            &Keypair::new(),
        );
        body["walletPublicKey"] = serde_json::json!(Keypair::new().pubkey().to_string());

        let (status, body) = post_deploy(app, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("does not match"));
        image_mock.assert_async().await;
    }
}
