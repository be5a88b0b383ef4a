use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Process-wide configuration, sourced once at startup from environment
/// variables and injected into each component at construction time.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub solana_rpc_url: String,

    /// Base URL of the token-creation platform (metadata ingestion).
    pub pump_fun_url: String,
    /// Base URL of the trade-construction API (unsigned create transactions).
    pub pump_portal_url: String,

    pub api_host: String,
    pub api_port: u16,

    /// Slippage tolerance in percent applied when the request omits one.
    pub default_slippage: f64,
    /// Priority fee in SOL applied when the request omits one.
    pub default_priority_fee: f64,

    /// Ceiling on confirmation polling per launch.
    pub confirm_timeout_secs: u64,
    /// Interval between signature status checks.
    pub poll_interval_ms: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            solana_rpc_url: env::var("SOLANA_RPC_URL")
                .context("SOLANA_RPC_URL not set in environment")?,

            pump_fun_url: env::var("PUMP_FUN_URL")
                .unwrap_or_else(|_| "https://pump.fun".to_string()),
            pump_portal_url: env::var("PUMP_PORTAL_URL")
                .unwrap_or_else(|_| "https://pumpportal.fun".to_string()),

            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .context("Failed to parse API_PORT")?,

            default_slippage: env::var("DEFAULT_SLIPPAGE_PERCENT")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("Failed to parse DEFAULT_SLIPPAGE_PERCENT")?,
            default_priority_fee: env::var("DEFAULT_PRIORITY_FEE_SOL")
                .unwrap_or_else(|_| "0.0005".to_string())
                .parse()
                .context("Failed to parse DEFAULT_PRIORITY_FEE_SOL")?,

            confirm_timeout_secs: env::var("CONFIRM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("Failed to parse CONFIRM_TIMEOUT_SECS")?,
            poll_interval_ms: env::var("POLL_INTERVAL_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .context("Failed to parse POLL_INTERVAL_MS")?,
        })
    }
}
