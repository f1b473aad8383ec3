//! Data Transfer Objects for API requests and responses

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Node status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeStatusResponse {
    pub connected: bool,
    pub url: String,
    pub network: String,
    pub chain_id: Option<u64>,
    pub block_height: Option<u64>,
}

/// RPC endpoint configuration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfigRequest {
    pub url: String,
}

/// Wallet connection status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletStatusResponse {
    pub connected: bool,
    pub address: Option<String>,
    pub chain_id: Option<u64>,
}

/// The caller's derived view of the sale, in one response.
///
/// Raw values are decimal strings of base units; the formatted twins are
/// ether-style strings for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub address: String,
    pub balance_wei: String,
    pub balance: String,
    pub total_minted_wei: String,
    pub total_minted: String,
    pub max_total_supply: String,
    pub claimable: u64,
    pub is_owner: bool,
    /// True when any read failed and its value was reset to a safe default
    pub degraded: bool,
}

/// Mint request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintRequest {
    /// Whole tokens to purchase
    pub amount: u64,
}

/// Result of a mined claim or mint, with the refreshed summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxResponse {
    pub tx_hash: String,
    pub block_number: Option<u64>,
    pub summary: SummaryResponse,
}

/// Result of a mined withdraw, with the refreshed owner flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawResponse {
    pub tx_hash: String,
    pub block_number: Option<u64>,
    pub is_owner: bool,
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }
}
