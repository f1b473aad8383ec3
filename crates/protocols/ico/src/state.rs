//! ICO state types
//!
//! Derived per-caller view of the sale plus the protocol error enum.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The caller's derived view of the token sale.
///
/// All four values are recomputed together after every mutating operation;
/// nothing here is cached across refreshes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IcoSummary {
    /// Caller's gate-token balance, in base units (18 decimals)
    pub balance: U256,
    /// Total gate tokens minted across all users, in base units
    pub total_minted: U256,
    /// Number of NFT-held allotments the caller has not claimed yet
    pub claimable: u64,
    /// Whether the caller is the token contract's privileged owner
    pub is_owner: bool,
}

impl IcoSummary {
    /// The safe default every failed refresh degrades to
    pub fn zeroed() -> Self {
        Self {
            balance: U256::ZERO,
            total_minted: U256::ZERO,
            claimable: 0,
            is_owner: false,
        }
    }
}

/// Result of a mined transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxOutcome {
    /// Transaction hash, 0x-prefixed hex
    pub tx_hash: String,
    /// Block the transaction was included in, if the node reported one
    pub block_number: Option<u64>,
}

/// ICO protocol errors
#[derive(Debug, Error)]
pub enum IcoError {
    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Transaction reverted: {tx_hash}")]
    Reverted { tx_hash: String },

    #[error("NFT count {count} exceeds the scannable range")]
    NftCountOverflow { count: U256 },
}

impl IcoError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount { .. } => "invalid_amount",
            Self::Rpc(..) => "rpc_error",
            Self::Reverted { .. } => "tx_reverted",
            Self::NftCountOverflow { .. } => "nft_count_overflow",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAmount { .. } => 400,
            Self::Reverted { .. } => 422,
            Self::Rpc(..) | Self::NftCountOverflow { .. } => 502,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = IcoError::InvalidAmount {
            message: "test".into(),
        };
        assert_eq!(err.error_code(), "invalid_amount");
        assert_eq!(err.status_code(), 400);

        let err = IcoError::Reverted {
            tx_hash: "0xabc".into(),
        };
        assert_eq!(err.error_code(), "tx_reverted");
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_zeroed_summary() {
        let summary = IcoSummary::zeroed();
        assert_eq!(summary.balance, U256::ZERO);
        assert_eq!(summary.total_minted, U256::ZERO);
        assert_eq!(summary.claimable, 0);
        assert!(!summary.is_owner);
    }
}
