//! Error types for Tokengate

use thiserror::Error;

/// Core errors that can occur in Tokengate
#[derive(Debug, Error)]
pub enum Error {
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Provider connection and remote call errors
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("RPC endpoint unreachable at {url}")]
    Unreachable { url: String },

    #[error("Wrong network: connected chain id {actual}, expected {expected}")]
    WrongNetwork { expected: u64, actual: u64 },

    #[error("RPC request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Remote call failed: {message}")]
    CallFailed { message: String },

    #[error("Invalid signer key: {message}")]
    InvalidSignerKey { message: String },
}

/// Result type alias for Tokengate operations
pub type Result<T> = std::result::Result<T, Error>;

impl RpcError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unreachable { .. } => "rpc_unreachable",
            Self::WrongNetwork { .. } => "network_mismatch",
            Self::Timeout { .. } => "rpc_timeout",
            Self::CallFailed { .. } => "rpc_error",
            Self::InvalidSignerKey { .. } => "invalid_signer_key",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::WrongNetwork { .. } => 409,
            Self::InvalidSignerKey { .. } => 400,
            Self::Unreachable { .. } | Self::Timeout { .. } => 503,
            Self::CallFailed { .. } => 502,
        }
    }
}
