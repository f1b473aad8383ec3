//! Core type definitions for Tokengate

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ethereum network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Goerli,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Goerli => "goerli",
        }
    }

    /// EIP-155 chain id for this network
    pub fn chain_id(&self) -> u64 {
        match self {
            Self::Mainnet => 1,
            Self::Goerli => 5,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Block height
pub type BlockHeight = u64;

/// Constants
pub mod constants {
    /// 1 ether in wei
    pub const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

    /// Decimals of both ether and the gate token
    pub const TOKEN_DECIMALS: u8 = 18;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_chain_ids() {
        assert_eq!(Network::Mainnet.chain_id(), 1);
        assert_eq!(Network::Goerli.chain_id(), 5);
    }

    #[test]
    fn test_network_display() {
        assert_eq!(Network::Mainnet.as_str(), "mainnet");
        assert_eq!(Network::Goerli.as_str(), "goerli");
    }

    #[test]
    fn test_network_serde_lowercase() {
        let json = serde_json::to_string(&Network::Goerli).unwrap();
        assert_eq!(json, "\"goerli\"");
        let parsed: Network = serde_json::from_str("\"mainnet\"").unwrap();
        assert_eq!(parsed, Network::Mainnet);
    }
}
