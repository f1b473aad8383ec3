//! Configuration types for Tokengate

use serde::{Deserialize, Serialize};

use crate::Network;

/// RPC endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL (e.g., "http://127.0.0.1:8545")
    pub url: String,

    /// Hex-encoded private key of the signing wallet (optional until connect)
    #[serde(default)]
    pub wallet_key: String,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8545".to_string(),
            wallet_key: String::new(),
        }
    }
}

/// Addresses of the deployed contracts the client talks to
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractsConfig {
    /// NFT collection contract (claim eligibility source)
    #[serde(default)]
    pub nft_address: String,

    /// Gate token contract (the ERC20 this system deploys)
    #[serde(default)]
    pub token_address: String,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// RPC endpoint settings
    pub rpc: RpcConfig,

    /// Target network; any other chain id is rejected at connect time
    pub network: Network,

    /// Deployed contract addresses
    pub contracts: ContractsConfig,

    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,
}

fn default_api_port() -> u16 {
    18545
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc: RpcConfig::default(),
            network: Network::Goerli,
            contracts: ContractsConfig::default(),
            api_port: default_api_port(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `TOKENGATE_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        Self::default().overlaid(|key| std::env::var(key).ok())
    }

    fn overlaid(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("TOKENGATE_RPC_URL") {
            self.rpc.url = url;
        }
        if let Some(key) = lookup("TOKENGATE_WALLET_KEY") {
            self.rpc.wallet_key = key;
        }
        if let Some(network) = lookup("TOKENGATE_NETWORK") {
            match network.as_str() {
                "mainnet" => self.network = Network::Mainnet,
                "goerli" => self.network = Network::Goerli,
                _ => {}
            }
        }
        if let Some(addr) = lookup("TOKENGATE_NFT_ADDRESS") {
            self.contracts.nft_address = addr;
        }
        if let Some(addr) = lookup("TOKENGATE_TOKEN_ADDRESS") {
            self.contracts.token_address = addr;
        }
        if let Some(port) = lookup("TOKENGATE_API_PORT") {
            if let Ok(port) = port.parse() {
                self.api_port = port;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.rpc.url, "http://127.0.0.1:8545");
        assert_eq!(config.network, Network::Goerli);
        assert_eq!(config.api_port, 18545);
        assert!(config.contracts.nft_address.is_empty());
        assert!(config.contracts.token_address.is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.rpc.url, config.rpc.url);
        assert_eq!(parsed.network, config.network);
    }

    #[test]
    fn test_overlay_applies_known_keys() {
        let mut vars = HashMap::new();
        vars.insert("TOKENGATE_RPC_URL", "http://10.0.0.1:8545");
        vars.insert("TOKENGATE_NETWORK", "mainnet");
        vars.insert("TOKENGATE_NFT_ADDRESS", "0x1111111111111111111111111111111111111111");
        vars.insert("TOKENGATE_API_PORT", "9000");

        let config =
            AppConfig::default().overlaid(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.rpc.url, "http://10.0.0.1:8545");
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(
            config.contracts.nft_address,
            "0x1111111111111111111111111111111111111111"
        );
        assert_eq!(config.api_port, 9000);
        // untouched keys keep their defaults
        assert!(config.rpc.wallet_key.is_empty());
        assert!(config.contracts.token_address.is_empty());
    }

    #[test]
    fn test_overlay_ignores_invalid_values() {
        let mut vars = HashMap::new();
        vars.insert("TOKENGATE_NETWORK", "ropsten");
        vars.insert("TOKENGATE_API_PORT", "not-a-port");

        let config =
            AppConfig::default().overlaid(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.network, Network::Goerli);
        assert_eq!(config.api_port, 18545);
    }
}
