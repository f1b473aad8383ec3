//! Application state shared across API handlers

use std::sync::Arc;
use std::time::Instant;

use alloy::primitives::Address;
use eth_client::EthClient;
use tokengate_core::{AppConfig, Error, Network, RpcConfig, RpcError};
use tokio::sync::{Mutex, MutexGuard, RwLock};

/// State representing a connected wallet session.
///
/// Exists only after a successful connect against the configured network;
/// a chain-id mismatch means this is never constructed.
#[derive(Clone, Debug)]
pub struct WalletSession {
    /// The signer address this session acts as
    pub address: Address,
    /// Chain id verified at connect time
    pub chain_id: u64,
    /// When the wallet was connected
    pub connected_at: Instant,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RwLock<AppConfig>,
    client: RwLock<Option<EthClient>>,
    wallet: RwLock<Option<WalletSession>>,
    /// Serializes mutating operations. A UI loading flag alone cannot stop
    /// two rapid triggers from submitting two transactions.
    mutation_gate: Mutex<()>,
}

impl AppState {
    /// Create a new application state with default config
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create with a specific config
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config: RwLock::new(config),
                client: RwLock::new(None),
                wallet: RwLock::new(None),
                mutation_gate: Mutex::new(()),
            }),
        }
    }

    /// Get current config
    pub async fn config(&self) -> AppConfig {
        self.inner.config.read().await.clone()
    }

    /// Get current network
    pub async fn network(&self) -> Network {
        self.inner.config.read().await.network
    }

    /// Update the RPC configuration.
    ///
    /// Clears the cached client and the wallet session: both are bound to
    /// the previous endpoint.
    pub async fn set_rpc_config(&self, rpc: RpcConfig) {
        let mut config = self.inner.config.write().await;
        config.rpc = rpc;

        let mut client = self.inner.client.write().await;
        *client = None;
        let mut wallet = self.inner.wallet.write().await;
        *wallet = None;
    }

    /// Get the connected client, if any
    pub async fn client(&self) -> Option<EthClient> {
        self.inner.client.read().await.clone()
    }

    /// Get current wallet session
    pub async fn wallet(&self) -> Option<WalletSession> {
        self.inner.wallet.read().await.clone()
    }

    /// Open the wallet session against the configured network.
    ///
    /// A network mismatch (or any connect failure) returns the error before
    /// any state changes; only a verified connection is stored.
    pub async fn connect(&self) -> Result<WalletSession, RpcError> {
        let config = self.config().await;
        let client = EthClient::connect(config.rpc, config.network).await?;

        let session = WalletSession {
            address: client.signer_address(),
            chain_id: client.chain_id(),
            connected_at: Instant::now(),
        };

        *self.inner.client.write().await = Some(client);
        *self.inner.wallet.write().await = Some(session.clone());

        tracing::info!(
            address = %session.address,
            chain_id = session.chain_id,
            "wallet connected"
        );
        Ok(session)
    }

    /// Disconnect wallet (clear session and client)
    pub async fn disconnect(&self) {
        *self.inner.wallet.write().await = None;
        *self.inner.client.write().await = None;
        tracing::info!("wallet disconnected");
    }

    /// Parse the configured contract addresses
    pub async fn contract_addresses(&self) -> Result<(Address, Address), Error> {
        let config = self.config().await;
        let nft = config
            .contracts
            .nft_address
            .parse()
            .map_err(|e| Error::Config(format!("invalid NFT contract address: {e}")))?;
        let token = config
            .contracts
            .token_address
            .parse()
            .map_err(|e| Error::Config(format!("invalid token contract address: {e}")))?;
        Ok((nft, token))
    }

    /// Hold the returned guard for the duration of a mutating operation
    pub async fn lock_mutations(&self) -> MutexGuard<'_, ()> {
        self.inner.mutation_gate.lock().await
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokengate_core::ContractsConfig;

    fn test_config() -> AppConfig {
        AppConfig {
            contracts: ContractsConfig {
                nft_address: "0x1111111111111111111111111111111111111111".to_string(),
                token_address: "0x2222222222222222222222222222222222222222".to_string(),
            },
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_contract_addresses_parse() {
        let state = AppState::with_config(test_config());
        let (nft, token) = state.contract_addresses().await.unwrap();
        assert_eq!(nft, Address::repeat_byte(0x11));
        assert_eq!(token, Address::repeat_byte(0x22));
    }

    #[tokio::test]
    async fn test_contract_addresses_reject_unconfigured() {
        let state = AppState::new();
        let err = state.contract_addresses().await.unwrap_err();
        assert!(matches!(err, Error::Config(..)));
    }

    #[tokio::test]
    async fn test_failed_connect_leaves_no_session() {
        let mut config = test_config();
        config.rpc.url = "not a url".to_string();
        let state = AppState::with_config(config);

        assert!(state.connect().await.is_err());
        assert!(state.wallet().await.is_none());
        assert!(state.client().await.is_none());
    }

    #[tokio::test]
    async fn test_set_rpc_config_clears_session_state() {
        let state = AppState::with_config(test_config());
        state
            .set_rpc_config(RpcConfig {
                url: "http://10.0.0.1:8545".to_string(),
                wallet_key: String::new(),
            })
            .await;

        assert_eq!(state.config().await.rpc.url, "http://10.0.0.1:8545");
        assert!(state.wallet().await.is_none());
        assert!(state.client().await.is_none());
    }
}
