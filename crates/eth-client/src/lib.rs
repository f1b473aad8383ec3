//! eth-client: Wrapper around an alloy HTTP provider with network verification
//!
//! This crate provides a high-level client for talking to an Ethereum JSON-RPC
//! endpoint: provider construction with a local signing wallet, a chain-id
//! check against the configured network, and timeout-wrapped remote calls.

use std::future::IntoFuture;
use std::time::Duration;

use alloy::network::{Ethereum, EthereumWallet};
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy_signer_local::PrivateKeySigner;
use tokengate_core::{BlockHeight, Network, RpcConfig, RpcError};
use url::Url;

/// Default timeout for JSON-RPC calls (30 seconds).
/// Long enough for slow endpoints, short enough to avoid perpetual spinners.
const RPC_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for waiting on transaction inclusion (2 minutes).
const TX_CONFIRM_TIMEOUT: Duration = Duration::from_secs(120);

/// Result type for client operations
pub type Result<T> = std::result::Result<T, RpcError>;

/// High-level Ethereum client bound to one signing wallet and one endpoint
#[derive(Clone)]
pub struct EthClient {
    provider: DynProvider,
    signer_address: Address,
    chain_id: u64,
    url: String,
}

impl EthClient {
    /// Connect to the endpoint and verify it serves the expected network.
    ///
    /// Fails with [`RpcError::WrongNetwork`] before anything else can happen
    /// when the endpoint's chain id differs from `network`.
    pub async fn connect(config: RpcConfig, network: Network) -> Result<Self> {
        let client = Self::connect_any_network(config).await?;
        ensure_chain(network.chain_id(), client.chain_id)?;
        Ok(client)
    }

    /// Connect without pinning a network (used by the deployer, which
    /// targets whatever chain the operator pointed the RPC URL at).
    pub async fn connect_any_network(config: RpcConfig) -> Result<Self> {
        let url = Url::parse(&config.url).map_err(|e| RpcError::Unreachable {
            url: format!("{}: {}", config.url, e),
        })?;

        let signer: PrivateKeySigner =
            config
                .wallet_key
                .parse()
                .map_err(|e: alloy_signer_local::LocalSignerError| RpcError::InvalidSignerKey {
                    message: e.to_string(),
                })?;
        let signer_address = signer.address();

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url)
            .erased();

        let chain_id = timed_request(provider.get_chain_id()).await?;
        tracing::debug!(url = %config.url, signer = %signer_address, chain_id, "provider connected");

        Ok(Self {
            provider,
            signer_address,
            chain_id,
            url: config.url,
        })
    }

    /// Get the underlying provider (for contract bindings)
    pub fn provider(&self) -> DynProvider {
        self.provider.clone()
    }

    /// Address of the signing wallet
    pub fn signer_address(&self) -> Address {
        self.signer_address
    }

    /// Chain id observed at connect time
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The endpoint URL this client talks to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the current block number
    pub async fn block_number(&self) -> Result<BlockHeight> {
        timed_request(self.provider.get_block_number()).await
    }

    /// Check if the endpoint responds
    pub async fn is_online(&self) -> bool {
        timed_request(self.provider.get_block_number()).await.is_ok()
    }

    /// Get the native (ether) balance of an address, in wei
    pub async fn native_balance(&self, address: Address) -> Result<U256> {
        timed_request(self.provider.get_balance(address).into_future()).await
    }

    /// Submit a raw transaction request (contract creation, value transfer)
    pub async fn send_transaction(
        &self,
        tx: TransactionRequest,
    ) -> Result<PendingTransactionBuilder<Ethereum>> {
        timed_request(self.provider.send_transaction(tx)).await
    }

    /// Block until the pending transaction is mined and return its receipt.
    ///
    /// There is no cancellation: callers that go away simply abandon the wait.
    pub async fn wait_for_receipt(
        &self,
        pending: PendingTransactionBuilder<Ethereum>,
    ) -> Result<TransactionReceipt> {
        tokio::time::timeout(TX_CONFIRM_TIMEOUT, pending.get_receipt())
            .await
            .map_err(|_| RpcError::Timeout {
                seconds: TX_CONFIRM_TIMEOUT.as_secs(),
            })?
            .map_err(|e| RpcError::CallFailed {
                message: e.to_string(),
            })
    }
}

impl std::fmt::Debug for EthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EthClient")
            .field("url", &self.url)
            .field("signer_address", &self.signer_address)
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

/// Reject a chain id that does not match the configured network.
fn ensure_chain(expected: u64, actual: u64) -> Result<()> {
    if expected != actual {
        return Err(RpcError::WrongNetwork { expected, actual });
    }
    Ok(())
}

/// Wrap a remote call with a timeout. Converts both timeout and RPC errors to RpcError.
async fn timed_request<T, E: std::fmt::Display>(
    fut: impl std::future::Future<Output = std::result::Result<T, E>>,
) -> Result<T> {
    tokio::time::timeout(RPC_REQUEST_TIMEOUT, fut)
        .await
        .map_err(|_| RpcError::Timeout {
            seconds: RPC_REQUEST_TIMEOUT.as_secs(),
        })?
        .map_err(|e| RpcError::CallFailed {
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::node_bindings::Anvil;

    #[test]
    fn test_ensure_chain_accepts_match() {
        assert!(ensure_chain(5, 5).is_ok());
    }

    #[test]
    fn test_ensure_chain_rejects_mismatch() {
        let err = ensure_chain(5, 1).unwrap_err();
        match err {
            RpcError::WrongNetwork { expected, actual } => {
                assert_eq!(expected, 5);
                assert_eq!(actual, 1);
            }
            other => panic!("expected WrongNetwork, got {other}"),
        }
    }

    #[test]
    fn test_connect_rejects_bad_url() {
        let config = RpcConfig {
            url: "not a url".to_string(),
            wallet_key: String::new(),
        };
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let err = rt
            .block_on(EthClient::connect_any_network(config))
            .unwrap_err();
        assert!(matches!(err, RpcError::Unreachable { .. }));
    }

    #[test]
    fn test_connect_rejects_bad_key() {
        let config = RpcConfig {
            url: "http://127.0.0.1:8545".to_string(),
            wallet_key: "zz".to_string(),
        };
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let err = rt
            .block_on(EthClient::connect_any_network(config))
            .unwrap_err();
        assert!(matches!(err, RpcError::InvalidSignerKey { .. }));
    }

    #[tokio::test]
    #[ignore] // requires a local anvil binary
    async fn test_connect_against_anvil() {
        let anvil = Anvil::new().spawn();
        let config = RpcConfig {
            url: anvil.endpoint(),
            wallet_key: hex::encode(anvil.keys()[0].to_bytes()),
        };

        // Anvil's default chain id is neither mainnet nor goerli
        let err = EthClient::connect(config.clone(), Network::Goerli)
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::WrongNetwork { expected: 5, .. }));

        let client = EthClient::connect_any_network(config).await.unwrap();
        assert_eq!(client.signer_address(), anvil.addresses()[0]);
        assert_eq!(client.chain_id(), anvil.chain_id());
        assert!(client.is_online().await);
    }
}
