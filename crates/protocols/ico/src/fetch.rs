//! Chain reads: per-caller summary values and the claimable-count scan

use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;
use async_trait::async_trait;
use eth_client::EthClient;
use futures::stream::{self, StreamExt, TryStreamExt};

use crate::bindings::{IGateToken, INftCollection};
use crate::constants::SCAN_CONCURRENCY;
use crate::state::{IcoError, IcoSummary};

/// Read access to the sale's on-chain state.
///
/// The live implementation is [`IcoContracts`]; tests substitute an
/// in-memory ledger so the scan logic can be exercised without a node.
#[async_trait]
pub trait IcoReader {
    /// Caller's gate-token balance, in base units
    async fn token_balance(&self, account: Address) -> Result<U256, IcoError>;

    /// Total gate tokens minted across all users
    async fn total_minted(&self) -> Result<U256, IcoError>;

    /// The token contract's privileged owner
    async fn contract_owner(&self) -> Result<Address, IcoError>;

    /// Number of NFTs `owner` holds (bounds the claim scan)
    async fn owned_nft_count(&self, owner: Address) -> Result<u64, IcoError>;

    /// Token id of the owner's NFT at `index` (0-based)
    async fn owned_nft_at(&self, owner: Address, index: u64) -> Result<U256, IcoError>;

    /// Whether the allotment for this NFT id has already been claimed
    async fn is_claimed(&self, token_id: U256) -> Result<bool, IcoError>;
}

/// Count the owner's NFTs whose token allotment has not been claimed yet.
///
/// Two batched phases: fetch every owned token id, then every claimed flag,
/// each with at most [`SCAN_CONCURRENCY`] reads in flight. Whatever the
/// batching, the result is the size of the unclaimed subset: never negative
/// and never more than the owner's NFT count.
pub async fn claimable_tokens<R>(reader: &R, owner: Address) -> Result<u64, IcoError>
where
    R: IcoReader + Sync,
{
    let count = reader.owned_nft_count(owner).await?;
    if count == 0 {
        return Ok(0);
    }

    let ids: Vec<U256> = stream::iter((0..count).map(|index| reader.owned_nft_at(owner, index)))
        .buffered(SCAN_CONCURRENCY)
        .try_collect()
        .await?;

    let flags: Vec<bool> = stream::iter(ids.into_iter().map(|id| reader.is_claimed(id)))
        .buffered(SCAN_CONCURRENCY)
        .try_collect()
        .await?;

    Ok(flags.into_iter().filter(|claimed| !claimed).count() as u64)
}

/// Fetch the caller's full derived view in one pass.
///
/// A failed read degrades its value to zero (or false for the owner flag)
/// instead of surfacing a stale number; the returned flag reports whether
/// any value was degraded. Under-reporting beats showing claimables the
/// caller does not have.
pub async fn fetch_summary<R>(reader: &R, account: Address) -> (IcoSummary, bool)
where
    R: IcoReader + Sync,
{
    let mut degraded = false;

    let balance = match reader.token_balance(account).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("token balance read failed: {}", e);
            degraded = true;
            U256::ZERO
        }
    };

    let total_minted = match reader.total_minted().await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("total supply read failed: {}", e);
            degraded = true;
            U256::ZERO
        }
    };

    let claimable = match claimable_tokens(reader, account).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("claimable scan failed: {}", e);
            degraded = true;
            0
        }
    };

    let is_owner = match reader.contract_owner().await {
        Ok(owner) => owner == account,
        Err(e) => {
            tracing::warn!("owner read failed: {}", e);
            degraded = true;
            false
        }
    };

    (
        IcoSummary {
            balance,
            total_minted,
            claimable,
            is_owner,
        },
        degraded,
    )
}

/// Handles to the two deployed contracts behind one provider
#[derive(Clone)]
pub struct IcoContracts {
    provider: DynProvider,
    nft_address: Address,
    token_address: Address,
}

impl IcoContracts {
    pub fn new(client: &EthClient, nft_address: Address, token_address: Address) -> Self {
        Self {
            provider: client.provider(),
            nft_address,
            token_address,
        }
    }

    pub fn nft_address(&self) -> Address {
        self.nft_address
    }

    pub fn token_address(&self) -> Address {
        self.token_address
    }
}

#[async_trait]
impl IcoReader for IcoContracts {
    async fn token_balance(&self, account: Address) -> Result<U256, IcoError> {
        IGateToken::new(self.token_address, self.provider.clone())
            .balanceOf(account)
            .call()
            .await
            .map_err(|e| IcoError::Rpc(e.to_string()))
    }

    async fn total_minted(&self) -> Result<U256, IcoError> {
        IGateToken::new(self.token_address, self.provider.clone())
            .totalSupply()
            .call()
            .await
            .map_err(|e| IcoError::Rpc(e.to_string()))
    }

    async fn contract_owner(&self) -> Result<Address, IcoError> {
        // Comparing parsed addresses makes the owner check independent of
        // the hex casing either side reports.
        IGateToken::new(self.token_address, self.provider.clone())
            .owner()
            .call()
            .await
            .map_err(|e| IcoError::Rpc(e.to_string()))
    }

    async fn owned_nft_count(&self, owner: Address) -> Result<u64, IcoError> {
        let count = INftCollection::new(self.nft_address, self.provider.clone())
            .balanceOf(owner)
            .call()
            .await
            .map_err(|e| IcoError::Rpc(e.to_string()))?;
        u64::try_from(count).map_err(|_| IcoError::NftCountOverflow { count })
    }

    async fn owned_nft_at(&self, owner: Address, index: u64) -> Result<U256, IcoError> {
        INftCollection::new(self.nft_address, self.provider.clone())
            .tokenOfOwnerByIndex(owner, U256::from(index))
            .call()
            .await
            .map_err(|e| IcoError::Rpc(e.to_string()))
    }

    async fn is_claimed(&self, token_id: U256) -> Result<bool, IcoError> {
        IGateToken::new(self.token_address, self.provider.clone())
            .tokenIdsClaimed(token_id)
            .call()
            .await
            .map_err(|e| IcoError::Rpc(e.to_string()))
    }
}
