//! Mutating operations: claim, mint, withdraw
//!
//! Each submits one transaction and blocks until it is mined. There are no
//! retries and no idempotency guards: a duplicate claim or an unauthorized
//! withdraw is rejected by the contract, not here.

use alloy::network::Ethereum;
use alloy::primitives::{Address, U256};
use alloy::providers::PendingTransactionBuilder;
use eth_client::EthClient;

use crate::bindings::IGateToken;
use crate::calculator::{mint_payment, validate_mint_amount};
use crate::state::{IcoError, TxOutcome};

/// Claim the caller's token allotment for every unclaimed NFT they hold.
pub async fn submit_claim(
    client: &EthClient,
    token_address: Address,
) -> Result<TxOutcome, IcoError> {
    let token = IGateToken::new(token_address, client.provider());
    let pending = token
        .claim()
        .send()
        .await
        .map_err(|e| IcoError::Rpc(e.to_string()))?;

    tracing::info!(token = %token_address, "claim submitted, waiting for inclusion");
    finalize(client, pending).await
}

/// Purchase `amount` whole tokens at the fixed price per unit.
///
/// The payment is computed in integer wei; amount 0 is rejected before
/// anything reaches the network.
pub async fn submit_mint(
    client: &EthClient,
    token_address: Address,
    amount: u64,
) -> Result<TxOutcome, IcoError> {
    validate_mint_amount(amount)?;

    let payment = mint_payment(amount);
    let token = IGateToken::new(token_address, client.provider());
    let pending = token
        .mint(U256::from(amount))
        .value(payment)
        .send()
        .await
        .map_err(|e| IcoError::Rpc(e.to_string()))?;

    tracing::info!(
        token = %token_address,
        amount,
        payment_wei = %payment,
        "mint submitted, waiting for inclusion"
    );
    finalize(client, pending).await
}

/// Withdraw accumulated ether to the contract owner.
///
/// Owner-only by contract-side authorization; this client does not duplicate
/// the check, a non-owner call reverts on chain.
pub async fn submit_withdraw(
    client: &EthClient,
    token_address: Address,
) -> Result<TxOutcome, IcoError> {
    let token = IGateToken::new(token_address, client.provider());
    let pending = token
        .withdraw()
        .send()
        .await
        .map_err(|e| IcoError::Rpc(e.to_string()))?;

    tracing::info!(token = %token_address, "withdraw submitted, waiting for inclusion");
    finalize(client, pending).await
}

/// Wait for inclusion and convert the receipt into a [`TxOutcome`].
async fn finalize(
    client: &EthClient,
    pending: PendingTransactionBuilder<Ethereum>,
) -> Result<TxOutcome, IcoError> {
    let receipt = client
        .wait_for_receipt(pending)
        .await
        .map_err(|e| IcoError::Rpc(e.to_string()))?;

    let tx_hash = receipt.transaction_hash.to_string();
    if !receipt.status() {
        return Err(IcoError::Reverted { tx_hash });
    }

    tracing::info!(tx = %tx_hash, block = ?receipt.block_number, "transaction mined");
    Ok(TxOutcome {
        tx_hash,
        block_number: receipt.block_number,
    })
}
