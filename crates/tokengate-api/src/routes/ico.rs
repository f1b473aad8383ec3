//! Token sale endpoints: summary, claim, mint, withdraw

use alloy::primitives::{utils::format_ether, Address};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use eth_client::EthClient;
use ico::{
    fetch_summary, max_total_supply_wei, submit_claim, submit_mint, submit_withdraw, IcoContracts,
    IcoError, IcoReader, IcoSummary,
};

use crate::dto::{ApiError, MintRequest, SummaryResponse, TxResponse, WithdrawResponse};
use crate::{AppState, WalletSession};

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

/// Create ICO routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(get_summary))
        .route("/claim", post(claim))
        .route("/mint", post(mint))
        .route("/withdraw", post(withdraw))
}

/// GET /ico/summary - The caller's derived view of the sale.
///
/// Reads that fail degrade to zero (`degraded: true`) instead of carrying a
/// stale value forward.
pub async fn get_summary(State(state): State<AppState>) -> ApiResult<Json<SummaryResponse>> {
    let (session, client) = session_and_client(&state).await?;
    let contracts = contracts_for(&state, &client).await?;

    let (summary, degraded) = fetch_summary(&contracts, session.address).await;
    Ok(Json(summary_response(session.address, summary, degraded)))
}

/// POST /ico/claim - Claim the caller's unclaimed token allotments.
///
/// Blocks until the transaction is mined, then returns the refreshed
/// summary. There is no idempotency guard; a second claim with nothing left
/// to claim reverts at the contract.
pub async fn claim(State(state): State<AppState>) -> ApiResult<Json<TxResponse>> {
    let (session, client) = session_and_client(&state).await?;
    let contracts = contracts_for(&state, &client).await?;

    let _guard = state.lock_mutations().await;
    let outcome = submit_claim(&client, contracts.token_address())
        .await
        .map_err(ico_error)?;

    let (summary, degraded) = fetch_summary(&contracts, session.address).await;
    Ok(Json(TxResponse {
        tx_hash: outcome.tx_hash,
        block_number: outcome.block_number,
        summary: summary_response(session.address, summary, degraded),
    }))
}

/// POST /ico/mint - Purchase tokens at the fixed price per unit.
///
/// Zero amounts are rejected before submission; payment is integer wei.
pub async fn mint(
    State(state): State<AppState>,
    Json(request): Json<MintRequest>,
) -> ApiResult<Json<TxResponse>> {
    let (session, client) = session_and_client(&state).await?;
    let contracts = contracts_for(&state, &client).await?;

    let _guard = state.lock_mutations().await;
    let outcome = submit_mint(&client, contracts.token_address(), request.amount)
        .await
        .map_err(ico_error)?;

    let (summary, degraded) = fetch_summary(&contracts, session.address).await;
    Ok(Json(TxResponse {
        tx_hash: outcome.tx_hash,
        block_number: outcome.block_number,
        summary: summary_response(session.address, summary, degraded),
    }))
}

/// POST /ico/withdraw - Withdraw sale proceeds to the contract owner.
///
/// Owner-only by contract-side authorization; a non-owner call reverts on
/// chain and surfaces here as `tx_reverted`.
pub async fn withdraw(State(state): State<AppState>) -> ApiResult<Json<WithdrawResponse>> {
    let (session, client) = session_and_client(&state).await?;
    let contracts = contracts_for(&state, &client).await?;

    let _guard = state.lock_mutations().await;
    let outcome = submit_withdraw(&client, contracts.token_address())
        .await
        .map_err(ico_error)?;

    // Refresh the owner flag after the withdraw
    let is_owner = match contracts.contract_owner().await {
        Ok(owner) => owner == session.address,
        Err(e) => {
            tracing::warn!("owner refresh failed: {}", e);
            false
        }
    };

    Ok(Json(WithdrawResponse {
        tx_hash: outcome.tx_hash,
        block_number: outcome.block_number,
        is_owner,
    }))
}

/// Require a wallet session and its client.
async fn session_and_client(state: &AppState) -> ApiResult<(WalletSession, EthClient)> {
    let session = state.wallet().await.ok_or_else(|| {
        (
            StatusCode::CONFLICT,
            Json(ApiError::new("wallet_not_connected", "No wallet connected")),
        )
    })?;

    let client = state.client().await.ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiError::new("client_unavailable", "RPC client not available")),
        )
    })?;

    Ok((session, client))
}

/// Build contract handles from the configured addresses.
async fn contracts_for(state: &AppState, client: &EthClient) -> ApiResult<IcoContracts> {
    let (nft, token) = state.contract_addresses().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::new("config_error", e.to_string())),
        )
    })?;
    Ok(IcoContracts::new(client, nft, token))
}

fn summary_response(address: Address, summary: IcoSummary, degraded: bool) -> SummaryResponse {
    SummaryResponse {
        address: address.to_string(),
        balance_wei: summary.balance.to_string(),
        balance: format_ether(summary.balance),
        total_minted_wei: summary.total_minted.to_string(),
        total_minted: format_ether(summary.total_minted),
        max_total_supply: format_ether(max_total_supply_wei()),
        claimable: summary.claimable,
        is_owner: summary.is_owner,
        degraded,
    }
}

fn ico_error(e: IcoError) -> (StatusCode, Json<ApiError>) {
    tracing::warn!("ico operation failed: {}", e);
    (
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ApiError::new(e.error_code(), e.to_string())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    #[test]
    fn test_summary_response_formatting() {
        let summary = IcoSummary {
            balance: U256::from(1_500_000_000_000_000_000u128), // 1.5 tokens
            total_minted: U256::from(5_000_000_000_000_000_000u128),
            claimable: 2,
            is_owner: false,
        };
        let address = Address::repeat_byte(0x42);

        let response = summary_response(address, summary, false);

        assert_eq!(response.balance_wei, "1500000000000000000");
        assert!(response.balance.starts_with("1.5"));
        assert!(response.total_minted.starts_with('5'));
        assert!(response.max_total_supply.starts_with("10000"));
        assert_eq!(response.claimable, 2);
        assert!(!response.degraded);
    }

    #[test]
    fn test_ico_error_mapping() {
        let (status, Json(body)) = ico_error(IcoError::InvalidAmount {
            message: "zero".into(),
        });
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "invalid_amount");
    }
}
