//! Wallet session endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::dto::{ApiError, WalletStatusResponse};
use crate::AppState;

/// Create wallet routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/connect", post(connect))
        .route("/status", get(get_status))
        .route("/disconnect", post(disconnect))
}

/// POST /wallet/connect - Open the wallet session on the configured network.
///
/// A chain-id mismatch is rejected with `network_mismatch` before any
/// session state exists; the page stays on its "Connect Wallet" state.
pub async fn connect(
    State(state): State<AppState>,
) -> Result<Json<WalletStatusResponse>, (StatusCode, Json<ApiError>)> {
    let session = state.connect().await.map_err(|e| {
        tracing::warn!("wallet connect failed: {}", e);
        (
            StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(ApiError::new(e.error_code(), e.to_string())),
        )
    })?;

    Ok(Json(WalletStatusResponse {
        connected: true,
        address: Some(session.address.to_string()),
        chain_id: Some(session.chain_id),
    }))
}

/// GET /wallet/status - Get wallet connection status
pub async fn get_status(State(state): State<AppState>) -> Json<WalletStatusResponse> {
    let wallet = state.wallet().await;

    Json(WalletStatusResponse {
        connected: wallet.is_some(),
        address: wallet.as_ref().map(|w| w.address.to_string()),
        chain_id: wallet.map(|w| w.chain_id),
    })
}

/// POST /wallet/disconnect - Drop the wallet session
pub async fn disconnect(State(state): State<AppState>) -> Json<WalletStatusResponse> {
    state.disconnect().await;

    Json(WalletStatusResponse {
        connected: false,
        address: None,
        chain_id: None,
    })
}
