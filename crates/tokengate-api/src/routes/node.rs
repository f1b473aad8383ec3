//! RPC endpoint status and configuration endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use tokengate_core::RpcConfig;

use crate::dto::{ApiError, NodeStatusResponse, RpcConfigRequest};
use crate::AppState;

/// Create node routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(get_status))
        .route("/configure", post(configure))
}

/// GET /node/status - Get current RPC endpoint status
pub async fn get_status(
    State(state): State<AppState>,
) -> Result<Json<NodeStatusResponse>, (StatusCode, Json<ApiError>)> {
    let config = state.config().await;

    match state.client().await {
        Some(client) => {
            let block_height = client.block_number().await.ok();
            Ok(Json(NodeStatusResponse {
                connected: block_height.is_some(),
                url: config.rpc.url,
                network: config.network.as_str().to_string(),
                chain_id: Some(client.chain_id()),
                block_height,
            }))
        }
        None => Ok(Json(NodeStatusResponse {
            connected: false,
            url: config.rpc.url,
            network: config.network.as_str().to_string(),
            chain_id: None,
            block_height: None,
        })),
    }
}

/// POST /node/configure - Update the RPC endpoint
pub async fn configure(
    State(state): State<AppState>,
    Json(request): Json<RpcConfigRequest>,
) -> Result<Json<NodeStatusResponse>, (StatusCode, Json<ApiError>)> {
    // Keep the signer key; only the endpoint moves
    let wallet_key = state.config().await.rpc.wallet_key;
    state
        .set_rpc_config(RpcConfig {
            url: request.url,
            wallet_key,
        })
        .await;

    get_status(State(state)).await
}
