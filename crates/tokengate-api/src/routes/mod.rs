//! API route handlers

pub mod health;
pub mod ico;
pub mod node;
pub mod wallet;

use axum::{routing::get, Router};

use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/node", node::router())
        .nest("/wallet", wallet::router())
        .nest("/ico", ico::router())
        .with_state(state)
}
