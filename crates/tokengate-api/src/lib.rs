//! Tokengate-api: HTTP API layer for Tokengate
//!
//! Provides the RESTful surface the single-page frontend talks to.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::{AppState, WalletSession};
