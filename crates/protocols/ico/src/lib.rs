//! NFT-gated token sale protocol
//!
//! Holders of the configured NFT collection claim a fixed allotment of gate
//! tokens once per NFT id; anyone can purchase additional tokens at a fixed
//! price per unit. The contract owner withdraws accumulated proceeds.

pub mod bindings;
pub mod calculator;
pub mod constants;
pub mod fetch;
pub mod state;
pub mod tx_builder;

// Re-exports
pub use calculator::{max_total_supply_wei, mint_payment, validate_mint_amount};
pub use fetch::{claimable_tokens, fetch_summary, IcoContracts, IcoReader};
pub use state::{IcoError, IcoSummary, TxOutcome};
pub use tx_builder::{submit_claim, submit_mint, submit_withdraw};
