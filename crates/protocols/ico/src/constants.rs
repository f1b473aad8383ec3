//! ICO protocol constants

/// Price of one gate token, in wei (0.001 ether)
pub const TOKEN_PRICE_WEI: u128 = 1_000_000_000_000_000;

/// Maximum mintable supply, in whole tokens (displayed as "minted/total")
pub const MAX_TOTAL_SUPPLY_TOKENS: u64 = 10_000;

/// How many reads of the claim scan are in flight at once
pub const SCAN_CONCURRENCY: usize = 8;
