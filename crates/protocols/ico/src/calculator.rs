//! ICO Calculator
//!
//! Pure payment math. No async, no provider.
//!
//! The mint price is a fixed number of wei per whole token, so the payment
//! for `amount` tokens is `amount * TOKEN_PRICE_WEI` computed in integers.
//! There is deliberately no floating point anywhere in this path.

use alloy::primitives::U256;

use crate::constants::{MAX_TOTAL_SUPPLY_TOKENS, TOKEN_PRICE_WEI};
use crate::state::IcoError;
use tokengate_core::constants::WEI_PER_ETH;

/// Payment required to mint `amount` whole tokens, in wei.
pub fn mint_payment(amount: u64) -> U256 {
    U256::from(amount) * U256::from(TOKEN_PRICE_WEI)
}

/// Reject a mint amount before anything is submitted.
pub fn validate_mint_amount(amount: u64) -> Result<(), IcoError> {
    if amount == 0 {
        return Err(IcoError::InvalidAmount {
            message: "mint amount must be greater than zero".to_string(),
        });
    }
    Ok(())
}

/// The mintable supply ceiling expressed in base units (for display)
pub fn max_total_supply_wei() -> U256 {
    U256::from(MAX_TOTAL_SUPPLY_TOKENS) * U256::from(WEI_PER_ETH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::utils::parse_ether;

    #[test]
    fn mint_payment_is_exact() {
        // 5 tokens cost exactly 0.005 ether, with no precision loss
        assert_eq!(mint_payment(5), parse_ether("0.005").unwrap());
        assert_eq!(mint_payment(1), U256::from(TOKEN_PRICE_WEI));
        assert_eq!(mint_payment(0), U256::ZERO);
    }

    #[test]
    fn mint_payment_is_linear() {
        for (a, b) in [(1u64, 2u64), (3, 1000), (999, 1)] {
            assert_eq!(mint_payment(a) + mint_payment(b), mint_payment(a + b));
        }
    }

    #[test]
    fn mint_payment_never_truncates() {
        // amounts whose ether value is inexact in f64 still come out exact
        let amount = 1_234_567u64;
        let expected = U256::from(amount) * U256::from(TOKEN_PRICE_WEI);
        assert_eq!(mint_payment(amount), expected);
        assert_eq!(
            mint_payment(amount) % U256::from(TOKEN_PRICE_WEI),
            U256::ZERO
        );
    }

    #[test]
    fn mint_payment_handles_huge_amounts() {
        // u64::MAX tokens is far past the supply cap but must not overflow
        let payment = mint_payment(u64::MAX);
        assert_eq!(payment / U256::from(TOKEN_PRICE_WEI), U256::from(u64::MAX));
    }

    #[test]
    fn zero_amount_is_rejected() {
        let err = validate_mint_amount(0).unwrap_err();
        assert!(matches!(err, IcoError::InvalidAmount { .. }));
        assert!(validate_mint_amount(1).is_ok());
    }

    #[test]
    fn max_supply_in_wei() {
        assert_eq!(
            max_total_supply_wei(),
            parse_ether("10000").unwrap()
        );
    }
}
