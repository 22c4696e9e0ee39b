//! Category aggregation and credit classification.
//!
//! Both stages place a 1-5 score into one of five risk bands. Scores are
//! rounded to two decimals (midpoint away from zero) before the band
//! comparison, so 4.499999 and 4.5 land in the same band whatever
//! arithmetic produced them.

pub mod categories;
pub mod classification;

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept before a score is compared against band bounds.
pub const BAND_COMPARISON_DP: u32 = 2;

/// Apply the band rounding rule.
pub fn round_for_banding(score: Decimal) -> Decimal {
    score.round_dp_with_strategy(BAND_COMPARISON_DP, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_for_banding() {
        assert_eq!(round_for_banding(dec!(4.495)), dec!(4.50));
        assert_eq!(round_for_banding(dec!(4.4949)), dec!(4.49));
        assert_eq!(round_for_banding(dec!(4.3125)), dec!(4.31));
        assert_eq!(round_for_banding(dec!(5)), dec!(5));
    }
}
