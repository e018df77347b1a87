//! Core domain types shared by the Quotedeck crates.

mod bar;
mod enriched;

pub use bar::Bar;
pub use enriched::{EnrichedBar, MOVING_AVERAGE_PERIODS};

use rust_decimal::{Decimal, RoundingStrategy};

/// Alias for price values. Prices are always positive decimals.
pub type Price = Decimal;

/// Alias for traded volume.
pub type Volume = u64;

/// Number of decimal places every published price or indicator value carries.
pub const DISPLAY_SCALE: u32 = 2;

/// Rounds a value to two decimal places, resolving midpoints away from zero
/// (`0.125` becomes `0.13`, not the banker's `0.12`).
///
/// Values that round to zero come back as positive zero.
pub fn round_to_cents(value: Decimal) -> Decimal {
    let rounded = value.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::round_to_cents;

    #[test]
    fn rounds_midpoints_away_from_zero() {
        assert_eq!(round_to_cents(dec!(0.125)), dec!(0.13));
        assert_eq!(round_to_cents(dec!(-0.125)), dec!(-0.13));
        assert_eq!(round_to_cents(dec!(99.00990099)), dec!(99.01));
    }

    #[test]
    fn tiny_negatives_round_to_positive_zero() {
        let rounded = round_to_cents(dec!(-0.0000001));
        assert!(rounded.is_zero());
        assert!(rounded.is_sign_positive());
    }

    #[test]
    fn keeps_short_values_untouched() {
        assert_eq!(round_to_cents(dec!(12)), dec!(12));
        assert_eq!(round_to_cents(dec!(7.5)), dec!(7.5));
    }
}
