//! Moving Average Convergence Divergence indicator implementation.

use rust_decimal::Decimal;

use crate::core::{Indicator, IndicatorError};
use crate::indicators::ema::Ema;

/// MACD output (line, signal line, and histogram), unrounded.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MacdOutput {
    /// MACD line value (fast EMA minus slow EMA).
    pub macd: Decimal,
    /// Signal line value (EMA of the MACD line).
    pub signal: Decimal,
    /// Histogram representing the distance between MACD and signal lines.
    pub histogram: Decimal,
}

/// Moving Average Convergence Divergence indicator.
///
/// Both price EMAs adopt the first close as their starting value. The signal
/// line starts at zero and ignores the first MACD value, so it only begins
/// moving on the second observation. Output is available from the first
/// observation onwards.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema<Decimal>,
    slow: Ema<Decimal>,
    signal: Ema<Decimal>,
    primed: bool,
}

impl Macd {
    /// Create a MACD indicator with custom fast/slow/signal periods.
    pub fn new(
        fast_period: usize,
        slow_period: usize,
        signal_period: usize,
    ) -> Result<Self, IndicatorError> {
        if fast_period == 0 {
            return Err(IndicatorError::invalid_period("MACD", fast_period));
        }
        if slow_period == 0 {
            return Err(IndicatorError::invalid_period("MACD", slow_period));
        }
        if signal_period == 0 {
            return Err(IndicatorError::invalid_period("MACD", signal_period));
        }
        if fast_period >= slow_period {
            return Err(IndicatorError::InvalidConfig(format!(
                "MACD fast period ({fast_period}) must be shorter than slow period ({slow_period})"
            )));
        }
        Ok(Self {
            fast: Ema::new(fast_period)?,
            slow: Ema::new(slow_period)?,
            signal: Ema::seeded(signal_period, Decimal::ZERO)?,
            primed: false,
        })
    }

    /// The conventional 12/26/9 configuration.
    pub fn standard() -> Self {
        Self::new(12, 26, 9).expect("12/26/9 are valid MACD periods")
    }
}

impl Indicator for Macd {
    type Input = Decimal;
    type Output = MacdOutput;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let fast = self.fast.next(input)?;
        let slow = self.slow.next(input)?;
        let macd = fast - slow;

        let signal = if self.primed {
            self.signal.next(macd)?
        } else {
            self.primed = true;
            self.signal.value().unwrap_or(Decimal::ZERO)
        };

        Some(MacdOutput {
            macd,
            signal,
            histogram: macd - signal,
        })
    }

    fn reset(&mut self) {
        self.fast.reset();
        self.slow.reset();
        self.signal.reset();
        self.primed = false;
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn first_bar_has_flat_lines() {
        let mut macd = Macd::standard();
        let out = macd.next(dec!(250)).unwrap();
        assert_eq!(out.macd, Decimal::ZERO);
        assert_eq!(out.signal, Decimal::ZERO);
        assert_eq!(out.histogram, Decimal::ZERO);
    }

    #[test]
    fn signal_starts_moving_on_second_bar() {
        let mut macd = Macd::standard();
        macd.next(dec!(100));
        let out = macd.next(dec!(113)).unwrap();
        // fast = 100 + 13 * 2/13 = 102, slow = 100 + 13 * 2/27
        let fast = dec!(113) * (dec!(2) / dec!(13)) + dec!(100) * (Decimal::ONE - dec!(2) / dec!(13));
        let slow = dec!(113) * (dec!(2) / dec!(27)) + dec!(100) * (Decimal::ONE - dec!(2) / dec!(27));
        let line = fast - slow;
        assert_eq!(out.macd, line);
        assert_eq!(out.signal, line * dec!(0.2));
        assert_eq!(out.histogram, line - line * dec!(0.2));
    }

    #[test]
    fn rising_prices_give_positive_line() {
        let mut macd = Macd::standard();
        let last = (1..=40)
            .filter_map(|price| macd.next(Decimal::from(price)))
            .last()
            .unwrap();
        assert!(last.macd > Decimal::ZERO);
        assert!(last.histogram > Decimal::ZERO);
    }

    #[test]
    fn reset_restores_initial_behaviour() {
        let mut macd = Macd::standard();
        macd.next(dec!(10));
        macd.next(dec!(20));
        macd.reset();
        assert_eq!(macd.next(dec!(30)).unwrap().signal, Decimal::ZERO);
    }

    #[test]
    fn rejects_inverted_periods() {
        assert!(matches!(
            Macd::new(26, 12, 9),
            Err(IndicatorError::InvalidConfig(_))
        ));
        assert_eq!(
            Macd::new(12, 26, 0).unwrap_err(),
            IndicatorError::invalid_period("MACD", 0)
        );
    }
}
