//! Exponential Moving Average (EMA).

use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::core::{smoothing_factor, Indicator, IndicatorError, Input};

/// Exponentially-weighted average with smoothing factor `k = 2 / (period + 1)`.
///
/// There is no warm-up window. Unless a seed is supplied, the first observation
/// becomes the average as-is; every later one updates it with
/// `value * k + ema * (1 - k)`.
#[derive(Debug, Clone)]
pub struct Ema<I = Decimal> {
    period: usize,
    alpha: Decimal,
    seed: Option<Decimal>,
    state: Option<Decimal>,
    marker: PhantomData<I>,
}

impl<I> Ema<I>
where
    I: Input,
{
    /// Creates an EMA that adopts its first observation as the starting average.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        Self::build(period, None)
    }

    /// Creates an EMA whose average starts at `initial` before any observation.
    pub fn seeded(period: usize, initial: Decimal) -> Result<Self, IndicatorError> {
        Self::build(period, Some(initial))
    }

    fn build(period: usize, seed: Option<Decimal>) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::invalid_period("EMA", period));
        }

        Ok(Self {
            period,
            alpha: smoothing_factor(period),
            seed,
            state: seed,
            marker: PhantomData,
        })
    }

    /// Returns the current average, if one exists.
    pub fn value(&self) -> Option<Decimal> {
        self.state
    }

    /// Returns the configured period.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Returns the smoothing factor applied to each new observation.
    pub fn alpha(&self) -> Decimal {
        self.alpha
    }
}

impl<I> Indicator for Ema<I>
where
    I: Input,
{
    type Input = I;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let value = input.value();
        let next = match self.state {
            None => value,
            Some(current) => value * self.alpha + current * (Decimal::ONE - self.alpha),
        };
        self.state = Some(next);
        Some(next)
    }

    fn reset(&mut self) {
        self.state = self.seed;
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::Ema;
    use crate::Indicator;

    #[test]
    fn first_observation_becomes_the_average() {
        let mut ema: Ema = Ema::new(12).unwrap();
        assert_eq!(ema.value(), None);
        assert_eq!(ema.next(dec!(101.5)), Some(dec!(101.5)));
    }

    #[test]
    fn blends_with_two_over_period_plus_one() {
        let mut ema: Ema = Ema::new(3).unwrap();
        ema.next(dec!(2));
        // k = 0.5: 4 * 0.5 + 2 * 0.5
        assert_eq!(ema.next(dec!(4)), Some(dec!(3)));
        assert_eq!(ema.next(dec!(5)), Some(dec!(4)));
    }

    #[test]
    fn seeded_average_blends_from_the_seed() {
        let mut ema: Ema = Ema::seeded(9, Decimal::ZERO).unwrap();
        assert_eq!(ema.value(), Some(Decimal::ZERO));
        // k = 0.2
        assert_eq!(ema.next(dec!(10)), Some(dec!(2)));
        ema.reset();
        assert_eq!(ema.value(), Some(Decimal::ZERO));
    }

    #[test]
    fn reset_returns_to_unseeded_state() {
        let mut ema: Ema = Ema::new(2).unwrap();
        ema.next(dec!(1));
        ema.next(dec!(2));
        ema.reset();
        assert_eq!(ema.value(), None);
        assert_eq!(ema.next(dec!(8)), Some(dec!(8)));
    }

    #[test]
    fn rejects_zero_period() {
        assert!(Ema::<Decimal>::seeded(0, Decimal::ONE).is_err());
    }
}
