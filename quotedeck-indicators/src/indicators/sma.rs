//! Simple Moving Average (SMA).

use std::collections::VecDeque;
use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::core::{decimal_from_usize, Indicator, IndicatorError, Input};

/// Arithmetic mean over a trailing window that includes the latest observation.
///
/// The window is a ring buffer with a running sum, so each update costs O(1)
/// regardless of the period.
#[derive(Debug, Clone)]
pub struct Sma<I = Decimal> {
    period: usize,
    divisor: Decimal,
    sum: Decimal,
    window: VecDeque<Decimal>,
    marker: PhantomData<I>,
}

impl<I> Sma<I>
where
    I: Input,
{
    /// Creates a new SMA with the provided period.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::invalid_period("SMA", period));
        }

        Ok(Self {
            period,
            divisor: decimal_from_usize(period),
            sum: Decimal::ZERO,
            window: VecDeque::with_capacity(period + 1),
            marker: PhantomData,
        })
    }

    /// Returns the configured lookback period.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Whether the window holds a full period of observations.
    pub fn is_ready(&self) -> bool {
        self.window.len() == self.period
    }
}

impl<I> Indicator for Sma<I>
where
    I: Input,
{
    type Input = I;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let value = input.value();
        self.window.push_back(value);
        self.sum += value;

        if self.window.len() > self.period {
            if let Some(oldest) = self.window.pop_front() {
                self.sum -= oldest;
            }
        }

        self.is_ready().then(|| self.sum / self.divisor)
    }

    fn reset(&mut self) {
        self.sum = Decimal::ZERO;
        self.window.clear();
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::Sma;
    use crate::{Indicator, IndicatorError};

    #[test]
    fn stays_silent_until_window_fills() {
        let mut sma: Sma = Sma::new(5).unwrap();
        let outputs: Vec<_> = [10, 11, 12, 13, 14]
            .into_iter()
            .map(|close| sma.next(Decimal::from(close)))
            .collect();
        assert!(outputs[..4].iter().all(Option::is_none));
        assert_eq!(outputs[4], Some(dec!(12)));
    }

    #[test]
    fn drops_the_oldest_close_as_it_rolls() {
        let mut sma: Sma = Sma::new(2).unwrap();
        sma.next(dec!(1));
        assert_eq!(sma.next(dec!(3)), Some(dec!(2)));
        assert_eq!(sma.next(dec!(9)), Some(dec!(6)));
        assert_eq!(sma.next(dec!(0.5)), Some(dec!(4.75)));
    }

    #[test]
    fn accepts_bars_directly() {
        let bars = quotedeck_test_utils::bars_from_integers(&[4, 8]);
        let mut sma = Sma::new(2).unwrap();
        assert_eq!(sma.next(&bars[0]), None);
        assert_eq!(sma.next(&bars[1]), Some(dec!(6)));
    }

    #[test]
    fn reset_forgets_the_window() {
        let mut sma: Sma = Sma::new(1).unwrap();
        assert_eq!(sma.next(dec!(7)), Some(dec!(7)));
        sma.reset();
        assert!(!sma.is_ready());
        assert_eq!(sma.next(dec!(3)), Some(dec!(3)));
    }

    #[test]
    fn rejects_zero_period() {
        let err = Sma::<Decimal>::new(0).unwrap_err();
        assert_eq!(err, IndicatorError::invalid_period("SMA", 0));
    }
}
