//! Relative Strength Index (RSI).

use std::marker::PhantomData;

use rust_decimal::Decimal;

use crate::core::{decimal_from_usize, Indicator, IndicatorError, Input};

/// Wilder's RSI oscillator scaled between 0 and 100.
///
/// The oscillator reports [`Rsi::NEUTRAL`] until `period` close-to-close deltas
/// have been observed. Deltas before that point are summed; on the `period`-th
/// delta the sums are divided by `period` (that delta itself is not folded in)
/// and from then on each delta is blended with Wilder's
/// `(avg * (period - 1) + current) / period`.
///
/// When the average loss is zero the relative strength is pinned to
/// [`Rsi::ZERO_LOSS_STRENGTH`] instead of diverging, which caps the oscillator
/// at `100 - 100 / 101` (≈ 99.01).
#[derive(Debug, Clone)]
pub struct Rsi<I = Decimal> {
    period: usize,
    divisor: Decimal,
    decay: Decimal,
    prev_value: Option<Decimal>,
    deltas_seen: usize,
    gain: Decimal,
    loss: Decimal,
    marker: PhantomData<I>,
}

impl<I> Rsi<I>
where
    I: Input,
{
    /// Reading reported before enough history is available.
    pub const NEUTRAL: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

    /// Relative strength substituted when the average loss is zero.
    pub const ZERO_LOSS_STRENGTH: Decimal = Decimal::ONE_HUNDRED;

    /// Creates a new RSI with the provided period.
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        if period == 0 {
            return Err(IndicatorError::invalid_period("RSI", period));
        }

        Ok(Self {
            period,
            divisor: decimal_from_usize(period),
            decay: decimal_from_usize(period - 1),
            prev_value: None,
            deltas_seen: 0,
            gain: Decimal::ZERO,
            loss: Decimal::ZERO,
            marker: PhantomData,
        })
    }

    /// Returns the configured period.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Whether the averages have been seeded and readings are no longer neutral placeholders.
    pub fn is_ready(&self) -> bool {
        self.deltas_seen >= self.period
    }

    fn compute_rsi(avg_gain: Decimal, avg_loss: Decimal) -> Decimal {
        let rs = if avg_loss.is_zero() {
            Self::ZERO_LOSS_STRENGTH
        } else {
            avg_gain / avg_loss
        };
        Decimal::ONE_HUNDRED - Decimal::ONE_HUNDRED / (Decimal::ONE + rs)
    }
}

impl<I> Indicator for Rsi<I>
where
    I: Input,
{
    type Input = I;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let value = input.value();
        let Some(prev) = self.prev_value.replace(value) else {
            return Some(Self::NEUTRAL);
        };

        let change = value - prev;
        let gain = change.max(Decimal::ZERO);
        let loss = (-change).max(Decimal::ZERO);
        self.deltas_seen += 1;

        if self.deltas_seen < self.period {
            self.gain += gain;
            self.loss += loss;
            return Some(Self::NEUTRAL);
        }

        if self.deltas_seen == self.period {
            self.gain /= self.divisor;
            self.loss /= self.divisor;
        } else {
            self.gain = (self.gain * self.decay + gain) / self.divisor;
            self.loss = (self.loss * self.decay + loss) / self.divisor;
        }

        Some(Self::compute_rsi(self.gain, self.loss))
    }

    fn reset(&mut self) {
        self.prev_value = None;
        self.deltas_seen = 0;
        self.gain = Decimal::ZERO;
        self.loss = Decimal::ZERO;
    }
}
