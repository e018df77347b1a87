//! Shared indicator traits, input adapters and the crate error type.

use rust_decimal::Decimal;
use thiserror::Error;

use quotedeck_core::Bar;

/// Errors raised while configuring indicators or checking their input.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IndicatorError {
    /// A lookback period of zero was requested.
    #[error("{name} period must be greater than zero (got {period})")]
    InvalidPeriod {
        /// Indicator that rejected the period.
        name: &'static str,
        /// The rejected value.
        period: usize,
    },
    /// Periods are individually valid but inconsistent with each other.
    #[error("invalid indicator configuration: {0}")]
    InvalidConfig(String),
    /// A bar breaks the series contract (ordering, positivity, OHLC envelope).
    #[error("malformed bar at index {index}: {reason}")]
    MalformedInput {
        /// Position of the offending bar in the input slice.
        index: usize,
        /// Human-readable description of the violation.
        reason: String,
    },
}

impl IndicatorError {
    /// Convenience constructor for [`IndicatorError::InvalidPeriod`].
    pub fn invalid_period(name: &'static str, period: usize) -> Self {
        Self::InvalidPeriod { name, period }
    }

    /// Convenience constructor for [`IndicatorError::MalformedInput`].
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            index,
            reason: reason.into(),
        }
    }
}

/// Anything an indicator can consume as a single decimal observation.
pub trait Input {
    /// The observation fed into the indicator.
    fn value(&self) -> Decimal;
}

impl Input for Decimal {
    fn value(&self) -> Decimal {
        *self
    }
}

/// Bars feed their closing price.
impl Input for Bar {
    fn value(&self) -> Decimal {
        self.close
    }
}

impl<T: Input> Input for &T {
    fn value(&self) -> Decimal {
        (*self).value()
    }
}

/// A streaming indicator that consumes one observation at a time.
pub trait Indicator {
    /// Observation type accepted by [`Indicator::next`].
    type Input;
    /// Value produced once the indicator has enough history.
    type Output;

    /// Feeds the next observation, returning the updated value if one is available.
    fn next(&mut self, input: Self::Input) -> Option<Self::Output>;

    /// Clears all accumulated state.
    fn reset(&mut self);
}

pub(crate) fn decimal_from_usize(value: usize) -> Decimal {
    Decimal::from(value)
}

/// Smoothing factor `2 / (period + 1)` shared by every exponential average in the crate.
pub(crate) fn smoothing_factor(period: usize) -> Decimal {
    Decimal::TWO / decimal_from_usize(period + 1)
}
