use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Bar;

/// Trailing windows published as `ma5` through `ma120`.
pub const MOVING_AVERAGE_PERIODS: [usize; 5] = [5, 10, 20, 60, 120];

/// A [`Bar`] carrying the derived indicator values for its trading day.
///
/// Every derived value is rounded to two decimal places. Moving averages are
/// `None` until their window is full and are then omitted from serialized
/// output entirely, so chart renderers skip the point instead of plotting zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedBar {
    #[serde(flatten)]
    pub bar: Bar,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub ma5: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub ma10: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub ma20: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub ma60: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub ma120: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub macd: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub macd_signal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub macd_hist: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub rsi: Decimal,
}

impl EnrichedBar {
    /// Looks up a moving average by its window length.
    ///
    /// Returns `None` both for windows that are not yet full and for periods
    /// outside [`MOVING_AVERAGE_PERIODS`].
    pub fn moving_average(&self, period: usize) -> Option<Decimal> {
        match period {
            5 => self.ma5,
            10 => self.ma10,
            20 => self.ma20,
            60 => self.ma60,
            120 => self.ma120,
            _ => None,
        }
    }

    pub(crate) fn moving_average_slot(&mut self, period: usize) -> Option<&mut Option<Decimal>> {
        match period {
            5 => Some(&mut self.ma5),
            10 => Some(&mut self.ma10),
            20 => Some(&mut self.ma20),
            60 => Some(&mut self.ma60),
            120 => Some(&mut self.ma120),
            _ => None,
        }
    }

    /// Returns a copy with the given moving average set.
    ///
    /// Periods outside [`MOVING_AVERAGE_PERIODS`] are ignored.
    pub fn with_moving_average(mut self, period: usize, value: Option<Decimal>) -> Self {
        if let Some(slot) = self.moving_average_slot(period) {
            *slot = value;
        }
        self
    }
}
