use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Price, Volume};

/// One trading day of OHLCV data.
///
/// Within a series, `time` is strictly increasing and
/// `low <= min(open, close) <= max(open, close) <= high` holds for every bar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    /// Trading day, serialized as `YYYY-MM-DD`.
    pub time: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub open: Price,
    #[serde(with = "rust_decimal::serde::float")]
    pub high: Price,
    #[serde(with = "rust_decimal::serde::float")]
    pub low: Price,
    #[serde(with = "rust_decimal::serde::float")]
    pub close: Price,
    pub volume: Volume,
}

impl Bar {
    /// Builds a bar from its raw parts.
    pub fn new(
        time: NaiveDate,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: Volume,
    ) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// True when the session closed at or above its open. Volume panes use this for colouring.
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    /// Close-to-close change relative to a previous bar.
    pub fn change_from(&self, previous: &Bar) -> Decimal {
        self.close - previous.close
    }

    /// Whether the OHLC envelope is internally consistent and every price is positive.
    pub fn has_valid_envelope(&self) -> bool {
        let body_low = self.open.min(self.close);
        let body_high = self.open.max(self.close);
        self.low > Decimal::ZERO && self.low <= body_low && body_high <= self.high
    }
}
