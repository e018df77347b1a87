//! Latest-bar summaries, as shown on a quote card above the chart.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use quotedeck_core::{round_to_cents, EnrichedBar};

/// Where the latest RSI reading sits relative to the 30/70 reference bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiZone {
    /// RSI at or above the upper band.
    Overbought,
    /// RSI at or below the lower band.
    Oversold,
    /// Anything in between.
    Neutral,
}

impl RsiZone {
    /// Upper reference band.
    pub const UPPER_BAND: Decimal = Decimal::from_parts(70, 0, 0, false, 0);
    /// Lower reference band.
    pub const LOWER_BAND: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

    /// Classifies an RSI reading.
    pub fn classify(rsi: Decimal) -> Self {
        if rsi >= Self::UPPER_BAND {
            Self::Overbought
        } else if rsi <= Self::LOWER_BAND {
            Self::Oversold
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for RsiZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Overbought => "overbought",
            Self::Oversold => "oversold",
            Self::Neutral => "neutral",
        })
    }
}

/// Direction implied by the sign of the MACD histogram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MacdBias {
    /// Histogram above zero.
    Bullish,
    /// Histogram below zero.
    Bearish,
    /// Histogram exactly zero.
    Flat,
}

impl MacdBias {
    /// Classifies a histogram value.
    pub fn classify(histogram: Decimal) -> Self {
        if histogram.is_zero() {
            Self::Flat
        } else if histogram.is_sign_positive() {
            Self::Bullish
        } else {
            Self::Bearish
        }
    }
}

impl fmt::Display for MacdBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Flat => "flat",
        })
    }
}

/// Summary of the most recent bar in an enriched series.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Trading day of the latest bar.
    pub time: NaiveDate,
    /// Latest close.
    #[serde(with = "rust_decimal::serde::float")]
    pub close: Decimal,
    /// Close minus the previous close; zero for a single-bar series.
    #[serde(with = "rust_decimal::serde::float")]
    pub change: Decimal,
    /// `change` as a percentage of the previous close.
    #[serde(with = "rust_decimal::serde::float")]
    pub change_percent: Decimal,
    /// Latest RSI reading.
    #[serde(with = "rust_decimal::serde::float")]
    pub rsi: Decimal,
    /// Band classification of `rsi`.
    pub rsi_zone: RsiZone,
    /// Latest MACD histogram.
    #[serde(with = "rust_decimal::serde::float")]
    pub macd_hist: Decimal,
    /// Sign classification of `macd_hist`.
    pub macd_bias: MacdBias,
}

impl Snapshot {
    /// Summarises the last bar of `series`. Returns `None` for an empty series.
    pub fn from_series(series: &[EnrichedBar]) -> Option<Self> {
        let (latest, earlier) = series.split_last()?;
        let (change, change_percent) = match earlier.last() {
            Some(previous) if !previous.bar.close.is_zero() => {
                let change = latest.bar.change_from(&previous.bar);
                (
                    round_to_cents(change),
                    round_to_cents(change / previous.bar.close * Decimal::ONE_HUNDRED),
                )
            }
            _ => (Decimal::ZERO, Decimal::ZERO),
        };

        Some(Self {
            time: latest.bar.time,
            close: latest.bar.close,
            change,
            change_percent,
            rsi: latest.rsi,
            rsi_zone: RsiZone::classify(latest.rsi),
            macd_hist: latest.macd_hist,
            macd_bias: MacdBias::classify(latest.macd_hist),
        })
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} close={} change={} ({}%) rsi={} ({}) macd_hist={} ({})",
            self.time,
            self.close,
            self.change,
            self.change_percent,
            self.rsi,
            self.rsi_zone,
            self.macd_hist,
            self.macd_bias
        )
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use quotedeck_test_utils::{bars_from_integers, flat_bars, rising_bars};

    use super::*;
    use crate::enrich;

    #[test]
    fn empty_series_has_no_snapshot() {
        assert_eq!(Snapshot::from_series(&[]), None);
    }

    #[test]
    fn single_bar_reports_no_change() {
        let snapshot = Snapshot::from_series(&enrich(&bars_from_integers(&[120]))).unwrap();
        assert_eq!(snapshot.change, Decimal::ZERO);
        assert_eq!(snapshot.change_percent, Decimal::ZERO);
        assert_eq!(snapshot.rsi_zone, RsiZone::Neutral);
        assert_eq!(snapshot.macd_bias, MacdBias::Flat);
    }

    #[test]
    fn change_is_measured_against_previous_close() {
        let snapshot = Snapshot::from_series(&enrich(&bars_from_integers(&[80, 83]))).unwrap();
        assert_eq!(snapshot.close, dec!(83));
        assert_eq!(snapshot.change, dec!(3));
        assert_eq!(snapshot.change_percent, dec!(3.75));
    }

    #[test]
    fn persistent_rally_reads_overbought_and_bullish() {
        let snapshot = Snapshot::from_series(&enrich(&rising_bars(40, 100, 2))).unwrap();
        assert_eq!(snapshot.rsi, dec!(99.01));
        assert_eq!(snapshot.rsi_zone, RsiZone::Overbought);
        assert_eq!(snapshot.macd_bias, MacdBias::Bullish);
    }

    #[test]
    fn zones_follow_reference_bands() {
        assert_eq!(RsiZone::classify(dec!(70)), RsiZone::Overbought);
        assert_eq!(RsiZone::classify(dec!(69.99)), RsiZone::Neutral);
        assert_eq!(RsiZone::classify(dec!(30)), RsiZone::Oversold);
        assert_eq!(MacdBias::classify(dec!(-0.01)), MacdBias::Bearish);
    }

    #[test]
    fn serializes_lowercase_labels() {
        let snapshot = Snapshot::from_series(&enrich(&flat_bars(3, 50))).unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["rsiZone"], "neutral");
        assert_eq!(json["macdBias"], "flat");
        assert_eq!(json["changePercent"], 0.0);
        assert!(snapshot.to_string().contains("rsi=50 (neutral)"));
    }
}
