//! Single-pass enrichment of daily bars with moving averages, MACD and RSI.
//!
//! All running state lives in [`EnrichmentState`], which is folded over the
//! input one bar at a time. Each call owns its state, so independent series
//! can be enriched concurrently without coordination.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use quotedeck_core::{round_to_cents, Bar, EnrichedBar, MOVING_AVERAGE_PERIODS};

use crate::core::{Indicator, IndicatorError};
use crate::indicators::{Macd, Rsi, Sma};
use crate::validation::validate_series;

/// Tunable periods for the oscillators. Moving-average windows are fixed by
/// the published fields (`ma5` … `ma120`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineParams {
    /// Fast EMA period of the MACD line.
    pub macd_fast: usize,
    /// Slow EMA period of the MACD line.
    pub macd_slow: usize,
    /// EMA period of the MACD signal line.
    pub macd_signal: usize,
    /// Wilder RSI period.
    pub rsi_period: usize,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            rsi_period: 14,
        }
    }
}

/// Accumulator carried from one bar to the next during enrichment.
#[derive(Debug, Clone)]
pub struct EnrichmentState {
    averages: Vec<(usize, Sma)>,
    macd: Macd,
    rsi: Rsi,
}

impl EnrichmentState {
    /// Builds a fresh accumulator for the provided periods.
    pub fn new(params: &EngineParams) -> Result<Self, IndicatorError> {
        let averages = MOVING_AVERAGE_PERIODS
            .iter()
            .map(|period| Sma::new(*period).map(|sma| (*period, sma)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            averages,
            macd: Macd::new(params.macd_fast, params.macd_slow, params.macd_signal)?,
            rsi: Rsi::new(params.rsi_period)?,
        })
    }

    /// Folds one bar into the accumulator and returns its enriched form.
    pub fn step(&mut self, bar: &Bar) -> EnrichedBar {
        let close = bar.close;
        let macd = self.macd.next(close).unwrap_or_default();
        let rsi = self.rsi.next(close).unwrap_or(Rsi::<Decimal>::NEUTRAL);

        let enriched = EnrichedBar {
            bar: bar.clone(),
            ma5: None,
            ma10: None,
            ma20: None,
            ma60: None,
            ma120: None,
            macd: round_to_cents(macd.macd),
            macd_signal: round_to_cents(macd.signal),
            macd_hist: round_to_cents(macd.histogram),
            rsi: round_to_cents(rsi),
        };

        self.averages
            .iter_mut()
            .fold(enriched, |enriched, (period, sma)| {
                let value = sma.next(close).map(round_to_cents);
                enriched.with_moving_average(*period, value)
            })
    }
}

impl Default for EnrichmentState {
    fn default() -> Self {
        Self::new(&EngineParams::default()).expect("default periods are valid")
    }
}

/// Enriches a chronological bar series with the default 12/26/9 MACD and RSI(14).
///
/// The output has the same length and order as `bars`; an empty input gives an
/// empty output. Input is trusted; see [`try_enrich`] for a checked variant.
pub fn enrich(bars: &[Bar]) -> Vec<EnrichedBar> {
    fold(EnrichmentState::default(), bars)
}

/// Enriches a series using custom oscillator periods.
pub fn enrich_with(bars: &[Bar], params: &EngineParams) -> Result<Vec<EnrichedBar>, IndicatorError> {
    Ok(fold(EnrichmentState::new(params)?, bars))
}

/// Validates the series contract before enriching with default periods.
pub fn try_enrich(bars: &[Bar]) -> Result<Vec<EnrichedBar>, IndicatorError> {
    validate_series(bars)?;
    Ok(enrich(bars))
}

fn fold(state: EnrichmentState, bars: &[Bar]) -> Vec<EnrichedBar> {
    bars.iter()
        .scan(state, |state, bar| Some(state.step(bar)))
        .collect()
}
