//! Random-walk generator for daily bars.

use chrono::{Days, Local, NaiveDate};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use tracing::debug;

use quotedeck_core::{round_to_cents, Bar, EnrichedBar, Price};
use quotedeck_indicators::{enrich_with, EngineParams};

use crate::error::{DataError, DataResult};
use crate::random::RandomSource;
use crate::seeds::{PriceSeeds, SeedTable};

/// Number of daily bars generated when the caller does not ask for a count.
pub const DEFAULT_DAYS: usize = 180;

const VOLATILITY: f64 = 0.025;
const DRIFT_CENTER: f64 = 0.48;
const WICK_SCALE: f64 = 0.5;
const VOLUME_FLOOR: f64 = 10_000.0;
const VOLUME_SPAN: f64 = 50_000.0;

/// Produces synthetic daily bars by walking a price from a per-symbol seed.
///
/// Each day draws five uniforms in order: close drift, open offset, upper
/// wick, lower wick, volume. The walk continues from the unrounded close;
/// only published prices are rounded to cents.
#[derive(Clone, Debug)]
pub struct BarGenerator<S = SeedTable> {
    seeds: S,
    params: EngineParams,
}

impl<S> BarGenerator<S>
where
    S: PriceSeeds,
{
    pub fn new(seeds: S) -> Self {
        Self {
            seeds,
            params: EngineParams::default(),
        }
    }

    /// Overrides the oscillator periods used by [`BarGenerator::generate_enriched`].
    pub fn with_params(mut self, params: EngineParams) -> Self {
        self.params = params;
        self
    }

    pub fn seeds(&self) -> &S {
        &self.seeds
    }

    /// Generates `days` bars, one per calendar day, covering the `days` days
    /// immediately before `end`.
    pub fn generate<R>(
        &self,
        symbol: &str,
        days: usize,
        end: NaiveDate,
        rng: &mut R,
    ) -> DataResult<Vec<Bar>>
    where
        R: RandomSource + ?Sized,
    {
        let seed = self.seeds.base_price(symbol);
        let mut base_price = seed
            .to_f64()
            .filter(|price| *price > 0.0)
            .ok_or_else(|| DataError::InvalidBasePrice {
                symbol: symbol.to_string(),
                price: seed.to_string(),
            })?;
        debug!(symbol, days, %seed, %end, "generating synthetic bars");

        let mut bars = Vec::with_capacity(days);
        for offset in (1..=days).rev() {
            let time = end
                .checked_sub_days(Days::new(offset as u64))
                .ok_or(DataError::DateOutOfRange { days, end })?;

            let volatility = base_price * VOLATILITY;
            let change = (draw(rng)? - DRIFT_CENTER) * volatility;
            let open = base_price + (draw(rng)? - 0.5) * volatility * WICK_SCALE;
            let close = base_price + change;
            let high = open.max(close) + draw(rng)? * volatility * WICK_SCALE;
            let low = open.min(close) - draw(rng)? * volatility * WICK_SCALE;
            let volume = (draw(rng)? * VOLUME_SPAN + VOLUME_FLOOR).floor() as u64;

            base_price = close;

            bars.push(Bar::new(
                time,
                to_price(open)?,
                to_price(high)?,
                to_price(low)?,
                to_price(close)?,
                volume,
            ));
        }

        if let Some(last) = bars.last() {
            debug!(symbol, bars = bars.len(), last_close = %last.close, "synthetic walk finished");
        }
        Ok(bars)
    }

    /// Generates bars and enriches them with indicators in one call.
    pub fn generate_enriched<R>(
        &self,
        symbol: &str,
        days: usize,
        end: NaiveDate,
        rng: &mut R,
    ) -> DataResult<Vec<EnrichedBar>>
    where
        R: RandomSource + ?Sized,
    {
        let bars = self.generate(symbol, days, end, rng)?;
        Ok(enrich_with(&bars, &self.params)?)
    }
}

impl Default for BarGenerator<SeedTable> {
    fn default() -> Self {
        Self::new(SeedTable::builtin())
    }
}

/// Today's date in the local timezone, the default end of a generated series.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn draw<R>(rng: &mut R) -> DataResult<f64>
where
    R: RandomSource + ?Sized,
{
    let value = rng.next_unit();
    if (0.0..1.0).contains(&value) {
        Ok(value)
    } else {
        Err(DataError::InvalidDraw(value))
    }
}

fn to_price(value: f64) -> DataResult<Price> {
    Decimal::from_f64(value)
        .map(round_to_cents)
        .ok_or(DataError::NonFinitePrice(value))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use quotedeck_indicators::validate_series;

    use super::*;
    use crate::random::{SeededRandom, SequenceRandom};

    fn end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    /// Draws that keep the walk flat at its seed: zero drift, open on the
    /// seed, wicks of +0.5% / -1%, volume 20 000.
    fn flat_walk() -> SequenceRandom {
        SequenceRandom::new([0.48, 0.5, 0.4, 0.8, 0.2])
    }

    #[test]
    fn one_bar_per_calendar_day_before_end() {
        let bars = BarGenerator::default()
            .generate("AAPL", 10, end(), &mut flat_walk())
            .unwrap();
        assert_eq!(bars.len(), 10);
        assert_eq!(bars[0].time, NaiveDate::from_ymd_opt(2024, 6, 21).unwrap());
        assert_eq!(bars[9].time, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        for pair in bars.windows(2) {
            assert_eq!(pair[1].time, pair[0].time.succ_opt().unwrap());
        }
    }

    #[test]
    fn zero_days_is_empty() {
        let generator = BarGenerator::default();
        assert!(generator.generate("NVDA", 0, end(), &mut flat_walk()).unwrap().is_empty());
        assert!(generator
            .generate_enriched("NVDA", 0, end(), &mut flat_walk())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn fixed_draws_give_exact_bars() {
        let bars = BarGenerator::default()
            .generate("AAPL", 3, end(), &mut flat_walk())
            .unwrap();
        for bar in &bars {
            assert_eq!(bar.open, dec!(100));
            assert_eq!(bar.close, dec!(100));
            assert_eq!(bar.high, dec!(100.5));
            assert_eq!(bar.low, dec!(99));
            assert_eq!(bar.volume, 20_000);
        }
    }

    #[test]
    fn walk_starts_from_symbol_seed() {
        let generator = BarGenerator::default();
        let tsmc = generator.generate("2330", 1, end(), &mut flat_walk()).unwrap();
        let nvda = generator.generate("NVDA", 1, end(), &mut flat_walk()).unwrap();
        let other = generator.generate("0050", 1, end(), &mut flat_walk()).unwrap();
        assert_eq!(tsmc[0].close, dec!(900));
        assert_eq!(nvda[0].close, dec!(130));
        assert_eq!(other[0].close, dec!(100));
    }

    #[test]
    fn walk_continues_from_previous_close() {
        // Drift draw of 0.98 moves the close by half the volatility: base * (1 + 0.5 * 0.025).
        let mut rng = SequenceRandom::new([0.98, 0.5, 0.0, 0.0, 0.0]);
        let bars = BarGenerator::new(SeedTable::empty(dec!(1000)))
            .generate("X", 2, end(), &mut rng)
            .unwrap();
        assert_eq!(bars[0].close, dec!(1012.5));
        assert_eq!(bars[1].open, dec!(1012.5));
        assert_eq!(bars[1].close, dec!(1025.16));
        assert_eq!(bars[0].volume, 10_000);
    }

    #[test]
    fn seeded_series_are_reproducible() {
        let generator = BarGenerator::default();
        let first = generator
            .generate_enriched("2330", 180, end(), &mut SeededRandom::new(42))
            .unwrap();
        let second = generator
            .generate_enriched("2330", 180, end(), &mut SeededRandom::new(42))
            .unwrap();
        let other = generator
            .generate_enriched("2330", 180, end(), &mut SeededRandom::new(43))
            .unwrap();
        assert_eq!(first, second);
        assert_ne!(first, other);
    }

    #[test]
    fn random_series_honour_bar_contract() {
        let bars = BarGenerator::default()
            .generate("NVDA", DEFAULT_DAYS, end(), &mut SeededRandom::new(7))
            .unwrap();
        assert_eq!(bars.len(), DEFAULT_DAYS);
        validate_series(&bars).unwrap();
        for bar in &bars {
            assert!((10_000..60_000).contains(&bar.volume));
            assert!(bar.close.scale() <= 2);
        }
    }

    #[test]
    fn rejects_draws_outside_unit_interval() {
        let generator = BarGenerator::default();
        let err = generator
            .generate("AAPL", 1, end(), &mut SequenceRandom::constant(f64::NAN))
            .unwrap_err();
        assert!(matches!(err, DataError::InvalidDraw(_)));
        let err = generator
            .generate("AAPL", 1, end(), &mut SequenceRandom::constant(1.0))
            .unwrap_err();
        assert!(matches!(err, DataError::InvalidDraw(value) if value == 1.0));
    }

    #[test]
    fn rejects_non_positive_seed() {
        let generator = BarGenerator::new(SeedTable::empty(Decimal::ZERO));
        let err = generator.generate("AAPL", 5, end(), &mut flat_walk()).unwrap_err();
        assert!(matches!(err, DataError::InvalidBasePrice { .. }));
    }

    #[test]
    fn custom_params_flow_into_enrichment() {
        let params = EngineParams {
            rsi_period: 3,
            ..EngineParams::default()
        };
        let generator = BarGenerator::default().with_params(params);
        let enriched = generator
            .generate_enriched("AAPL", 5, end(), &mut SeededRandom::new(1))
            .unwrap();
        assert_eq!(enriched.len(), 5);
        assert_eq!(enriched[0].rsi, dec!(50));
        assert!(enriched[4].ma5.is_some());
    }
}
