//! Fixture builders shared by the Quotedeck test suites.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use quotedeck_core::Bar;

/// First trading day used by every fixture series.
pub fn fixture_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid fixture date")
}

/// Builds one bar per close, dated on consecutive calendar days.
///
/// Open equals the previous close (the first bar opens at its own close) and
/// the high/low wicks sit one unit outside the body, so every bar satisfies
/// the OHLC envelope.
pub fn bars_from_closes(closes: &[Decimal]) -> Vec<Bar> {
    let start = fixture_start();
    let mut previous: Option<Decimal> = None;
    closes
        .iter()
        .enumerate()
        .map(|(idx, close)| {
            let open = previous.unwrap_or(*close);
            previous = Some(*close);
            Bar::new(
                start + Duration::days(idx as i64),
                open,
                open.max(*close) + Decimal::ONE,
                open.min(*close) - Decimal::ONE,
                *close,
                10_000 + idx as u64,
            )
        })
        .collect()
}

/// Same as [`bars_from_closes`] for integer closes.
pub fn bars_from_integers(closes: &[i64]) -> Vec<Bar> {
    let closes: Vec<Decimal> = closes.iter().copied().map(Decimal::from).collect();
    bars_from_closes(&closes)
}

/// `count` bars whose close rises by `step` every day, starting at `start`.
pub fn rising_bars(count: usize, start: i64, step: i64) -> Vec<Bar> {
    let closes: Vec<i64> = (0..count as i64).map(|idx| start + idx * step).collect();
    bars_from_integers(&closes)
}

/// `count` bars that all close at `price`.
pub fn flat_bars(count: usize, price: i64) -> Vec<Bar> {
    bars_from_integers(&vec![price; count])
}

/// A deterministic zig-zag series that exercises both gains and losses.
pub fn choppy_bars(count: usize) -> Vec<Bar> {
    let closes: Vec<i64> = (0..count as i64)
        .map(|idx| 100 + (idx % 7) * 3 - (idx % 4) * 2 + idx / 5)
        .collect();
    bars_from_integers(&closes)
}
