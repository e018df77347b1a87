//! Contract checks for bar series handed to the engine.

use quotedeck_core::Bar;

use crate::core::IndicatorError;

/// Checks that a series is strictly chronological and that every bar has a
/// positive, internally consistent OHLC envelope.
///
/// Returns the first violation found.
pub fn validate_series(bars: &[Bar]) -> Result<(), IndicatorError> {
    let mut previous: Option<&Bar> = None;
    for (index, bar) in bars.iter().enumerate() {
        if let Some(prev) = previous {
            if bar.time <= prev.time {
                return Err(IndicatorError::malformed(
                    index,
                    format!("time {} does not advance past {}", bar.time, prev.time),
                ));
            }
        }
        if !bar.has_valid_envelope() {
            return Err(IndicatorError::malformed(
                index,
                format!(
                    "inconsistent OHLC envelope (o={} h={} l={} c={})",
                    bar.open, bar.high, bar.low, bar.close
                ),
            ));
        }
        previous = Some(bar);
    }
    Ok(())
}
