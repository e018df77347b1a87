use thiserror::Error;

/// Result alias for data generation.
pub type DataResult<T> = Result<T, DataError>;

/// Error type surfaced while producing synthetic bars.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("random source produced {0}, expected a draw in [0, 1)")]
    InvalidDraw(f64),
    #[error("random walk produced a non-representable price ({0})")]
    NonFinitePrice(f64),
    #[error("base price for {symbol} must be positive (got {price})")]
    InvalidBasePrice { symbol: String, price: String },
    #[error("calendar overflow while dating {days} bars back from {end}")]
    DateOutOfRange { days: usize, end: chrono::NaiveDate },
    #[error(transparent)]
    Indicator(#[from] quotedeck_indicators::IndicatorError),
}
