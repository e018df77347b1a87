//! Synthetic market data for the Quotedeck chart.

mod error;
pub mod generator;
pub mod random;
pub mod seeds;

pub use error::{DataError, DataResult};
pub use generator::{today, BarGenerator, DEFAULT_DAYS};
pub use random::{EntropyRandom, RandomSource, SeededRandom, SequenceRandom};
pub use seeds::{PriceSeeds, SeedTable, DEFAULT_BASE_PRICE};
