#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

//! Composable technical indicators built on decimal arithmetic.

/// Foundational traits and shared abstractions.
pub mod core;
/// Single-pass enrichment of bar series.
pub mod engine;
/// Built-in indicator implementations.
pub mod indicators;
/// Latest-bar summaries for quote cards.
pub mod snapshot;
/// Contract checks for caller-supplied bar series.
pub mod validation;

/// Re-export of the core traits and error type to make the crate easy to consume.
pub use crate::core::{Indicator, IndicatorError, Input};
/// Re-export of the enrichment entry points.
pub use crate::engine::{enrich, enrich_with, try_enrich, EngineParams, EnrichmentState};
/// Re-export of the snapshot types.
pub use crate::snapshot::{MacdBias, RsiZone, Snapshot};
/// Re-export of the series validator.
pub use crate::validation::validate_series;
