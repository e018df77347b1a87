//! Starting prices for the synthetic random walk.

use std::collections::HashMap;

use rust_decimal::Decimal;

/// Base price used for symbols without an explicit seed.
pub const DEFAULT_BASE_PRICE: Decimal = Decimal::ONE_HUNDRED;

/// Supplies the price a symbol's random walk starts from.
pub trait PriceSeeds {
    fn base_price(&self, symbol: &str) -> Decimal;
}

/// Lookup table of base prices keyed by upper-cased, trimmed symbol.
#[derive(Clone, Debug)]
pub struct SeedTable {
    prices: HashMap<String, Decimal>,
    fallback: Decimal,
}

impl SeedTable {
    /// A table with no entries; every symbol resolves to `fallback`.
    pub fn empty(fallback: Decimal) -> Self {
        Self {
            prices: HashMap::new(),
            fallback,
        }
    }

    /// The built-in seeds: TSMC (`2330`) at 900 and NVIDIA (`NVDA`) at 130.
    pub fn builtin() -> Self {
        let mut table = Self::empty(DEFAULT_BASE_PRICE);
        table.insert("2330", Decimal::from(900));
        table.insert("NVDA", Decimal::from(130));
        table
    }

    pub fn insert(&mut self, symbol: &str, price: Decimal) {
        self.prices.insert(normalize(symbol), price);
    }

    /// Applies overrides on top of the current entries.
    pub fn with_overrides<'a>(mut self, overrides: impl IntoIterator<Item = (&'a String, &'a Decimal)>) -> Self {
        for (symbol, price) in overrides {
            self.insert(symbol, *price);
        }
        self
    }

    pub fn fallback(&self) -> Decimal {
        self.fallback
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl Default for SeedTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PriceSeeds for SeedTable {
    fn base_price(&self, symbol: &str) -> Decimal {
        self.prices
            .get(&normalize(symbol))
            .copied()
            .unwrap_or(self.fallback)
    }
}

fn normalize(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}
