//! The static exchange-rate table.

use std::collections::HashMap;

use obmin_shared::Currency;

/// Static mapping of ordered currency pairs to conversion multipliers.
///
/// Lookups are directional: UAH→USD and USD→UAH are independent entries
/// with independent rates, and no inverse is ever derived. The table is
/// built once at startup and never mutated afterwards, so it can be
/// shared between requests without locking.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<(Currency, Currency), f64>,
}

impl RateTable {
    /// Creates an empty rate table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from an iterator of `((from, to), rate)` entries.
    #[must_use]
    pub fn with_rates(rates: impl IntoIterator<Item = ((Currency, Currency), f64)>) -> Self {
        Self {
            rates: rates.into_iter().collect(),
        }
    }

    /// The built-in demo table.
    ///
    /// Carries the UAH/USD pair in both directions plus a handful of
    /// USD/EUR/GBP/JPY pairs. UAH→JPY is intentionally absent.
    #[must_use]
    pub fn builtin() -> Self {
        use Currency::{Eur, Gbp, Jpy, Uah, Usd};

        Self::with_rates([
            ((Uah, Usd), 0.025),
            ((Usd, Uah), 40.0),
            ((Usd, Eur), 0.93),
            ((Eur, Usd), 1.07),
            ((Usd, Gbp), 0.79),
            ((Gbp, Usd), 1.26),
            ((Usd, Jpy), 152.0),
            ((Jpy, Usd), 0.0066),
            ((Eur, Gbp), 0.85),
            ((Gbp, Eur), 1.18),
        ])
    }

    /// Registers a rate for the ordered pair `(from, to)`.
    pub fn insert(&mut self, from: Currency, to: Currency, rate: f64) {
        self.rates.insert((from, to), rate);
    }

    /// Returns the rate for the ordered pair `(from, to)`, if supported.
    #[must_use]
    pub fn rate(&self, from: Currency, to: Currency) -> Option<f64> {
        self.rates.get(&(from, to)).copied()
    }

    /// Returns whether the ordered pair `(from, to)` is convertible.
    #[must_use]
    pub fn supports(&self, from: Currency, to: Currency) -> bool {
        self.rates.contains_key(&(from, to))
    }

    /// Iterates over all supported ordered pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (Currency, Currency)> + '_ {
        self.rates.keys().copied()
    }

    /// Number of supported ordered pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_conformance_pair() {
        let table = RateTable::builtin();
        assert_eq!(table.rate(Currency::Uah, Currency::Usd), Some(0.025));
        assert_eq!(table.rate(Currency::Usd, Currency::Uah), Some(40.0));
    }

    #[test]
    fn test_directions_are_independent() {
        // 0.025 is not the inverse of 40.0 being derived; both are stored.
        let mut table = RateTable::new();
        table.insert(Currency::Uah, Currency::Usd, 0.025);
        assert_eq!(table.rate(Currency::Uah, Currency::Usd), Some(0.025));
        assert_eq!(table.rate(Currency::Usd, Currency::Uah), None);
        assert!(!table.supports(Currency::Usd, Currency::Uah));
    }

    #[test]
    fn test_builtin_has_no_uah_jpy() {
        let table = RateTable::builtin();
        assert!(!table.supports(Currency::Uah, Currency::Jpy));
    }

    #[test]
    fn test_alternate_table() {
        let table = RateTable::with_rates([((Currency::Eur, Currency::Jpy), 163.0)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rate(Currency::Eur, Currency::Jpy), Some(163.0));
        assert!(!table.supports(Currency::Jpy, Currency::Eur));
    }

    #[test]
    fn test_empty_table() {
        let table = RateTable::new();
        assert!(table.is_empty());
        assert_eq!(table.rate(Currency::Usd, Currency::Uah), None);
    }
}
