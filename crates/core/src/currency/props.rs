//! Property-based tests for conversion arithmetic.

use proptest::prelude::*;

use obmin_shared::Currency;

use super::conversion::convert;
use super::rates::RateTable;

/// Strategy to generate finite amounts, negative and zero included.
fn finite_amount() -> impl Strategy<Value = f64> {
    -1.0e9f64..1.0e9f64
}

/// Strategy to pick a supported ordered pair from the built-in table.
fn supported_pair() -> impl Strategy<Value = (Currency, Currency)> {
    let pairs: Vec<(Currency, Currency)> = RateTable::builtin().pairs().collect();
    prop::sample::select(pairs)
}

proptest! {
    /// For every supported pair and finite amount,
    /// `convert` returns the table rate and `amount * rate`.
    #[test]
    fn prop_convert_is_linear(amount in finite_amount(), pair in supported_pair()) {
        let table = RateTable::builtin();
        let (from, to) = pair;
        let rate = table.rate(from, to).unwrap();
        let conversion = convert(&table, amount, from, to).unwrap();
        prop_assert_eq!(conversion.rate, rate);
        prop_assert_eq!(conversion.converted_amount, amount * rate);
    }

    /// Repeating a conversion yields the same result: there is no hidden
    /// state in the table or the engine.
    #[test]
    fn prop_convert_is_deterministic(amount in finite_amount(), pair in supported_pair()) {
        let table = RateTable::builtin();
        let (from, to) = pair;
        let first = convert(&table, amount, from, to);
        let second = convert(&table, amount, from, to);
        prop_assert_eq!(first, second);
    }

    /// An empty table never converts anything.
    #[test]
    fn prop_empty_table_never_converts(amount in finite_amount(), pair in supported_pair()) {
        let table = RateTable::new();
        let (from, to) = pair;
        prop_assert_eq!(convert(&table, amount, from, to), None);
    }
}
