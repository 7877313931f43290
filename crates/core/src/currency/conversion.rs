//! Currency conversion arithmetic.
//!
//! Conversion is plain f64 multiplication at the rate in force when the
//! request is handled. No rounding is applied; callers see native
//! floating-point precision.

use obmin_shared::Currency;

use super::rates::RateTable;

/// Outcome of a conversion: the rate used and the converted amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    /// Rate looked up for the ordered pair.
    pub rate: f64,
    /// `amount * rate`.
    pub converted_amount: f64,
}

/// Converts `amount` from one currency to another.
///
/// Looks up the rate for the ordered pair `(from, to)`; the table is not
/// assumed symmetric and no inverse is derived. Pair support is the
/// validator's job: `None` here means the caller skipped validation.
#[must_use]
pub fn convert(rates: &RateTable, amount: f64, from: Currency, to: Currency) -> Option<Conversion> {
    let rate = rates.rate(from, to)?;
    Some(Conversion {
        rate,
        converted_amount: amount * rate,
    })
}
