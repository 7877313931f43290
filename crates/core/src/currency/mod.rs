//! Exchange rates and conversion arithmetic.

pub mod conversion;
pub mod rates;

#[cfg(test)]
mod props;

pub use conversion::{Conversion, convert};
pub use rates::RateTable;
