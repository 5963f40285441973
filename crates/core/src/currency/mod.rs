//! Currency handling for collected payments.

pub mod conversion;

pub use conversion::{USD_DECIMAL_PLACES, round, usd_equivalent};
