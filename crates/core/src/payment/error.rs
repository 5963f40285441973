//! Record-level validation errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// A payment record that cannot take part in aggregation.
///
/// Recovered locally: the record is excluded from every sum and reported in
/// the rejected list next to the report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRecordError {
    /// Collected amount is zero or negative.
    #[error("Payment amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The offending amount.
        amount: Decimal,
    },

    /// TL payment without a historical exchange rate.
    #[error("TL payment is missing its exchange rate")]
    MissingExchangeRate,

    /// TL payment with a zero or negative exchange rate.
    #[error("Exchange rate must be positive, got {rate}")]
    NonPositiveExchangeRate {
        /// The offending rate.
        rate: Decimal,
    },

    /// Customer name is blank.
    #[error("Customer name cannot be empty")]
    EmptyCustomerName,

    /// A required import field is blank.
    #[error("Required field is empty: {0}")]
    MissingField(&'static str),

    /// USD conversion does not fit in a decimal.
    #[error("USD conversion overflowed for amount {amount} at rate {rate}")]
    ConversionOverflow {
        /// Face value being converted.
        amount: Decimal,
        /// Rate used.
        rate: Decimal,
    },

    /// Stored USD-equivalent disagrees with the one derived from the record.
    #[error("USD amount {actual} does not match the derived {expected}")]
    InconsistentUsdAmount {
        /// Value derived from amount, currency and rate.
        expected: Decimal,
        /// Value carried by the record.
        actual: Decimal,
    },

    /// Adding the record would push a report total past the decimal range.
    #[error("Report totals overflow when adding amount {amount}")]
    SumOverflow {
        /// Face value of the record.
        amount: Decimal,
    },
}

impl InvalidRecordError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount { .. } => "NON_POSITIVE_AMOUNT",
            Self::MissingExchangeRate => "MISSING_EXCHANGE_RATE",
            Self::NonPositiveExchangeRate { .. } => "NON_POSITIVE_EXCHANGE_RATE",
            Self::EmptyCustomerName => "EMPTY_CUSTOMER_NAME",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::ConversionOverflow { .. } => "CONVERSION_OVERFLOW",
            Self::InconsistentUsdAmount { .. } => "INCONSISTENT_USD_AMOUNT",
            Self::SumOverflow { .. } => "SUM_OVERFLOW",
        }
    }
}
