//! Ledger access errors.

use thiserror::Error;

/// The ledger store could not deliver a snapshot.
///
/// Fatal for the current report call. Never defaulted to an empty report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerUnavailableError {
    /// The store cannot be reached.
    #[error("Ledger store unreachable: {0}")]
    Unreachable(String),

    /// The store did not answer in time.
    #[error("Ledger query timed out")]
    Timeout,

    /// The store answered with an error.
    #[error("Ledger query failed: {0}")]
    Query(String),
}

impl LedgerUnavailableError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unreachable(_) => "LEDGER_UNREACHABLE",
            Self::Timeout => "LEDGER_TIMEOUT",
            Self::Query(_) => "LEDGER_QUERY_FAILED",
        }
    }
}
