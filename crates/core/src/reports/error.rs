//! Report error types.

use thiserror::Error;

use crate::ledger::LedgerUnavailableError;

/// Errors that abort a report call.
///
/// Invalid records never surface here; they are excluded and returned next to
/// the report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Year outside the supported range.
    #[error("Invalid year: {0}")]
    InvalidYear(i32),

    /// Month outside 1-12.
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    /// The ledger snapshot could not be taken.
    #[error(transparent)]
    LedgerUnavailable(#[from] LedgerUnavailableError),
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidYear(_) => "INVALID_YEAR",
            Self::InvalidMonth(_) => "INVALID_MONTH",
            Self::LedgerUnavailable(_) => "LEDGER_UNAVAILABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ReportError::InvalidYear(0).error_code(), "INVALID_YEAR");
        assert_eq!(ReportError::InvalidMonth(13).error_code(), "INVALID_MONTH");
        let err: ReportError = LedgerUnavailableError::Timeout.into();
        assert_eq!(err.error_code(), "LEDGER_UNAVAILABLE");
        assert_eq!(err.to_string(), "Ledger query timed out");
    }
}
