//! Currency classification.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal`; this module only classifies the
//! currency a face value was collected in.

use serde::{Deserialize, Serialize};

use super::names::EmptyNameError;

/// Currency a payment was collected in.
///
/// `TL` is the local currency of the ledger. Everything else is foreign.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    /// Turkish Lira
    Tl,
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// Any other currency code, stored upper-case.
    Other(String),
}

impl Currency {
    /// Returns true for the local currency.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Tl)
    }

    /// Returns the currency code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Tl => "TL",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Other(code) => code,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = EmptyNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        match code.as_str() {
            "" => Err(EmptyNameError { kind: "currency" }),
            "TL" => Ok(Self::Tl),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            _ => Ok(Self::Other(code)),
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = EmptyNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.code().to_string()
    }
}
