//! Validated string keys for report grouping.
//!
//! Payment methods, projects and locations are open sets discovered from the
//! ledger. These wrappers only guarantee that a key is trimmed and non-empty,
//! so two records with the same key always land in the same group.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned when a grouping key is blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} cannot be empty")]
pub struct EmptyNameError {
    /// Which kind of key was rejected.
    pub kind: &'static str,
}

/// Macro to generate validated string key wrappers.
macro_rules! typed_name {
    ($name:ident, $kind:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a key from raw input, trimming surrounding whitespace.
            ///
            /// # Errors
            ///
            /// Returns an error if the trimmed input is empty.
            pub fn new(raw: impl AsRef<str>) -> Result<Self, EmptyNameError> {
                let trimmed = raw.as_ref().trim();
                if trimmed.is_empty() {
                    return Err(EmptyNameError { kind: $kind });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Wraps a compile-time constant without re-validating it.
            #[must_use]
            pub fn from_static(name: &'static str) -> Self {
                debug_assert!(!name.trim().is_empty());
                Self(name.to_string())
            }

            /// Returns the key as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = EmptyNameError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = EmptyNameError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

typed_name!(MethodName, "payment method", "Payment channel, e.g. `Banka Havalesi`.");
typed_name!(LocationKey, "location", "Collection point, e.g. `KUYUMCUKENT`.");

impl MethodName {
    /// Bank transfer.
    pub const TRANSFER: &'static str = "Banka Havalesi";
    /// Cash.
    pub const CASH: &'static str = "Nakit";
    /// Check.
    pub const CHECK: &'static str = "Çek";

    /// Maps the aliases seen in imported sheets onto the canonical method names.
    ///
    /// Matching is exact after trimming and lower-casing; unknown values are
    /// kept as they are.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty.
    pub fn normalized(raw: impl AsRef<str>) -> Result<Self, EmptyNameError> {
        let name = Self::new(raw)?;
        let canonical = match name.0.to_lowercase().as_str() {
            "banka havalesi" | "havale" | "transfer" => Self::TRANSFER,
            "nakit" | "cash" => Self::CASH,
            "çek" | "cheque" | "check" => Self::CHECK,
            _ => return Ok(name),
        };
        Ok(Self(canonical.to_string()))
    }

    /// Returns true for check payments.
    #[must_use]
    pub fn is_check(&self) -> bool {
        self.0 == Self::CHECK
    }
}

/// Cost-center a payment belongs to, e.g. `MKM`.
///
/// Stored upper-case. Serialized lower-case because report fields are keyed
/// `mkm`, `msm`, `mkm_payment_methods` and so on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProjectKey(String);

impl ProjectKey {
    /// Creates a project key, trimming and upper-casing the input.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmptyNameError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmptyNameError { kind: "project" });
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    /// Returns the upper-case project code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the lower-case form used as a report field name.
    #[must_use]
    pub fn field_name(&self) -> String {
        self.0.to_lowercase()
    }
}

impl std::fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ProjectKey {
    type Err = EmptyNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ProjectKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.field_name())
    }
}

impl<'de> Deserialize<'de> for ProjectKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_method_name_trims() {
        let method = MethodName::new("  Nakit ").unwrap();
        assert_eq!(method.as_str(), "Nakit");
    }

    #[test]
    fn test_empty_names_rejected() {
        assert!(MethodName::new("   ").is_err());
        assert!(LocationKey::new("").is_err());
        assert_eq!(
            ProjectKey::new(" ").unwrap_err().to_string(),
            "project cannot be empty"
        );
    }

    #[rstest]
    #[case("Banka Havalesi", "Banka Havalesi")]
    #[case("havale", "Banka Havalesi")]
    #[case(" TRANSFER ", "Banka Havalesi")]
    #[case("nakit", "Nakit")]
    #[case("Cash", "Nakit")]
    #[case("çek", "Çek")]
    #[case("cheque", "Çek")]
    #[case("check", "Çek")]
    #[case("Kredi Kartı", "Kredi Kartı")]
    fn test_method_normalization(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(MethodName::normalized(raw).unwrap().as_str(), expected);
    }

    #[test]
    fn test_normalization_is_exact_not_substring() {
        let method = MethodName::normalized("Banka Havalesi (USD)").unwrap();
        assert_eq!(method.as_str(), "Banka Havalesi (USD)");
    }

    #[test]
    fn test_project_key_case() {
        let project = ProjectKey::new(" mkm").unwrap();
        assert_eq!(project.as_str(), "MKM");
        assert_eq!(project.field_name(), "mkm");
    }

    #[test]
    fn test_project_key_serde() {
        let project = ProjectKey::new("MSM").unwrap();
        assert_eq!(serde_json::to_string(&project).unwrap(), "\"msm\"");
        let back: ProjectKey = serde_json::from_str("\"msm\"").unwrap();
        assert_eq!(back, project);
    }

    #[test]
    fn test_method_name_serde_rejects_blank() {
        assert!(serde_json::from_str::<MethodName>("\"  \"").is_err());
        let method: MethodName = serde_json::from_str("\"Çek\"").unwrap();
        assert!(method.is_check());
    }
}
