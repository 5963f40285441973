//! Reconciliation result types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of one consistency check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Stable check identifier, e.g. `method_partition[Nakit].tl`.
    pub check_name: String,
    /// Value the check compares against.
    pub expected: Decimal,
    /// Value derived from the other view.
    pub actual: Decimal,
    /// `actual - expected`.
    pub difference: Decimal,
    /// True if `|difference|` is below the tolerance.
    pub passed: bool,
}

impl CheckResult {
    /// Compares two values under an absolute tolerance.
    #[must_use]
    pub fn compare(
        check_name: impl Into<String>,
        expected: Decimal,
        actual: Decimal,
        tolerance: Decimal,
    ) -> Self {
        // An unrepresentable difference saturates and always fails.
        let (difference, passed) = match actual.checked_sub(expected) {
            Some(difference) => (difference, difference.abs() < tolerance),
            None => (actual.saturating_sub(expected), false),
        };
        Self {
            check_name: check_name.into(),
            expected,
            actual,
            difference,
            passed,
        }
    }

    /// Marks the check failed regardless of its values.
    #[must_use]
    pub fn fail(mut self) -> Self {
        self.passed = false;
        self
    }
}

/// All checks run against one report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Tolerance the checks were run with.
    pub tolerance: Decimal,
    /// Individual results in a stable order.
    pub checks: Vec<CheckResult>,
    /// True if every check passed.
    pub passed: bool,
}

impl ReconciliationReport {
    /// Builds a report from check results.
    #[must_use]
    pub fn from_checks(tolerance: Decimal, checks: Vec<CheckResult>) -> Self {
        let passed = checks.iter().all(|c| c.passed);
        Self {
            tolerance,
            checks,
            passed,
        }
    }

    /// Iterates over failed checks.
    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|c| !c.passed)
    }

    /// Looks up a check by name.
    #[must_use]
    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.check_name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compare_strict_tolerance() {
        let tol = dec!(0.01);
        assert!(CheckResult::compare("a", dec!(600), dec!(600.009), tol).passed);
        assert!(!CheckResult::compare("a", dec!(600), dec!(600.01), tol).passed);
        assert!(!CheckResult::compare("a", dec!(600), dec!(599.99), tol).passed);

        let check = CheckResult::compare("a", dec!(10), dec!(7), tol);
        assert_eq!(check.difference, dec!(-3));
    }

    #[test]
    fn test_compare_out_of_range_difference() {
        let check = CheckResult::compare("a", Decimal::MIN, Decimal::MAX, dec!(0.01));
        assert!(!check.passed);
        assert_eq!(check.difference, Decimal::MAX);

        let check = CheckResult::compare("a", dec!(1), dec!(1), dec!(0.01)).fail();
        assert!(!check.passed);
    }

    #[test]
    fn test_report_passes_only_if_all_pass() {
        let tol = dec!(0.01);
        let ok = CheckResult::compare("ok", dec!(1), dec!(1), tol);
        let bad = CheckResult::compare("bad", dec!(1), dec!(2), tol);

        assert!(ReconciliationReport::from_checks(tol, vec![ok.clone()]).passed);
        assert!(ReconciliationReport::from_checks(tol, vec![]).passed);

        let report = ReconciliationReport::from_checks(tol, vec![ok, bad]);
        assert!(!report.passed);
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.check("bad").unwrap().difference, dec!(1));
    }
}
