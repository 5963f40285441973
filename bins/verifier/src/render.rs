//! Plain-text rendering of verification results.

use std::fmt::Write;

use tahsilat_core::reconcile::ReconciliationReport;
use tahsilat_core::reports::{MethodBreakdown, YearlyReport};
use tahsilat_shared::types::MethodName;

/// Whether a known method appears in one method map of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureCheck {
    /// `general` or the project field name.
    pub scope: String,
    /// Method looked up.
    pub method: String,
    /// True if the map has an entry for the method.
    pub present: bool,
}

/// Checks that every known method is listed in the general map and in each
/// project map, zero-filled or not.
pub fn structure_checks(report: &YearlyReport, known_methods: &[String]) -> Vec<StructureCheck> {
    let scopes = std::iter::once(("general".to_string(), &report.payment_methods)).chain(
        report
            .project_methods
            .iter()
            .map(|(project, methods)| (project.field_name(), methods)),
    );

    let mut checks = Vec::new();
    for (scope, methods) in scopes {
        for method in known_methods {
            checks.push(StructureCheck {
                scope: scope.clone(),
                method: method.clone(),
                present: contains(methods, method),
            });
        }
    }
    checks
}

fn contains(methods: &MethodBreakdown, method: &str) -> bool {
    MethodName::new(method).is_ok_and(|name| methods.contains_key(&name))
}

/// Renders every check followed by a summary line.
pub fn render(reconciliation: &ReconciliationReport, structure: &[StructureCheck]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\nReconciliation (tolerance {})", reconciliation.tolerance);
    for check in &reconciliation.checks {
        let mark = if check.passed { "✅" } else { "❌" };
        let _ = writeln!(
            out,
            "  {mark} {}: expected {}, actual {}, difference {}",
            check.check_name, check.expected, check.actual, check.difference
        );
    }

    let _ = writeln!(out, "\nStructure");
    for check in structure {
        let mark = if check.present { "✅" } else { "❌" };
        let _ = writeln!(out, "  {mark} {}_payment_methods has {}", check.scope, check.method);
    }

    let failed_checks = reconciliation.failures().count();
    let missing = structure.iter().filter(|s| !s.present).count();
    let total = reconciliation.checks.len() + structure.len();
    let failed = failed_checks + missing;

    let _ = writeln!(out);
    if failed == 0 {
        let _ = writeln!(out, "✅ All {total} checks passed");
    } else {
        let _ = writeln!(out, "❌ {failed} of {total} checks failed");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tahsilat_core::reconcile::CheckResult;
    use tahsilat_core::reports::{MethodSummary, ProjectMethods};
    use tahsilat_shared::types::ProjectKey;

    fn report() -> YearlyReport {
        let cash = MethodName::from_static(MethodName::CASH);
        let mut general = MethodBreakdown::new();
        general.insert(cash.clone(), MethodSummary::default());
        general.insert(
            MethodName::from_static(MethodName::TRANSFER),
            MethodSummary::default(),
        );

        let mut mkm = MethodBreakdown::new();
        mkm.insert(cash, MethodSummary::default());

        let mut report = YearlyReport {
            year: 2025,
            project_summary: Default::default(),
            location_summary: Default::default(),
            payment_methods: general,
            project_methods: ProjectMethods::default(),
            monthly_reports: Vec::new(),
        };
        report
            .project_methods
            .0
            .insert(ProjectKey::new("MKM").unwrap(), mkm);
        report
    }

    #[test]
    fn test_structure_checks_find_missing_methods() {
        let known = vec!["Nakit".to_string(), "Banka Havalesi".to_string()];
        let checks = structure_checks(&report(), &known);

        assert_eq!(checks.len(), 4);
        let missing: Vec<_> = checks.iter().filter(|c| !c.present).collect();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].scope, "mkm");
        assert_eq!(missing[0].method, "Banka Havalesi");
    }

    #[test]
    fn test_render_summary() {
        let reconciliation = ReconciliationReport::from_checks(
            dec!(0.01),
            vec![
                CheckResult::compare("grand_total", dec!(100), dec!(100), dec!(0.01)),
                CheckResult::compare("project_total[MKM]", dec!(60), dec!(61), dec!(0.01)),
            ],
        );
        let structure = vec![StructureCheck {
            scope: "general".to_string(),
            method: "Nakit".to_string(),
            present: true,
        }];

        let out = render(&reconciliation, &structure);
        assert!(out.contains("✅ grand_total"));
        assert!(out.contains("❌ project_total[MKM]: expected 60, actual 61, difference 1"));
        assert!(out.contains("❌ 1 of 3 checks failed"));
    }

    #[test]
    fn test_render_all_passed() {
        let out = render(&ReconciliationReport::from_checks(dec!(0.01), Vec::new()), &[]);
        assert!(out.contains("✅ All 0 checks passed"));
    }
}
