//! Reconciliation checks.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use tahsilat_shared::types::{MethodName, ProjectKey};
use tracing::{debug, warn};

use super::types::{CheckResult, ReconciliationReport};
use crate::reports::{MethodBreakdown, MethodSummary, MonthlyReport, YearlyReport};

/// Summary field compared by the method checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Tl,
    Usd,
    TotalUsd,
}

impl Field {
    const ALL: [Self; 3] = [Self::Tl, Self::Usd, Self::TotalUsd];

    const fn name(self) -> &'static str {
        match self {
            Self::Tl => "tl",
            Self::Usd => "usd",
            Self::TotalUsd => "total_usd",
        }
    }

    const fn of(self, summary: &MethodSummary) -> Decimal {
        match self {
            Self::Tl => summary.tl,
            Self::Usd => summary.usd,
            Self::TotalUsd => summary.total_usd,
        }
    }
}

/// A sum that remembers whether it left the decimal range.
#[derive(Debug, Clone, Copy, Default)]
struct Total {
    value: Decimal,
    overflowed: bool,
}

impl Total {
    const fn exact(value: Decimal) -> Self {
        Self {
            value,
            overflowed: false,
        }
    }

    fn of(values: impl IntoIterator<Item = Decimal>) -> Self {
        values.into_iter().fold(Self::default(), |total, value| {
            match total.value.checked_add(value) {
                Some(sum) => Self {
                    value: sum,
                    ..total
                },
                None => Self {
                    value: total.value.saturating_add(value),
                    overflowed: true,
                },
            }
        })
    }
}

/// Verifies that the views of a yearly report agree with each other.
#[derive(Debug, Clone, Copy)]
pub struct Reconciler {
    tolerance: Decimal,
}

impl Reconciler {
    /// Creates a reconciler. Two values are equal iff `|a - b| < tolerance`.
    #[must_use]
    pub const fn new(tolerance: Decimal) -> Self {
        Self { tolerance }
    }

    /// Returns the configured tolerance.
    #[must_use]
    pub const fn tolerance(&self) -> Decimal {
        self.tolerance
    }

    /// Runs every check against the report.
    #[must_use]
    pub fn reconcile(&self, report: &YearlyReport) -> ReconciliationReport {
        let mut checks = Vec::new();
        self.method_partition(report, &mut checks);
        self.project_totals(report, &mut checks);
        self.location_vs_project(report, &mut checks);
        self.monthly_vs_yearly(report, &mut checks);
        self.grand_total(report, &mut checks);

        let result = ReconciliationReport::from_checks(self.tolerance, checks);
        for failure in result.failures() {
            warn!(
                year = report.year,
                check = %failure.check_name,
                expected = %failure.expected,
                actual = %failure.actual,
                difference = %failure.difference,
                "Reconciliation check failed"
            );
        }
        debug!(
            year = report.year,
            checks = result.checks.len(),
            passed = result.passed,
            "Reconciliation finished"
        );
        result
    }

    /// General method totals equal the sum of the per-project ones.
    fn method_partition(&self, report: &YearlyReport, checks: &mut Vec<CheckResult>) {
        let methods = method_names(
            std::iter::once(&report.payment_methods)
                .chain(report.project_methods.iter().map(|(_, m)| m)),
        );

        for method in &methods {
            for field in Field::ALL {
                let expected = Total::exact(field_of(&report.payment_methods, method, field));
                let actual = Total::of(
                    report
                        .project_methods
                        .iter()
                        .map(|(_, breakdown)| field_of(breakdown, method, field)),
                );
                checks.push(self.compare(
                    format!("method_partition[{method}].{}", field.name()),
                    expected,
                    actual,
                ));
            }
        }
    }

    /// Each project total equals the sum of its method totals.
    fn project_totals(&self, report: &YearlyReport, checks: &mut Vec<CheckResult>) {
        let projects: BTreeSet<&ProjectKey> = report
            .project_summary
            .iter()
            .map(|(p, _)| p)
            .chain(report.project_methods.iter().map(|(p, _)| p))
            .collect();

        for project in projects {
            let actual = report
                .project_methods
                .get(project)
                .map(|breakdown| Total::of(breakdown.values().map(|s| s.total_usd)))
                .unwrap_or_default();
            checks.push(self.compare(
                format!("project_total[{project}]"),
                Total::exact(report.project_summary.get(project)),
                actual,
            ));
        }
    }

    /// Location totals per project, and overall, match the project summary.
    fn location_vs_project(&self, report: &YearlyReport, checks: &mut Vec<CheckResult>) {
        let locations = &report.location_summary;
        let projects: BTreeSet<&ProjectKey> = report
            .project_summary
            .iter()
            .map(|(p, _)| p)
            .chain(locations.values().flat_map(|l| l.projects.keys()))
            .collect();

        for project in projects {
            checks.push(self.compare(
                format!("location_vs_project[{project}]"),
                Total::exact(report.project_summary.get(project)),
                Total::of(locations.values().map(|l| l.project(project))),
            ));
        }

        checks.push(self.compare(
            "location_vs_project[total]",
            project_grand_total(report),
            Total::of(locations.values().map(|l| l.total)),
        ));
    }

    /// Monthly method totals sum to the yearly ones, generally and per project.
    fn monthly_vs_yearly(&self, report: &YearlyReport, checks: &mut Vec<CheckResult>) {
        let months = &report.monthly_reports;

        self.compare_scope(
            "general",
            &report.payment_methods,
            months.iter().map(|m| &m.payment_methods),
            checks,
        );

        let projects: BTreeSet<&ProjectKey> = report
            .project_methods
            .iter()
            .map(|(p, _)| p)
            .chain(months.iter().flat_map(|m| m.project_methods.iter().map(|(p, _)| p)))
            .collect();

        let empty = MethodBreakdown::new();
        for project in projects {
            let yearly = report.project_methods.get(project).unwrap_or(&empty);
            self.compare_scope(
                project.as_str(),
                yearly,
                months.iter().filter_map(|m: &MonthlyReport| m.project_methods.get(project)),
                checks,
            );
        }
    }

    fn compare_scope<'a>(
        &self,
        scope: &str,
        yearly: &'a MethodBreakdown,
        monthly: impl Iterator<Item = &'a MethodBreakdown> + Clone,
        checks: &mut Vec<CheckResult>,
    ) {
        let methods = method_names(std::iter::once(yearly).chain(monthly.clone()));
        for method in &methods {
            for field in Field::ALL {
                let actual = Total::of(
                    monthly
                        .clone()
                        .map(|breakdown| field_of(breakdown, method, field)),
                );
                checks.push(self.compare(
                    format!("monthly_vs_yearly[{scope}][{method}].{}", field.name()),
                    Total::exact(field_of(yearly, method, field)),
                    actual,
                ));
            }
        }
    }

    /// Sum of general method totals equals the sum of project totals.
    fn grand_total(&self, report: &YearlyReport, checks: &mut Vec<CheckResult>) {
        checks.push(self.compare(
            "grand_total",
            project_grand_total(report),
            Total::of(report.payment_methods.values().map(|s| s.total_usd)),
        ));
    }

    fn compare(&self, name: impl Into<String>, expected: Total, actual: Total) -> CheckResult {
        let check = CheckResult::compare(name, expected.value, actual.value, self.tolerance);
        if expected.overflowed || actual.overflowed {
            check.fail()
        } else {
            check
        }
    }
}

fn method_names<'a>(
    breakdowns: impl Iterator<Item = &'a MethodBreakdown>,
) -> BTreeSet<&'a MethodName> {
    breakdowns.flat_map(|b| b.keys()).collect()
}

fn field_of(breakdown: &MethodBreakdown, method: &MethodName, field: Field) -> Decimal {
    breakdown
        .get(method)
        .map(|summary| field.of(summary))
        .unwrap_or_default()
}

fn project_grand_total(report: &YearlyReport) -> Total {
    Total::of(report.project_summary.iter().map(|(_, total)| *total))
}
