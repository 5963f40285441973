//! Report data types.
//!
//! Field names are part of the wire contract consumed by rendered reports and
//! diagnostics: `tl`, `usd` and `total_usd` on every method summary,
//! `project_summary` keyed by lower-case project code, and one
//! `<project>_payment_methods` map per project.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tahsilat_shared::types::{LocationKey, MethodName, ProjectKey};

use super::aggregator::accumulate;
use crate::payment::{InvalidRecordError, PaymentRecord};
use crate::reconcile::ReconciliationReport;

/// Totals for one payment method within a scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSummary {
    /// Face value of TL payments.
    pub tl: Decimal,
    /// Face value of non-TL payments, not converted.
    pub usd: Decimal,
    /// USD-equivalent of every payment.
    pub total_usd: Decimal,
}

impl MethodSummary {
    /// Adds one record to the summary.
    pub fn add(&mut self, record: &PaymentRecord) {
        if record.is_local_currency() {
            accumulate(&mut self.tl, record.amount);
        } else {
            accumulate(&mut self.usd, record.amount);
        }
        accumulate(&mut self.total_usd, record.amount_usd);
    }

    /// Returns true if every field is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.tl.is_zero() && self.usd.is_zero() && self.total_usd.is_zero()
    }
}

/// Method name → summary.
pub type MethodBreakdown = BTreeMap<MethodName, MethodSummary>;

/// USD-equivalent totals per project at one location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSummary {
    /// Per-project totals, serialized as `mkm`, `msm`, ...
    #[serde(flatten)]
    pub projects: BTreeMap<ProjectKey, Decimal>,
    /// Total across projects.
    pub total: Decimal,
}

impl LocationSummary {
    /// Returns the total for a project, zero if absent.
    #[must_use]
    pub fn project(&self, project: &ProjectKey) -> Decimal {
        self.projects.get(project).copied().unwrap_or_default()
    }
}

/// Location key → summary.
pub type LocationBreakdown = BTreeMap<LocationKey, LocationSummary>;

/// USD-equivalent grand totals per project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectSummary(pub BTreeMap<ProjectKey, Decimal>);

impl ProjectSummary {
    /// Returns the total for a project, zero if absent.
    #[must_use]
    pub fn get(&self, project: &ProjectKey) -> Decimal {
        self.0.get(project).copied().unwrap_or_default()
    }

    /// Returns the sum across projects, saturating at the decimal range.
    #[must_use]
    pub fn grand_total(&self) -> Decimal {
        self.0
            .values()
            .fold(Decimal::ZERO, |total, value| total.saturating_add(*value))
    }

    /// Iterates over projects and totals.
    pub fn iter(&self) -> impl Iterator<Item = (&ProjectKey, &Decimal)> {
        self.0.iter()
    }
}

/// Per-project method breakdowns.
///
/// Serialized as one top-level `<project>_payment_methods` field per project
/// when flattened into a report; other fields are ignored on the way back in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectMethods(pub BTreeMap<ProjectKey, MethodBreakdown>);

const PROJECT_METHODS_SUFFIX: &str = "_payment_methods";

impl ProjectMethods {
    /// Returns the breakdown for a project, if present.
    #[must_use]
    pub fn get(&self, project: &ProjectKey) -> Option<&MethodBreakdown> {
        self.0.get(project)
    }

    /// Iterates over projects and breakdowns.
    pub fn iter(&self) -> impl Iterator<Item = (&ProjectKey, &MethodBreakdown)> {
        self.0.iter()
    }
}

impl Serialize for ProjectMethods {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (project, breakdown) in &self.0 {
            map.serialize_entry(
                &format!("{}{PROJECT_METHODS_SUFFIX}", project.field_name()),
                breakdown,
            )?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ProjectMethods {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ProjectMethodsVisitor;

        impl<'de> Visitor<'de> for ProjectMethodsVisitor {
            type Value = ProjectMethods;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map with <project>_payment_methods entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut projects = BTreeMap::new();
                while let Some(key) = access.next_key::<String>()? {
                    match key.strip_suffix(PROJECT_METHODS_SUFFIX) {
                        Some(code) if !code.is_empty() => {
                            let project =
                                ProjectKey::new(code).map_err(serde::de::Error::custom)?;
                            projects.insert(project, access.next_value::<MethodBreakdown>()?);
                        }
                        _ => {
                            access.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(ProjectMethods(projects))
            }
        }

        deserializer.deserialize_map(ProjectMethodsVisitor)
    }
}

/// Aggregates for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// First day of the month.
    pub month: NaiveDate,
    /// Per-project USD-equivalent totals.
    pub project_summary: ProjectSummary,
    /// Per-location totals.
    pub location_summary: LocationBreakdown,
    /// USD-equivalent collected per day.
    #[serde(default)]
    pub daily_totals: BTreeMap<NaiveDate, Decimal>,
    /// Method breakdown across all projects.
    pub payment_methods: MethodBreakdown,
    /// Method breakdown per project.
    #[serde(flatten)]
    pub project_methods: ProjectMethods,
}

/// Yearly report: general and per-project breakdowns plus monthly detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyReport {
    /// Calendar year.
    pub year: i32,
    /// Per-project USD-equivalent totals.
    pub project_summary: ProjectSummary,
    /// Per-location totals.
    pub location_summary: LocationBreakdown,
    /// Method breakdown across all projects.
    pub payment_methods: MethodBreakdown,
    /// Method breakdown per project.
    #[serde(flatten)]
    pub project_methods: ProjectMethods,
    /// Months that have data, in calendar order.
    #[serde(default)]
    pub monthly_reports: Vec<MonthlyReport>,
}

/// Aggregates for one week, or the part of a week inside one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyReport {
    /// First day covered.
    pub start_date: NaiveDate,
    /// Last day covered.
    pub end_date: NaiveDate,
    /// USD-equivalent collected per customer.
    pub customer_summary: BTreeMap<String, Decimal>,
    /// Method breakdown across all projects.
    pub payment_methods: MethodBreakdown,
    /// Per-project USD-equivalent totals.
    pub project_summary: ProjectSummary,
    /// Per-location totals.
    pub location_summary: LocationBreakdown,
}

/// A record left out of the report, with the rule it broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// The record as read from the ledger.
    pub record: PaymentRecord,
    /// Why it was rejected.
    pub reason: InvalidRecordError,
}

/// Everything a report call produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    /// Best-effort report over the valid records.
    pub report: YearlyReport,
    /// Records excluded from every sum.
    pub rejected: Vec<RejectedRecord>,
    /// Consistency findings for `report`.
    pub reconciliation: ReconciliationReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn mkm() -> ProjectKey {
        ProjectKey::new("MKM").unwrap()
    }

    fn cash() -> MethodName {
        MethodName::from_static(MethodName::CASH)
    }

    #[test]
    fn test_location_summary_shape() {
        let summary = LocationSummary {
            projects: BTreeMap::from([(mkm(), dec!(10.5))]),
            total: dec!(10.5),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["mkm"], "10.5");
        assert_eq!(json["total"], "10.5");

        let back: LocationSummary = serde_json::from_value(json).unwrap();
        assert_eq!(back, summary);
    }

    #[test]
    fn test_project_methods_field_names() {
        let methods = ProjectMethods(BTreeMap::from([(
            mkm(),
            BTreeMap::from([(cash(), MethodSummary::default())]),
        )]));
        let json = serde_json::to_value(&methods).unwrap();
        assert!(json.get("mkm_payment_methods").is_some());
        assert_eq!(json["mkm_payment_methods"]["Nakit"]["total_usd"], "0");
    }

    #[test]
    fn test_project_methods_ignore_other_fields() {
        let json = serde_json::json!({
            "mkm_payment_methods": { "Nakit": { "tl": "1", "usd": "2", "total_usd": "3" } },
            "payment_methods": {},
            "_payment_methods": {},
            "debug": { "total_payments": 0 }
        });
        let methods: ProjectMethods = serde_json::from_value(json).unwrap();
        assert_eq!(methods.0.len(), 1);
        let nakit = methods.get(&mkm()).unwrap()[&cash()];
        assert_eq!(nakit.tl, dec!(1));
        assert_eq!(nakit.total_usd, dec!(3));
    }

    #[test]
    fn test_method_summary_accepts_numbers() {
        let summary: MethodSummary =
            serde_json::from_str(r#"{"tl": 3000, "usd": 500.5, "total_usd": "600"}"#).unwrap();
        assert_eq!(summary.tl, dec!(3000));
        assert_eq!(summary.usd, dec!(500.5));
        assert_eq!(summary.total_usd, dec!(600));
    }
}
