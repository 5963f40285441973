//! Grouped sums over a ledger snapshot.
//!
//! Every function here is a pure function of the records passed in. Input
//! order does not matter and all maps are ordered, so the same snapshot always
//! produces the same output.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;
use tahsilat_shared::ReportSettings;
use tahsilat_shared::types::{LocationKey, MethodName, ProjectKey};
use tracing::warn;

use super::types::{
    LocationBreakdown, LocationSummary, MethodBreakdown, MethodSummary, MonthlyReport,
    ProjectMethods, ProjectSummary, YearlyReport,
};
use crate::classify::location_for;
use crate::ledger::ProjectFilter;
use crate::payment::PaymentRecord;

/// Computes method, project and location breakdowns.
///
/// Groups are discovered from the records. The known lists only add
/// zero-filled entries for categories with no records.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    known_methods: Vec<MethodName>,
    known_projects: Vec<ProjectKey>,
    known_locations: Vec<LocationKey>,
}

impl Aggregator {
    /// Creates an aggregator from report settings.
    ///
    /// Blank entries in the known lists are skipped with a warning.
    #[must_use]
    pub fn new(settings: &ReportSettings) -> Self {
        Self {
            known_methods: parse_known(&settings.known_methods, |s| MethodName::new(s)),
            known_projects: parse_known(&settings.known_projects, |s| ProjectKey::new(s)),
            known_locations: parse_known(&settings.known_locations, |s| LocationKey::new(s)),
        }
    }

    /// Method breakdown for the records in scope.
    #[must_use]
    pub fn method_breakdown(
        &self,
        records: &[PaymentRecord],
        scope: &ProjectFilter,
    ) -> MethodBreakdown {
        let mut breakdown: MethodBreakdown = self
            .known_methods
            .iter()
            .map(|method| (method.clone(), MethodSummary::default()))
            .collect();

        for record in records.iter().filter(|r| scope.matches(&r.project)) {
            breakdown
                .entry(record.payment_method.clone())
                .or_default()
                .add(record);
        }
        breakdown
    }

    /// One method breakdown per project, known or observed.
    #[must_use]
    pub fn project_methods(&self, records: &[PaymentRecord]) -> ProjectMethods {
        ProjectMethods(
            self.projects(records)
                .into_iter()
                .map(|project| {
                    let breakdown =
                        self.method_breakdown(records, &ProjectFilter::Only(project.clone()));
                    (project, breakdown)
                })
                .collect(),
        )
    }

    /// USD-equivalent totals per project.
    #[must_use]
    pub fn project_summary(&self, records: &[PaymentRecord]) -> ProjectSummary {
        let mut totals: BTreeMap<ProjectKey, Decimal> = self
            .projects(records)
            .into_iter()
            .map(|project| (project, Decimal::ZERO))
            .collect();

        for record in records {
            accumulate(totals.entry(record.project.clone()).or_default(), record.amount_usd);
        }
        ProjectSummary(totals)
    }

    /// USD-equivalent totals per location, split by project.
    #[must_use]
    pub fn location_summary(&self, records: &[PaymentRecord]) -> LocationBreakdown {
        let empty = LocationSummary {
            projects: self
                .projects(records)
                .into_iter()
                .map(|project| (project, Decimal::ZERO))
                .collect(),
            total: Decimal::ZERO,
        };

        let mut breakdown: LocationBreakdown = self
            .known_locations
            .iter()
            .map(|location| (location.clone(), empty.clone()))
            .collect();

        for record in records {
            let location = location_for(&record.payment_method, &record.account_name);
            let summary = breakdown.entry(location).or_insert_with(|| empty.clone());
            accumulate(
                summary.projects.entry(record.project.clone()).or_default(),
                record.amount_usd,
            );
            accumulate(&mut summary.total, record.amount_usd);
        }
        breakdown
    }

    /// USD-equivalent totals per day.
    #[must_use]
    pub fn daily_totals(records: &[PaymentRecord]) -> BTreeMap<NaiveDate, Decimal> {
        let mut totals = BTreeMap::new();
        for record in records {
            accumulate(totals.entry(record.payment_date).or_default(), record.amount_usd);
        }
        totals
    }

    /// One report per calendar month that has records, in calendar order.
    #[must_use]
    pub fn monthly_reports(&self, records: &[PaymentRecord]) -> Vec<MonthlyReport> {
        let mut months: BTreeMap<NaiveDate, Vec<PaymentRecord>> = BTreeMap::new();
        for record in records {
            months
                .entry(month_start(record.payment_date))
                .or_default()
                .push(record.clone());
        }

        months
            .into_iter()
            .map(|(month, records)| MonthlyReport {
                month,
                project_summary: self.project_summary(&records),
                location_summary: self.location_summary(&records),
                daily_totals: Self::daily_totals(&records),
                payment_methods: self.method_breakdown(&records, &ProjectFilter::All),
                project_methods: self.project_methods(&records),
            })
            .collect()
    }

    /// Full yearly report over records that are already validated and in year.
    #[must_use]
    pub fn yearly_report(&self, year: i32, records: &[PaymentRecord]) -> YearlyReport {
        YearlyReport {
            year,
            project_summary: self.project_summary(records),
            location_summary: self.location_summary(records),
            payment_methods: self.method_breakdown(records, &ProjectFilter::All),
            project_methods: self.project_methods(records),
            monthly_reports: self.monthly_reports(records),
        }
    }

    fn projects(&self, records: &[PaymentRecord]) -> BTreeSet<ProjectKey> {
        self.known_projects
            .iter()
            .cloned()
            .chain(records.iter().map(|r| r.project.clone()))
            .collect()
    }
}

/// Adds `value` to `total`, saturating at the decimal range.
///
/// Snapshots admitted by `ReportService::partition` never reach the bound.
pub(crate) fn accumulate(total: &mut Decimal, value: Decimal) {
    let current = *total;
    *total = current.checked_add(value).unwrap_or_else(|| {
        warn!(total = %current, value = %value, "Report total overflowed, saturating");
        current.saturating_add(value)
    });
}

/// First day of the month containing `date`.
#[must_use]
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

fn parse_known<T, E: std::fmt::Display>(
    raw: &[String],
    parse: impl Fn(&str) -> Result<T, E>,
) -> Vec<T> {
    raw.iter()
        .filter_map(|value| match parse(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(error = %e, "Skipping known report entry");
                None
            }
        })
        .collect()
}
