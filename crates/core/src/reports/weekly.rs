//! Weekly reports.
//!
//! Weeks start on Monday. A week that crosses a month boundary is reported
//! as two portions so that weekly totals always roll up into monthly ones.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};

use super::aggregator::{Aggregator, accumulate, month_start};
use super::types::WeeklyReport;
use crate::ledger::ProjectFilter;
use crate::payment::PaymentRecord;

/// First Monday on or before `date`.
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// Last day of the month containing `date`.
#[must_use]
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let start = month_start(date);
    let next = start
        .checked_add_months(chrono::Months::new(1))
        .unwrap_or(NaiveDate::MAX);
    next.pred_opt().unwrap_or(next)
}

/// Date range of the week portion containing `date`.
///
/// The range is clamped to the month of `date`.
#[must_use]
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = week_start(date);
    let end = start + Days::new(6);
    (start.max(month_start(date)), end.min(month_end(date)))
}

impl Aggregator {
    /// One report per week portion that has records, sorted by start date.
    ///
    /// Records are expected to be validated already.
    #[must_use]
    pub fn weekly_reports(&self, records: &[PaymentRecord]) -> Vec<WeeklyReport> {
        let mut weeks: BTreeMap<(NaiveDate, NaiveDate), Vec<PaymentRecord>> = BTreeMap::new();
        for record in records {
            weeks
                .entry(week_bounds(record.payment_date))
                .or_default()
                .push(record.clone());
        }

        weeks
            .into_iter()
            .map(|((start_date, end_date), records)| {
                let mut customer_summary = BTreeMap::new();
                for record in &records {
                    accumulate(
                        customer_summary
                            .entry(record.customer_name.clone())
                            .or_default(),
                        record.amount_usd,
                    );
                }

                WeeklyReport {
                    start_date,
                    end_date,
                    customer_summary,
                    payment_methods: self.method_breakdown(&records, &ProjectFilter::All),
                    project_summary: self.project_summary(&records),
                    location_summary: self.location_summary(&records),
                }
            })
            .collect()
    }
}
