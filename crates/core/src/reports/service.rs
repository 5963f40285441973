//! Report generation service.

use chrono::Datelike;
use rust_decimal::Decimal;
use tahsilat_shared::ReportSettings;
use tracing::{debug, error, info};

use super::aggregator::Aggregator;
use super::error::ReportError;
use super::types::{RejectedRecord, ReportOutcome, WeeklyReport};
use crate::ledger::{LedgerQuery, LedgerSource};
use crate::payment::{InvalidRecordError, PaymentRecord, validate_record};
use crate::reconcile::Reconciler;

/// Builds yearly and weekly reports from ledger snapshots.
///
/// Stateless apart from its settings; safe to share between requests.
#[derive(Debug, Clone)]
pub struct ReportService {
    aggregator: Aggregator,
    reconciler: Reconciler,
}

impl ReportService {
    /// Creates a service from report settings.
    #[must_use]
    pub fn new(settings: &ReportSettings) -> Self {
        Self {
            aggregator: Aggregator::new(settings),
            reconciler: Reconciler::new(settings.tolerance),
        }
    }

    /// Returns the aggregator used for reports.
    #[must_use]
    pub const fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Returns the reconciler used for reports.
    #[must_use]
    pub const fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    /// Splits a snapshot into valid in-year records and rejected ones.
    ///
    /// Records dated outside `year` are dropped silently; they belong to
    /// another report rather than being invalid. A record that would push the
    /// snapshot totals past the decimal range is rejected, so no sum over the
    /// accepted records can overflow.
    #[must_use]
    pub fn partition(
        snapshot: &[PaymentRecord],
        year: i32,
    ) -> (Vec<PaymentRecord>, Vec<RejectedRecord>) {
        let mut valid = Vec::with_capacity(snapshot.len());
        let mut rejected = Vec::new();
        let mut totals = SnapshotTotals::default();

        for record in snapshot {
            if record.payment_date.year() != year {
                debug!(id = ?record.id, date = %record.payment_date, year, "Skipping record outside year");
                continue;
            }
            match validate_record(record).and_then(|()| totals.admit(record)) {
                Ok(()) => valid.push(record.clone()),
                Err(reason) => {
                    debug!(id = ?record.id, code = reason.error_code(), "Rejected payment record");
                    rejected.push(RejectedRecord {
                        record: record.clone(),
                        reason,
                    });
                }
            }
        }
        (valid, rejected)
    }

    /// Builds the yearly report for a snapshot and reconciles it.
    ///
    /// Invalid records are excluded and returned in `rejected`; they never
    /// abort the report.
    #[must_use]
    pub fn build_report(&self, snapshot: &[PaymentRecord], year: i32) -> ReportOutcome {
        let (valid, rejected) = Self::partition(snapshot, year);
        let report = self.aggregator.yearly_report(year, &valid);
        let reconciliation = self.reconciler.reconcile(&report);

        info!(
            year,
            records = valid.len(),
            rejected = rejected.len(),
            months = report.monthly_reports.len(),
            reconciled = reconciliation.passed,
            "Yearly report generated"
        );

        ReportOutcome {
            report,
            rejected,
            reconciliation,
        }
    }

    /// Builds the weekly reports for a snapshot.
    #[must_use]
    pub fn build_weekly(
        &self,
        snapshot: &[PaymentRecord],
        year: i32,
    ) -> (Vec<WeeklyReport>, Vec<RejectedRecord>) {
        let (valid, rejected) = Self::partition(snapshot, year);
        let weeks = self.aggregator.weekly_reports(&valid);
        info!(
            year,
            weeks = weeks.len(),
            rejected = rejected.len(),
            "Weekly reports generated"
        );
        (weeks, rejected)
    }

    /// Reads a snapshot for the year and builds its report.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is out of range or the ledger cannot be
    /// read. An unreadable ledger never yields an empty report.
    pub fn generate(
        &self,
        ledger: &impl LedgerSource,
        year: i32,
    ) -> Result<ReportOutcome, ReportError> {
        let snapshot = Self::snapshot(ledger, year)?;
        Ok(self.build_report(&snapshot, year))
    }

    /// Reads a snapshot for the year and builds its weekly reports.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is out of range or the ledger cannot be
    /// read.
    pub fn generate_weekly(
        &self,
        ledger: &impl LedgerSource,
        year: i32,
    ) -> Result<(Vec<WeeklyReport>, Vec<RejectedRecord>), ReportError> {
        let snapshot = Self::snapshot(ledger, year)?;
        Ok(self.build_weekly(&snapshot, year))
    }

    fn snapshot(
        ledger: &impl LedgerSource,
        year: i32,
    ) -> Result<Vec<PaymentRecord>, ReportError> {
        let query = LedgerQuery::year(year);
        query.date_range()?;
        ledger.snapshot(&query).map_err(|e| {
            error!(error = %e, year, "Ledger snapshot failed");
            ReportError::from(e)
        })
    }
}

/// Face and USD totals over the records accepted so far.
///
/// Every report figure is a partial sum of one of these over non-negative
/// values, so it is bounded by them.
#[derive(Debug, Default)]
struct SnapshotTotals {
    tl: Decimal,
    foreign: Decimal,
    usd: Decimal,
}

impl SnapshotTotals {
    fn admit(&mut self, record: &PaymentRecord) -> Result<(), InvalidRecordError> {
        let (tl, foreign) = if record.is_local_currency() {
            (self.tl.checked_add(record.amount), Some(self.foreign))
        } else {
            (Some(self.tl), self.foreign.checked_add(record.amount))
        };
        match (tl, foreign, self.usd.checked_add(record.amount_usd)) {
            (Some(tl), Some(foreign), Some(usd)) => {
                *self = Self { tl, foreign, usd };
                Ok(())
            }
            _ => Err(InvalidRecordError::SumOverflow {
                amount: record.amount,
            }),
        }
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new(&ReportSettings::default())
    }
}
