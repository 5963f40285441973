//! Ledger snapshot filters.

use chrono::{Datelike, NaiveDate};
use tahsilat_shared::types::ProjectKey;

use crate::payment::PaymentRecord;
use crate::reports::ReportError;

/// Earliest year a report can be requested for.
pub const MIN_YEAR: i32 = 1900;
/// Latest year a report can be requested for.
pub const MAX_YEAR: i32 = 9999;

/// Project scope of a query or aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProjectFilter {
    /// Every project.
    #[default]
    All,
    /// A single project.
    Only(ProjectKey),
}

impl ProjectFilter {
    /// Returns true if the project is in scope.
    #[must_use]
    pub fn matches(&self, project: &ProjectKey) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == project,
        }
    }
}

/// Selects the records of one year, optionally narrowed to a project and month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerQuery {
    /// Calendar year.
    pub year: i32,
    /// Project scope.
    pub project: ProjectFilter,
    /// Calendar month (1-12).
    pub month: Option<u32>,
}

impl LedgerQuery {
    /// Creates a query for every record of a year.
    #[must_use]
    pub const fn year(year: i32) -> Self {
        Self {
            year,
            project: ProjectFilter::All,
            month: None,
        }
    }

    /// Narrows the query to one project.
    #[must_use]
    pub fn for_project(mut self, project: ProjectKey) -> Self {
        self.project = ProjectFilter::Only(project);
        self
    }

    /// Narrows the query to one month.
    #[must_use]
    pub const fn in_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    /// Returns the half-open date range `[start, end)` the query covers.
    ///
    /// # Errors
    ///
    /// Returns an error if the year or month is out of range.
    pub fn date_range(&self) -> Result<(NaiveDate, NaiveDate), ReportError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(ReportError::InvalidYear(self.year));
        }

        let (start, end) = match self.month {
            None => (
                NaiveDate::from_ymd_opt(self.year, 1, 1),
                NaiveDate::from_ymd_opt(self.year + 1, 1, 1),
            ),
            Some(month) if (1..=12).contains(&month) => {
                let (next_year, next_month) = if month == 12 {
                    (self.year + 1, 1)
                } else {
                    (self.year, month + 1)
                };
                (
                    NaiveDate::from_ymd_opt(self.year, month, 1),
                    NaiveDate::from_ymd_opt(next_year, next_month, 1),
                )
            }
            Some(month) => return Err(ReportError::InvalidMonth(month)),
        };

        start
            .zip(end)
            .ok_or(ReportError::InvalidYear(self.year))
    }

    /// Returns true if the record falls inside the query.
    #[must_use]
    pub fn matches(&self, record: &PaymentRecord) -> bool {
        record.payment_date.year() == self.year
            && self.month.is_none_or(|m| record.payment_date.month() == m)
            && self.project.matches(&record.project)
    }
}
