//! Report routes.
//!
//! Every handler reads one snapshot of the requested year and builds its
//! response from that snapshot only.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;
use tahsilat_core::ledger::LedgerQuery;
use tahsilat_core::payment::PaymentRecord;
use tahsilat_core::reconcile::ReconciliationReport;
use tahsilat_core::reports::{RejectedRecord, ReportError, WeeklyReport, YearlyReport};
use tahsilat_shared::{AppError, AppResult};
use tracing::error;

use crate::AppState;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/yearly/{year}", get(get_yearly_report))
        .route(
            "/reports/yearly/{year}/reconciliation",
            get(get_reconciliation),
        )
        .route("/reports/weekly/{year}", get(get_weekly_reports))
}

// ============================================================================
// Response Types
// ============================================================================

/// Yearly report with the records left out and the consistency findings.
#[derive(Debug, Serialize)]
pub struct YearlyReportResponse {
    /// The report itself, flattened into the top level.
    #[serde(flatten)]
    pub report: YearlyReport,
    /// Records excluded from every sum.
    pub rejected_records: Vec<RejectedRecordResponse>,
    /// Reconciliation of `report`.
    pub reconciliation: ReconciliationReport,
}

/// A rejected record in a response.
#[derive(Debug, Serialize)]
pub struct RejectedRecordResponse {
    /// The stored record.
    pub record: PaymentRecord,
    /// Machine-readable reason.
    pub code: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl From<RejectedRecord> for RejectedRecordResponse {
    fn from(rejected: RejectedRecord) -> Self {
        Self {
            code: rejected.reason.error_code(),
            message: rejected.reason.to_string(),
            record: rejected.record,
        }
    }
}

/// Weekly reports for one year.
#[derive(Debug, Serialize)]
pub struct WeeklyReportsResponse {
    /// Calendar year.
    pub year: i32,
    /// Week portions sorted by start date.
    pub weeks: Vec<WeeklyReport>,
    /// Records excluded from every sum.
    pub rejected_records: Vec<RejectedRecordResponse>,
}

// ============================================================================
// Handlers
// ============================================================================

async fn get_yearly_report(State(state): State<AppState>, Path(year): Path<i32>) -> Response {
    let snapshot = match load_snapshot(&state, year).await {
        Ok(snapshot) => snapshot,
        Err(e) => return error_response(&e),
    };

    let outcome = state.reports.build_report(&snapshot, year);
    Json(YearlyReportResponse {
        report: outcome.report,
        rejected_records: outcome.rejected.into_iter().map(Into::into).collect(),
        reconciliation: outcome.reconciliation,
    })
    .into_response()
}

async fn get_reconciliation(State(state): State<AppState>, Path(year): Path<i32>) -> Response {
    let snapshot = match load_snapshot(&state, year).await {
        Ok(snapshot) => snapshot,
        Err(e) => return error_response(&e),
    };

    let outcome = state.reports.build_report(&snapshot, year);
    Json(outcome.reconciliation).into_response()
}

async fn get_weekly_reports(State(state): State<AppState>, Path(year): Path<i32>) -> Response {
    let snapshot = match load_snapshot(&state, year).await {
        Ok(snapshot) => snapshot,
        Err(e) => return error_response(&e),
    };

    let (weeks, rejected) = state.reports.build_weekly(&snapshot, year);
    Json(WeeklyReportsResponse {
        year,
        weeks,
        rejected_records: rejected.into_iter().map(Into::into).collect(),
    })
    .into_response()
}

// ============================================================================
// Helper Functions
// ============================================================================

async fn load_snapshot(state: &AppState, year: i32) -> AppResult<Vec<PaymentRecord>> {
    let query = LedgerQuery::year(year);
    query.date_range().map_err(app_error)?;

    state.ledger.snapshot(&query).await.map_err(|e| {
        error!(error = %e, year, "Failed to read ledger snapshot");
        app_error(ReportError::from(e))
    })
}

fn app_error(err: ReportError) -> AppError {
    match err {
        ReportError::InvalidYear(_) | ReportError::InvalidMonth(_) => {
            AppError::Validation(err.to_string())
        }
        ReportError::LedgerUnavailable(e) => AppError::LedgerUnavailable(e.to_string()),
    }
}

fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}
