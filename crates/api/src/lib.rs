//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for yearly, weekly and reconciliation reports
//! - The async ledger read seam used by handlers
//! - Response types

pub mod ledger;
pub mod routes;

use axum::Router;
use std::sync::Arc;
use tahsilat_core::reports::ReportService;
use tahsilat_shared::ReportSettings;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use ledger::LedgerReader;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Ledger store.
    pub ledger: Arc<dyn LedgerReader>,
    /// Report builder.
    pub reports: Arc<ReportService>,
}

impl AppState {
    /// Creates state over a ledger with the given report settings.
    pub fn new(ledger: impl LedgerReader + 'static, settings: &ReportSettings) -> Self {
        Self {
            ledger: Arc::new(ledger),
            reports: Arc::new(ReportService::new(settings)),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
