//! Payment report generation.
//!
//! This module turns a ledger snapshot into report structures:
//! - Method breakdowns, general and per project
//! - Project and location summaries
//! - Monthly detail with daily totals
//! - Weekly reports split at month boundaries

pub mod aggregator;
pub mod error;
pub mod service;
pub mod types;
pub mod weekly;


pub use aggregator::Aggregator;
pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
