//! Ledger store collaborator.
//!
//! This module defines what the report engine needs from the store:
//! - Query filters by year, project and month
//! - The `LedgerSource` snapshot seam
//! - An in-memory ledger for tests and diagnostics
//! - Errors for an unavailable store

pub mod error;
pub mod query;
pub mod source;

pub use error::LedgerUnavailableError;
pub use query::{LedgerQuery, MAX_YEAR, MIN_YEAR, ProjectFilter};
pub use source::{InMemoryLedger, LedgerSource};
