//! Cross-view consistency checks for yearly reports.
//!
//! The reconciler takes a computed report and verifies that its views agree:
//! - Per method, the general totals equal the sum over projects
//! - Each project total equals the sum of its method totals
//! - Location totals match project totals
//! - Monthly totals sum to the yearly ones
//! - The grand total is the same from every angle
//!
//! A failed check is data, not an error.

pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use service::Reconciler;
pub use types::{CheckResult, ReconciliationReport};
