//! Core business logic for Tahsilat.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Payment records, aggregation rules and consistency checks live here.
//!
//! # Modules
//!
//! - `payment` - Payment records and validation rules
//! - `currency` - USD-equivalent derivation
//! - `classify` - Location classification
//! - `ledger` - Ledger queries and the snapshot seam
//! - `reports` - Yearly, monthly and weekly aggregation
//! - `reconcile` - Cross-view consistency checks

pub mod classify;
pub mod currency;
pub mod ledger;
pub mod payment;
pub mod reconcile;
pub mod reports;
