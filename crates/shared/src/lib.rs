//! Shared types, errors, and configuration for Tahsilat.
//!
//! This crate provides common types used across all other crates:
//! - Validated grouping keys (payment method, project, location)
//! - Currency classification
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ReportSettings};
pub use error::{AppError, AppResult};
