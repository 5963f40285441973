//! Repository abstractions for data access.

pub mod payment;

pub use payment::{AppendError, MalformedRowError, PaymentRepository, ledger_error};
