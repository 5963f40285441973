//! Common types used across the application.

pub mod money;
pub mod names;

pub use money::Currency;
pub use names::{EmptyNameError, LocationKey, MethodName, ProjectKey};
