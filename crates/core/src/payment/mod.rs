//! Payment records and their validation rules.

pub mod error;
pub mod record;
pub mod validation;

pub use error::InvalidRecordError;
pub use record::{NewPayment, PaymentRecord};
pub use validation::validate_record;
