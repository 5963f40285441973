//! `SeaORM` entity definitions.

pub mod payments;
