//! `shiftstock-core` — shared domain primitives.
//!
//! Pure types only: no IO, no HTTP, no mail transport.

pub mod error;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use value_object::ValueObject;
