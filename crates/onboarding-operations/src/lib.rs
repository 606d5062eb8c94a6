mod error;
pub mod field_store;
pub mod providers;
pub mod submission;
pub mod traits;
pub mod validation;
pub mod wizard;

#[cfg(test)]
pub mod mocks;

pub use error::{CompensationFailure, OperationError, Result};
