//! Saga pattern for multi-phase operations against remote services.
//!
//! A saga threads one data value through an ordered list of steps. Every
//! completed step keeps a snapshot of the data it produced; when a later step
//! fails, completed steps are compensated in reverse order with their own
//! snapshot, so a compensation can undo exactly what its step created.

mod audit;
mod builder;
mod error;
mod saga;
mod step;

pub use audit::{SagaAuditLog, StepRecord, StepStatus};
pub use builder::SagaBuilder;
pub use error::{CompensationError, SagaError};
pub use saga::Saga;
pub use step::SagaStep;
