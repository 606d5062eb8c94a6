mod context;
mod orchestrator;
mod saga_data;
mod saga_steps;

pub use context::SubmissionContext;
pub use orchestrator::{SUBMIT_FAILED_MESSAGE, SubmissionOrchestrator, SubmissionReceipt};
pub use saga_data::SubmissionSagaData;
pub use saga_steps::{CreateSubscriptionStep, EnsureOrganizationStep};
