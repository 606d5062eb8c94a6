use onboarding_core::WizardStep;

use crate::submission::SubmissionReceipt;
use crate::validation::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStatus {
    #[default]
    Open,
    Completed,
    Abandoned,
}

/// Snapshot of the controller's navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardState {
    pub step: WizardStep,
    pub is_submitting: bool,
    pub status: WizardStatus,
}

/// Result of a forward navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextOutcome {
    /// The current step was valid; the wizard moved on to this step.
    Advanced(WizardStep),
    /// The current step has errors; the wizard stayed where it was.
    Blocked(ValidationErrors),
    Completed(SubmissionReceipt),
    /// Submission failed; carries the message stored under the submit key.
    SubmitFailed(String),
}

impl NextOutcome {
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }
}
