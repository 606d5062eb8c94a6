use crate::submission::SubmissionReceipt;

/// Notifications the wizard sends to its host.
pub trait WizardCallbacks {
    /// Called exactly once, after a successful submission.
    fn on_success(&mut self, receipt: &SubmissionReceipt);

    /// Called when the wizard is abandoned or after a successful submission.
    fn on_close(&mut self);
}
