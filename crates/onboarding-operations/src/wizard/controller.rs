use onboarding_core::{DraftField, OrganizationDraft, Plan, WizardStep};
use tracing::{debug, info, warn};

use super::state::{NextOutcome, WizardState, WizardStatus};
use crate::field_store::FieldStore;
use crate::submission::{SUBMIT_FAILED_MESSAGE, SubmissionOrchestrator, SubmissionReceipt};
use crate::traits::{
    CREATE_ORGANIZATION_PERMISSION, PermissionChecker, RemoteExecutor, WizardCallbacks,
};
use crate::validation::{DraftValidator, ValidationErrors};
use crate::{OperationError, Result};

/// Drives one onboarding session from the first step to submission.
///
/// Forward navigation validates only the current step. The last step
/// submits through the [`SubmissionOrchestrator`]; a failed submission
/// keeps the wizard on that step so the user can retry.
pub struct OnboardingWizard<R, C> {
    store: FieldStore,
    step: WizardStep,
    is_submitting: bool,
    status: WizardStatus,
    validator: DraftValidator,
    orchestrator: SubmissionOrchestrator<R>,
    callbacks: C,
}

impl<R, C> OnboardingWizard<R, C>
where
    R: RemoteExecutor + 'static,
    C: WizardCallbacks,
{
    /// Open a wizard over `draft`, starting at the first step.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::PermissionDenied` unless `permissions`
    /// grants organization creation.
    pub fn open(
        permissions: &dyn PermissionChecker,
        draft: OrganizationDraft,
        validator: DraftValidator,
        orchestrator: SubmissionOrchestrator<R>,
        callbacks: C,
    ) -> Result<Self> {
        if !permissions.has_permission(CREATE_ORGANIZATION_PERMISSION) {
            warn!(
                permission = CREATE_ORGANIZATION_PERMISSION,
                "onboarding wizard refused"
            );
            return Err(OperationError::PermissionDenied {
                permission: CREATE_ORGANIZATION_PERMISSION,
            });
        }

        debug!("onboarding wizard opened");
        Ok(Self {
            store: FieldStore::new(draft),
            step: WizardStep::first(),
            is_submitting: false,
            status: WizardStatus::Open,
            validator,
            orchestrator,
            callbacks,
        })
    }

    #[must_use]
    pub fn state(&self) -> WizardState {
        WizardState {
            step: self.step,
            is_submitting: self.is_submitting,
            status: self.status,
        }
    }

    #[must_use]
    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    #[must_use]
    pub fn draft(&self) -> &OrganizationDraft {
        self.store.draft()
    }

    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        self.store.errors()
    }

    #[must_use]
    pub fn status(&self) -> WizardStatus {
        self.status
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    #[must_use]
    pub fn plans(&self) -> &[Plan] {
        self.validator.plans()
    }

    /// The catalog entry matching the draft's plan id, if any.
    #[must_use]
    pub fn selected_plan(&self) -> Option<&Plan> {
        self.validator
            .plan(self.store.draft().get(DraftField::PlanId).trim())
    }

    #[must_use]
    pub fn callbacks(&self) -> &C {
        &self.callbacks
    }

    /// Store a field value. Values are never validated on write.
    ///
    /// # Errors
    ///
    /// Fails when the wizard is closed or a submission is running.
    pub fn update_field(&mut self, field: DraftField, value: impl Into<String>) -> Result<()> {
        self.ensure_editable()?;
        self.store.update_field(field, value);
        Ok(())
    }

    /// Go back one step without validating. No-op on the first step.
    ///
    /// # Errors
    ///
    /// Fails when the wizard is closed or a submission is running.
    pub fn back(&mut self) -> Result<WizardStep> {
        self.ensure_editable()?;
        if let Some(previous) = self.step.previous() {
            debug!(from = %self.step, to = %previous, "wizard moved back");
            self.step = previous;
        }
        Ok(self.step)
    }

    /// Validate the current step and advance, or submit on the last step.
    ///
    /// # Errors
    ///
    /// Fails when the wizard is closed or a submission is running. Field
    /// and submission failures are reported through [`NextOutcome`].
    pub fn next(&mut self) -> Result<NextOutcome> {
        self.ensure_editable()?;

        let errors = self.validator.validate(self.step, self.store.draft());
        if !errors.is_empty() {
            debug!(step = %self.step, errors = errors.len(), "step has validation errors");
            self.store.replace_errors(errors.clone());
            return Ok(NextOutcome::Blocked(errors));
        }
        self.store.clear_errors();

        match self.step.next() {
            Some(next) => {
                debug!(from = %self.step, to = %next, "wizard advanced");
                self.step = next;
                Ok(NextOutcome::Advanced(next))
            }
            None => Ok(self.submit()),
        }
    }

    /// Abandon the session from any step, discarding the draft.
    ///
    /// # Errors
    ///
    /// Fails when the wizard is already closed or a submission is running.
    pub fn close(&mut self) -> Result<()> {
        self.ensure_editable()?;
        self.store.discard();
        self.status = WizardStatus::Abandoned;
        info!(step = %self.step, "onboarding wizard abandoned");
        self.callbacks.on_close();
        Ok(())
    }

    fn submit(&mut self) -> NextOutcome {
        self.is_submitting = true;
        let result = self
            .orchestrator
            .submit(self.store.draft(), self.validator.today());
        self.is_submitting = false;

        match result {
            Ok(receipt) => {
                self.complete(&receipt);
                NextOutcome::Completed(receipt)
            }
            Err(err) => {
                warn!(error = %err, "organization submission failed");
                if let Some(id) = err.orphaned_organization_id() {
                    warn!(organization_id = %id, "keeping organization for retry");
                    self.store.set_organization_id(id);
                }
                self.store.set_submit_error(SUBMIT_FAILED_MESSAGE);
                NextOutcome::SubmitFailed(SUBMIT_FAILED_MESSAGE.to_string())
            }
        }
    }

    fn complete(&mut self, receipt: &SubmissionReceipt) {
        self.store.set_organization_id(receipt.organization_id.clone());
        self.store.clear_errors();
        self.status = WizardStatus::Completed;
        self.callbacks.on_success(receipt);
        self.callbacks.on_close();
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.status != WizardStatus::Open {
            return Err(OperationError::WizardClosed);
        }
        if self.is_submitting {
            return Err(OperationError::SubmissionInProgress);
        }
        Ok(())
    }
}
