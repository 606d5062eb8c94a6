use std::sync::Arc;

use chrono::NaiveDate;
use onboarding_core::OrganizationDraft;
use onboarding_saga::SagaBuilder;
use tracing::{debug, info, warn};

use super::context::SubmissionContext;
use super::saga_data::SubmissionSagaData;
use super::saga_steps::{CreateSubscriptionStep, EnsureOrganizationStep};
use crate::traits::RemoteExecutor;
use crate::{OperationError, Result};

/// The only submission message ever shown to the user.
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to create organization. Please try again.";

/// Identifiers produced by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub organization_id: String,
    pub subscription_id: String,
    /// `false` when the organization came from an earlier flow.
    pub organization_created: bool,
}

/// Runs the two-phase organization and subscription submission.
pub struct SubmissionOrchestrator<R> {
    executor: Arc<R>,
}

impl<R> Clone for SubmissionOrchestrator<R> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
        }
    }
}

impl<R> SubmissionOrchestrator<R>
where
    R: RemoteExecutor + 'static,
{
    #[must_use]
    pub fn new(executor: Arc<R>) -> Self {
        Self { executor }
    }

    #[must_use]
    pub fn executor(&self) -> &R {
        &self.executor
    }

    /// Create the organization (unless `draft` already names one), then its
    /// subscription. An organization created here is deactivated again if
    /// the subscription cannot be created.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::SagaFailed` when a step fails and its
    /// rollback succeeded, or `OperationError::SagaCompensationFailed` when
    /// the rollback failed as well.
    pub fn submit(&self, draft: &OrganizationDraft, today: NaiveDate) -> Result<SubmissionReceipt> {
        let saga = SagaBuilder::new()
            .first_step(EnsureOrganizationStep::<R>::new())
            .then(CreateSubscriptionStep::<R>::new())
            .build();

        let ctx = SubmissionContext::new(Arc::clone(&self.executor));
        let data = SubmissionSagaData::new(draft.clone(), today);

        info!(
            existing_organization = data.organization_id.is_some(),
            steps = ?saga.step_names(),
            "submitting organization"
        );
        let (result, audit) = saga.execute_with_audit(&ctx, data);
        debug!(audit = %audit.summary(), "submission saga finished");

        match result {
            Ok(data) => receipt(data),
            Err(err) => {
                let err = OperationError::from(err);
                warn!(
                    error = %err,
                    cause = %err.root_cause(),
                    rolled_back = ?audit.compensated_steps(),
                    "submission failed"
                );
                Err(err)
            }
        }
    }
}

fn receipt(data: SubmissionSagaData) -> Result<SubmissionReceipt> {
    let organization_id = data.organization_id.ok_or(OperationError::MissingPrecondition {
        field: "organizationId",
    })?;
    let subscription_id = data
        .subscription_id
        .ok_or(OperationError::MissingPrecondition {
            field: "subscriptionId",
        })?;
    info!(
        organization_id = %organization_id,
        subscription_id = %subscription_id,
        "organization onboarded"
    );
    Ok(SubmissionReceipt {
        organization_id,
        subscription_id,
        organization_created: data.organization_created,
    })
}

#[cfg(test)]
mod tests {
    use onboarding_core::DraftField;
    use serde_json::json;

    use super::*;
    use crate::mocks::MockRemoteExecutor;
    use crate::traits::RemoteOperation;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
    }

    fn draft() -> OrganizationDraft {
        OrganizationDraft::default()
            .with_value(DraftField::Name, "Grace Chapel")
            .with_value(DraftField::Email, "office@grace.org")
            .with_value(DraftField::AdminPassword, "s3cret-pass")
            .with_value(DraftField::PlanId, "starter")
    }

    fn orchestrator(
        executor: MockRemoteExecutor,
    ) -> (
        Arc<MockRemoteExecutor>,
        SubmissionOrchestrator<MockRemoteExecutor>,
    ) {
        let executor = Arc::new(executor);
        (Arc::clone(&executor), SubmissionOrchestrator::new(executor))
    }

    #[test]
    fn creates_organization_then_subscription() -> anyhow::Result<()> {
        let (executor, orchestrator) = orchestrator(
            MockRemoteExecutor::new()
                .with_organization_id("org-1")
                .with_subscription_id("sub-1"),
        );

        let receipt = orchestrator.submit(&draft(), today())?;

        assert_eq!(
            receipt,
            SubmissionReceipt {
                organization_id: "org-1".to_string(),
                subscription_id: "sub-1".to_string(),
                organization_created: true,
            }
        );
        let ops: Vec<_> = executor.calls().into_iter().map(|(op, _)| op).collect();
        assert_eq!(
            ops,
            vec![
                RemoteOperation::CreateOrganization,
                RemoteOperation::CreateSubscription
            ]
        );
        let sub = &executor.calls_for(RemoteOperation::CreateSubscription)[0];
        assert_eq!(sub["input"]["organizationId"], "org-1");
        Ok(())
    }

    #[test]
    fn existing_organization_is_reused() -> anyhow::Result<()> {
        let (executor, orchestrator) = orchestrator(MockRemoteExecutor::new());

        let receipt = orchestrator.submit(&draft().with_organization_id("org-9"), today())?;

        assert_eq!(receipt.organization_id, "org-9");
        assert!(!receipt.organization_created);
        assert_eq!(executor.call_count(RemoteOperation::CreateOrganization), 0);
        assert_eq!(executor.call_count(RemoteOperation::CreateSubscription), 1);
        Ok(())
    }

    #[test]
    fn subscription_failure_deactivates_new_organization() {
        let (executor, orchestrator) = orchestrator(
            MockRemoteExecutor::new()
                .with_organization_id("org-5")
                .with_failure(RemoteOperation::CreateSubscription, "billing unavailable"),
        );

        let err = orchestrator
            .submit(&draft(), today())
            .expect_err("subscription failure should fail the submission");

        assert!(
            matches!(err, OperationError::SagaFailed { ref step, .. } if step == "create_subscription")
        );
        assert!(matches!(err.root_cause(), OperationError::Remote { .. }));
        assert_eq!(
            executor.calls_for(RemoteOperation::DeactivateOrganization),
            vec![json!({ "id": "org-5" })]
        );
    }

    #[test]
    fn subscription_failure_leaves_reused_organization_alone() {
        let (executor, orchestrator) = orchestrator(
            MockRemoteExecutor::new()
                .with_failure(RemoteOperation::CreateSubscription, "billing unavailable"),
        );

        let result = orchestrator.submit(&draft().with_organization_id("org-9"), today());

        assert!(result.is_err());
        assert_eq!(executor.call_count(RemoteOperation::DeactivateOrganization), 0);
    }

    #[test]
    fn missing_plan_rolls_back_without_subscription_call() {
        let (executor, orchestrator) = orchestrator(MockRemoteExecutor::new());
        let draft = draft().with_value(DraftField::PlanId, "");

        let err = orchestrator
            .submit(&draft, today())
            .expect_err("missing plan should fail");

        assert!(matches!(
            err.root_cause(),
            OperationError::MissingPrecondition { field: "planId" }
        ));
        assert_eq!(executor.call_count(RemoteOperation::CreateSubscription), 0);
        assert_eq!(executor.call_count(RemoteOperation::DeactivateOrganization), 1);
    }

    #[test]
    fn failed_rollback_is_reported() {
        let (_, orchestrator) = orchestrator(
            MockRemoteExecutor::new()
                .with_failure(RemoteOperation::CreateSubscription, "billing unavailable")
                .with_failure(RemoteOperation::DeactivateOrganization, "gateway timeout"),
        );

        let err = orchestrator
            .submit(&draft(), today())
            .expect_err("submission should fail");

        match err {
            OperationError::SagaCompensationFailed {
                step,
                compensation_failures,
                ..
            } => {
                assert_eq!(step, "create_subscription");
                assert_eq!(compensation_failures.len(), 1);
                assert_eq!(compensation_failures[0].step, "ensure_organization");
            }
            other => panic!("expected compensation failure, got {other:?}"),
        }
    }

    #[test]
    fn failed_rollback_exposes_orphaned_organization() {
        let (_, orchestrator) = orchestrator(
            MockRemoteExecutor::new()
                .with_organization_id("org-9")
                .with_failure(RemoteOperation::CreateSubscription, "billing unavailable")
                .with_failure(RemoteOperation::DeactivateOrganization, "gateway timeout"),
        );

        let err = orchestrator
            .submit(&draft(), today())
            .expect_err("submission should fail");

        assert_eq!(err.orphaned_organization_id(), Some("org-9"));
    }

    #[test]
    fn organization_failure_makes_no_further_calls() {
        let (executor, orchestrator) = orchestrator(
            MockRemoteExecutor::new()
                .with_failure(RemoteOperation::CreateOrganization, "name already taken"),
        );

        let result = orchestrator.submit(&draft(), today());

        assert!(result.is_err());
        assert_eq!(executor.calls().len(), 1);
    }
}
