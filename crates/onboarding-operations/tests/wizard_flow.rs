//! End-to-end tests driving the wizard through the public API.
//!
//! The dry-run executor stands in for the remote layer; a wrapper around it
//! injects subscription failures to exercise rollback and retry.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use onboarding_core::{BillingCycle, DraftField, OrganizationDraft, Plan, WizardStep};
use onboarding_operations::OperationError;
use onboarding_operations::providers::{DryRunExecutor, StaticPermissionChecker};
use onboarding_operations::submission::{
    SUBMIT_FAILED_MESSAGE, SubmissionOrchestrator, SubmissionReceipt,
};
use onboarding_operations::traits::{
    RemoteError, RemoteExecutor, RemoteOperation, WizardCallbacks,
};
use onboarding_operations::validation::DraftValidator;
use onboarding_operations::wizard::{NextOutcome, OnboardingWizard, WizardStatus};
use serde_json::Value;

#[derive(Default)]
struct Notes {
    events: Vec<String>,
}

impl WizardCallbacks for Notes {
    fn on_success(&mut self, receipt: &SubmissionReceipt) {
        self.events.push(format!("success:{}", receipt.organization_id));
    }

    fn on_close(&mut self) {
        self.events.push("close".to_string());
    }
}

/// Fails the first `failures` subscription requests.
struct FlakySubscriptions {
    inner: DryRunExecutor,
    failures: AtomicUsize,
}

impl FlakySubscriptions {
    fn new(failures: usize) -> Self {
        Self {
            inner: DryRunExecutor::new(),
            failures: AtomicUsize::new(failures),
        }
    }
}

impl RemoteExecutor for FlakySubscriptions {
    fn execute(&self, operation: RemoteOperation, variables: &Value) -> Result<Value, RemoteError> {
        if operation == RemoteOperation::CreateSubscription
            && self
                .failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
        {
            return Err(RemoteError::new("payment provider unavailable"));
        }
        self.inner.execute(operation, variables)
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
}

fn plans() -> Vec<Plan> {
    vec![Plan {
        id: "growth".to_string(),
        name: "Growth".to_string(),
        currency: "USD".to_string(),
        amount: 79.0,
        features: vec!["Online giving".to_string()],
    }]
}

fn open<R: RemoteExecutor + 'static>(executor: Arc<R>) -> OnboardingWizard<R, Notes> {
    OnboardingWizard::open(
        &StaticPermissionChecker::new(["organizations.create"]),
        OrganizationDraft::with_defaults("+1", BillingCycle::Yearly),
        DraftValidator::new(today()).with_plans(plans()),
        SubmissionOrchestrator::new(executor),
        Notes::default(),
    )
    .expect("permission granted")
}

fn fill_and_advance<R: RemoteExecutor + 'static>(
    wizard: &mut OnboardingWizard<R, Notes>,
) -> anyhow::Result<()> {
    let steps: [(WizardStep, &[(DraftField, &str)]); 4] = [
        (
            WizardStep::BasicInfo,
            &[
                (DraftField::Name, "Grace Chapel"),
                (DraftField::Email, "info@grace.org"),
                (DraftField::Phone, "(615) 555-0100"),
            ],
        ),
        (
            WizardStep::Address,
            &[
                (DraftField::Address, "12 Elm Street"),
                (DraftField::City, "Nashville"),
                (DraftField::State, "TN"),
                (DraftField::Country, "USA"),
            ],
        ),
        (
            WizardStep::AdminUser,
            &[
                (DraftField::AdminFirstName, "Ruth"),
                (DraftField::AdminLastName, "Boaz"),
                (DraftField::AdminEmail, "ruth@grace.org"),
                (DraftField::AdminPassword, "correct-horse"),
            ],
        ),
        (
            WizardStep::SubscriptionPlan,
            &[
                (DraftField::PlanId, "growth"),
                (DraftField::StartDate, "2026-11-01"),
            ],
        ),
    ];

    for (step, values) in steps {
        assert_eq!(wizard.current_step(), step);
        assert!(wizard.next()?.is_blocked(), "empty {step} should not pass");
        for (field, value) in values {
            wizard.update_field(*field, *value)?;
        }
        assert!(matches!(wizard.next()?, NextOutcome::Advanced(_)));
    }
    assert_eq!(wizard.current_step(), WizardStep::Review);
    Ok(())
}

#[test]
fn full_onboarding_issues_both_phases() -> anyhow::Result<()> {
    let executor = Arc::new(DryRunExecutor::new());
    let mut wizard = open(Arc::clone(&executor));

    fill_and_advance(&mut wizard)?;
    let outcome = wizard.next()?;

    let NextOutcome::Completed(receipt) = outcome else {
        panic!("expected completion, got {outcome:?}");
    };
    assert_eq!(wizard.status(), WizardStatus::Completed);
    assert_eq!(
        wizard.callbacks().events,
        vec![format!("success:{}", receipt.organization_id), "close".to_string()]
    );

    let journal = executor.journal();
    let ops: Vec<_> = journal.iter().map(|issued| issued.operation).collect();
    assert_eq!(
        ops,
        vec![
            RemoteOperation::CreateOrganization,
            RemoteOperation::CreateSubscription
        ]
    );
    let org = &journal[0].variables["input"];
    assert_eq!(org["phone"], "+1 (615) 555-0100");
    assert_eq!(org["adminUser"]["password"], "***");
    let sub = &journal[1].variables["input"];
    assert_eq!(sub["organizationId"], receipt.organization_id.as_str());
    assert_eq!(sub["planId"], "growth");
    assert_eq!(sub["startDate"], "2026-11-01");
    assert_eq!(sub["metadata"]["billingCycle"], "YEARLY");
    Ok(())
}

#[test]
fn failed_subscription_rolls_back_and_retry_succeeds() -> anyhow::Result<()> {
    let executor = Arc::new(FlakySubscriptions::new(1));
    let mut wizard = open(Arc::clone(&executor));
    fill_and_advance(&mut wizard)?;

    let first = wizard.next()?;
    assert_eq!(first, NextOutcome::SubmitFailed(SUBMIT_FAILED_MESSAGE.to_string()));
    assert_eq!(wizard.current_step(), WizardStep::Review);
    assert!(wizard.callbacks().events.is_empty());

    let second = wizard.next()?;
    assert!(matches!(second, NextOutcome::Completed(_)));

    let ops: Vec<_> = executor
        .inner
        .journal()
        .into_iter()
        .map(|issued| issued.operation)
        .collect();
    assert_eq!(
        ops,
        vec![
            RemoteOperation::CreateOrganization,
            RemoteOperation::DeactivateOrganization,
            RemoteOperation::CreateOrganization,
            RemoteOperation::CreateSubscription,
        ]
    );
    Ok(())
}

#[test]
fn abandoning_midway_sends_nothing() -> anyhow::Result<()> {
    let executor = Arc::new(DryRunExecutor::new());
    let mut wizard = open(Arc::clone(&executor));
    wizard.update_field(DraftField::Name, "Grace Chapel")?;
    wizard.update_field(DraftField::Email, "info@grace.org")?;
    wizard.next()?;

    wizard.close()?;

    assert_eq!(wizard.callbacks().events, vec!["close".to_string()]);
    assert!(executor.journal().is_empty());
    assert!(matches!(wizard.back(), Err(OperationError::WizardClosed)));
    Ok(())
}

#[test]
fn wizard_refuses_without_permission() {
    let result = OnboardingWizard::open(
        &StaticPermissionChecker::default(),
        OrganizationDraft::default(),
        DraftValidator::new(today()),
        SubmissionOrchestrator::new(Arc::new(DryRunExecutor::new())),
        Notes::default(),
    );

    assert!(matches!(result, Err(OperationError::PermissionDenied { .. })));
}
