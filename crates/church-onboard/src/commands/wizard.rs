use std::sync::Arc;

use chrono::NaiveDate;
use onboarding_config::OnboardingConfig;
use onboarding_core::{DraftField, OrganizationDraft, Plan, WizardStep};
use onboarding_operations::providers::{DryRunExecutor, StaticPermissionChecker};
use onboarding_operations::submission::{SubmissionOrchestrator, SubmissionReceipt};
use onboarding_operations::traits::{CREATE_ORGANIZATION_PERMISSION, WizardCallbacks};
use onboarding_operations::validation::{DraftValidator, ValidationErrors};
use onboarding_operations::wizard::{NextOutcome, OnboardingWizard};
use tracing::{debug, warn};

use crate::error::{CliError, Result};
use crate::interaction::{StepAction, choose_action, is_interactive, prompt_field};

struct TerminalCallbacks;

impl WizardCallbacks for TerminalCallbacks {
    fn on_success(&mut self, receipt: &SubmissionReceipt) {
        println!();
        println!("Organization {} is ready.", receipt.organization_id);
        println!("Subscription {} is active.", receipt.subscription_id);
    }

    fn on_close(&mut self) {
        println!("Onboarding wizard closed.");
    }
}

pub(crate) fn run(
    config: &OnboardingConfig,
    today: NaiveDate,
    draft: OrganizationDraft,
) -> Result<()> {
    if !is_interactive() {
        return Err(CliError::NotATty);
    }

    if !config.is_granted(CREATE_ORGANIZATION_PERMISSION) {
        warn!(
            permission = CREATE_ORGANIZATION_PERMISSION,
            "configuration does not grant organization creation"
        );
    }

    let executor = Arc::new(DryRunExecutor::new());
    let permissions = StaticPermissionChecker::new(config.granted_permissions().iter().cloned());
    let mut wizard = OnboardingWizard::open(
        &permissions,
        draft,
        DraftValidator::new(today).with_plans(config.plan_list()),
        SubmissionOrchestrator::new(Arc::clone(&executor)),
        TerminalCallbacks,
    )?;

    loop {
        let step = wizard.current_step();
        println!();
        println!("Step {} of {}: {step}", step.index() + 1, WizardStep::ALL.len());

        if step == WizardStep::Review {
            print_review(wizard.draft(), wizard.selected_plan());
        } else {
            for &field in step.fields() {
                let current = wizard.draft().get(field).to_string();
                let value = prompt_field(field, &current, wizard.plans())?;
                wizard.update_field(field, value)?;
            }
        }

        match choose_action(step)? {
            StepAction::Next => match wizard.next()? {
                NextOutcome::Advanced(_) => {}
                NextOutcome::Blocked(errors) => print_errors(&errors),
                NextOutcome::Completed(_) => break,
                NextOutcome::SubmitFailed(message) => {
                    debug!(
                        organization_id = ?wizard.draft().organization_id(),
                        "submission failed"
                    );
                    eprintln!("{message}");
                }
            },
            StepAction::Back => {
                wizard.back()?;
            }
            StepAction::Cancel => {
                wizard.close()?;
                return Ok(());
            }
        }
    }

    let journal = executor.journal();
    println!();
    println!("Dry run issued {} operation(s):", journal.len());
    for issued in journal {
        println!("  {} -> {}", issued.operation, issued.id);
    }
    Ok(())
}

fn print_errors(errors: &ValidationErrors) {
    eprintln!("Please fix the following before continuing:");
    for (key, message) in errors.iter() {
        eprintln!("  {key}: {message}");
    }
}

fn print_review(draft: &OrganizationDraft, plan: Option<&Plan>) {
    for step in WizardStep::ALL {
        if step.fields().is_empty() {
            continue;
        }
        println!("{step}");
        for &field in step.fields() {
            let value = draft.get(field);
            let shown = if field.is_secret() && !value.is_empty() {
                "********"
            } else {
                value
            };
            println!("  {:<26} {shown}", field.label());
        }
    }
    if let Some(plan) = plan {
        println!();
        println!("Plan: {plan}");
        for feature in &plan.features {
            println!("  - {feature}");
        }
    } else if !draft.get(DraftField::PlanId).is_empty() {
        println!();
        println!("Plan '{}' is not in the catalog.", draft.get(DraftField::PlanId));
    }
}
