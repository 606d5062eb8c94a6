use std::io::IsTerminal;

use dialoguer::{Input, Password, Select};
use onboarding_core::{BillingCycle, DraftField, Plan, WizardStep};

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepAction {
    Next,
    Back,
    Cancel,
}

/// Stdin is a terminal, or `CHURCH_ONBOARD_FORCE_TTY` is set.
pub(crate) fn is_interactive() -> bool {
    std::env::var("CHURCH_ONBOARD_FORCE_TTY").is_ok() || std::io::stdin().is_terminal()
}

/// Ask for a new value of `field`, offering `current` as the starting point.
pub(crate) fn prompt_field(field: DraftField, current: &str, plans: &[Plan]) -> Result<String> {
    match field {
        DraftField::PlanId if !plans.is_empty() => select_plan(current, plans),
        DraftField::BillingCycle => select_billing_cycle(current),
        _ if field.is_secret() => Password::new()
            .with_prompt(field.label())
            .allow_empty_password(true)
            .interact()
            .map_err(dialoguer_to_cli_error),
        _ => {
            let value: String = Input::new()
                .with_prompt(field.label())
                .with_initial_text(current)
                .allow_empty(true)
                .interact_text()
                .map_err(dialoguer_to_cli_error)?;
            Ok(value)
        }
    }
}

fn select_plan(current: &str, plans: &[Plan]) -> Result<String> {
    let items: Vec<String> = plans.iter().map(ToString::to_string).collect();
    let default = plans.iter().position(|p| p.id == current).unwrap_or(0);

    let selection = Select::new()
        .with_prompt(DraftField::PlanId.label())
        .items(&items)
        .default(default)
        .interact_opt()
        .map_err(dialoguer_to_cli_error)?;

    Ok(match selection {
        Some(index) => plans[index].id.clone(),
        None => current.to_string(),
    })
}

fn select_billing_cycle(current: &str) -> Result<String> {
    let cycles = [BillingCycle::Monthly, BillingCycle::Yearly];
    let items = cycles.map(BillingCycle::as_str);
    let default = current
        .parse::<BillingCycle>()
        .ok()
        .and_then(|c| cycles.iter().position(|&x| x == c))
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt(DraftField::BillingCycle.label())
        .items(items)
        .default(default)
        .interact_opt()
        .map_err(dialoguer_to_cli_error)?;

    Ok(match selection {
        Some(index) => cycles[index].as_str().to_string(),
        None => current.to_string(),
    })
}

pub(crate) fn choose_action(step: WizardStep) -> Result<StepAction> {
    let forward = if step.is_last() { "Submit" } else { "Next" };
    let mut actions = vec![(forward, StepAction::Next)];
    if step.previous().is_some() {
        actions.push(("Back", StepAction::Back));
    }
    actions.push(("Cancel onboarding", StepAction::Cancel));

    let labels: Vec<&str> = actions.iter().map(|(label, _)| *label).collect();
    let selection = Select::new()
        .with_prompt("What next?")
        .items(&labels)
        .default(0)
        .interact_opt()
        .map_err(dialoguer_to_cli_error)?;

    Ok(selection.map_or(StepAction::Cancel, |index| actions[index].1))
}

fn dialoguer_to_cli_error(e: dialoguer::Error) -> CliError {
    match e {
        dialoguer::Error::IO(io_err) => CliError::Io(io_err),
    }
}
