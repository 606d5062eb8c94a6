use chrono::NaiveDate;
use onboarding_config::OnboardingConfig;
use onboarding_core::{OrganizationDraft, WizardStep};
use onboarding_operations::validation::DraftValidator;
use tracing::debug;

use crate::error::{CliError, Result};

pub(crate) fn run(
    config: &OnboardingConfig,
    today: NaiveDate,
    draft: &OrganizationDraft,
    step: Option<WizardStep>,
) -> Result<()> {
    let validator = DraftValidator::new(today).with_plans(config.plan_list());
    let errors = match step {
        Some(step) => validator.validate(step, draft),
        None => validator.validate_all(draft),
    };

    debug!(step = ?step, errors = errors.len(), "draft validated");

    if errors.is_empty() {
        match step {
            Some(step) => println!("{step} is valid."),
            None => println!("Draft is valid."),
        }
        return Ok(());
    }

    for (key, message) in errors.iter() {
        println!("{key}: {message}");
    }
    if let (None, Some(first)) = (step, validator.first_invalid_step(draft)) {
        println!();
        println!("The wizard would stop at step {}: {first}", first.index() + 1);
    }
    Err(CliError::InvalidDraft {
        count: errors.len(),
    })
}
