mod controller;
mod state;

pub use controller::OnboardingWizard;
pub use state::{NextOutcome, WizardState, WizardStatus};
