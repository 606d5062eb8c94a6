use std::ops::RangeInclusive;
use std::sync::LazyLock;

use chrono::NaiveDate;
use onboarding_core::{DraftField, OrganizationDraft, Plan, WizardStep};
use regex::Regex;

use super::errors::ValidationErrors;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Accepted number of digits in a phone number once formatting is stripped.
pub const PHONE_DIGITS: RangeInclusive<usize> = 7..=12;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9 \-()]+$").expect("phone pattern is a valid regex")
});

/// Per-step validation of an [`OrganizationDraft`].
///
/// Validation is pure: the same draft always yields the same errors for a
/// given `today` and plan catalog.
#[derive(Debug, Clone)]
pub struct DraftValidator {
    today: NaiveDate,
    plans: Vec<Plan>,
}

impl DraftValidator {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            plans: Vec::new(),
        }
    }

    /// Restrict plan selection to `plans`. An empty catalog accepts any id.
    #[must_use]
    pub fn with_plans(mut self, plans: Vec<Plan>) -> Self {
        self.plans = plans;
        self
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    #[must_use]
    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    #[must_use]
    pub fn plan(&self, id: &str) -> Option<&Plan> {
        self.plans.iter().find(|plan| plan.id == id)
    }

    /// Errors for the fields owned by `step`.
    #[must_use]
    pub fn validate(&self, step: WizardStep, draft: &OrganizationDraft) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        match step {
            WizardStep::BasicInfo => Self::check_basic_info(draft, &mut errors),
            WizardStep::Address => Self::check_address(draft, &mut errors),
            WizardStep::AdminUser => Self::check_admin_user(draft, &mut errors),
            WizardStep::SubscriptionPlan => self.check_subscription_plan(draft, &mut errors),
            WizardStep::Review => {}
        }
        errors
    }

    /// Errors for every step, in step order.
    #[must_use]
    pub fn validate_all(&self, draft: &OrganizationDraft) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for step in WizardStep::ALL {
            errors.merge(self.validate(step, draft));
        }
        errors
    }

    /// First step whose fields currently fail validation.
    #[must_use]
    pub fn first_invalid_step(&self, draft: &OrganizationDraft) -> Option<WizardStep> {
        WizardStep::ALL
            .into_iter()
            .find(|step| !self.validate(*step, draft).is_empty())
    }

    fn check_basic_info(draft: &OrganizationDraft, errors: &mut ValidationErrors) {
        require(draft, DraftField::Name, "Organization name is required", errors);
        check_email(draft, DraftField::Email, errors);
        check_phone(draft, DraftField::Phone, errors);
    }

    fn check_address(draft: &OrganizationDraft, errors: &mut ValidationErrors) {
        require(draft, DraftField::Address, "Address is required", errors);
        require(draft, DraftField::City, "City is required", errors);
        require(draft, DraftField::State, "State is required", errors);
        require(draft, DraftField::Country, "Country is required", errors);
    }

    fn check_admin_user(draft: &OrganizationDraft, errors: &mut ValidationErrors) {
        require(draft, DraftField::AdminFirstName, "First name is required", errors);
        require(draft, DraftField::AdminLastName, "Last name is required", errors);
        check_email(draft, DraftField::AdminEmail, errors);
        check_phone(draft, DraftField::AdminPhone, errors);

        let password = draft.get(DraftField::AdminPassword);
        if password.is_empty() {
            errors.insert(DraftField::AdminPassword, "Password is required");
        } else if password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.insert(
                DraftField::AdminPassword,
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
            );
        }
    }

    fn check_subscription_plan(&self, draft: &OrganizationDraft, errors: &mut ValidationErrors) {
        let plan_id = draft.get(DraftField::PlanId).trim();
        if plan_id.is_empty() {
            errors.insert(DraftField::PlanId, "Please select a subscription plan");
        } else if !self.plans.is_empty() && self.plan(plan_id).is_none() {
            errors.insert(DraftField::PlanId, "Selected plan is not available");
        }

        if draft.billing_cycle().is_none() {
            errors.insert(
                DraftField::BillingCycle,
                "Billing cycle must be MONTHLY or YEARLY",
            );
        }

        if !draft.get(DraftField::StartDate).trim().is_empty() {
            match draft.start_date() {
                None => errors.insert(
                    DraftField::StartDate,
                    "Start date must be a valid date (YYYY-MM-DD)",
                ),
                Some(date) if date < self.today => {
                    errors.insert(DraftField::StartDate, "Start date cannot be in the past");
                }
                Some(_) => {}
            }
        }
    }
}

fn require(
    draft: &OrganizationDraft,
    field: DraftField,
    message: &str,
    errors: &mut ValidationErrors,
) {
    if draft.get(field).trim().is_empty() {
        errors.insert(field, message);
    }
}

fn check_email(draft: &OrganizationDraft, field: DraftField, errors: &mut ValidationErrors) {
    let email = draft.get(field).trim();
    if email.is_empty() {
        errors.insert(field, "Email is required");
    } else if !EMAIL_PATTERN.is_match(email) {
        errors.insert(field, "Please enter a valid email address");
    }
}

fn check_phone(draft: &OrganizationDraft, field: DraftField, errors: &mut ValidationErrors) {
    let phone = draft.get(field);
    if phone.trim().is_empty() {
        return;
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !PHONE_PATTERN.is_match(phone) || !PHONE_DIGITS.contains(&digits) {
        errors.insert(field, "Please enter a valid phone number");
    }
}
