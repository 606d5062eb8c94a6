use chrono::NaiveDate;
use onboarding_core::{DATE_FORMAT, DraftField, OrganizationDraft};
use serde_json::{Value, json};

/// Value threaded through the submission saga.
#[derive(Debug, Clone)]
pub struct SubmissionSagaData {
    pub draft: OrganizationDraft,
    pub start_date: NaiveDate,

    pub organization_id: Option<String>,
    /// Whether this saga created the organization (and so may deactivate it).
    pub organization_created: bool,
    pub subscription_id: Option<String>,
}

impl SubmissionSagaData {
    /// Start a submission for `draft`; an unset start date means `today`.
    #[must_use]
    pub fn new(draft: OrganizationDraft, today: NaiveDate) -> Self {
        let start_date = draft.start_date().unwrap_or(today);
        let organization_id = draft.organization_id().map(str::to_string);
        Self {
            draft,
            start_date,
            organization_id,
            organization_created: false,
            subscription_id: None,
        }
    }

    pub(super) fn organization_variables(&self) -> Value {
        let draft = &self.draft;
        json!({
            "input": {
                "name": draft.get(DraftField::Name).trim(),
                "email": draft.get(DraftField::Email).trim(),
                "phone": self.phone(DraftField::PhoneCountryCode, DraftField::Phone),
                "website": optional(draft.get(DraftField::Website)),
                "address": draft.get(DraftField::Address).trim(),
                "city": draft.get(DraftField::City).trim(),
                "state": draft.get(DraftField::State).trim(),
                "country": draft.get(DraftField::Country).trim(),
                "postalCode": optional(draft.get(DraftField::PostalCode)),
                "adminUser": {
                    "firstName": draft.get(DraftField::AdminFirstName).trim(),
                    "lastName": draft.get(DraftField::AdminLastName).trim(),
                    "email": draft.get(DraftField::AdminEmail).trim(),
                    "phone": self.phone(DraftField::AdminPhoneCountryCode, DraftField::AdminPhone),
                    "password": draft.get(DraftField::AdminPassword),
                },
            }
        })
    }

    pub(super) fn subscription_variables(&self, organization_id: &str, plan_id: &str) -> Value {
        let draft = &self.draft;
        json!({
            "input": {
                "organizationId": organization_id,
                "planId": plan_id,
                "startDate": self.start_date.format(DATE_FORMAT).to_string(),
                "metadata": {
                    "adminFirstName": draft.get(DraftField::AdminFirstName).trim(),
                    "adminLastName": draft.get(DraftField::AdminLastName).trim(),
                    "adminEmail": draft.get(DraftField::AdminEmail).trim(),
                    "adminPhone": self.phone(DraftField::AdminPhoneCountryCode, DraftField::AdminPhone),
                    "billingCycle": draft.billing_cycle().unwrap_or_default().as_str(),
                },
            }
        })
    }

    fn phone(&self, country_code: DraftField, number: DraftField) -> Value {
        let number = self.draft.get(number).trim();
        if number.is_empty() {
            return Value::Null;
        }
        let code = self.draft.get(country_code).trim();
        if code.is_empty() {
            Value::String(number.to_string())
        } else {
            Value::String(format!("{code} {number}"))
        }
    }
}

fn optional(value: &str) -> Value {
    let value = value.trim();
    if value.is_empty() {
        Value::Null
    } else {
        Value::String(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
    }

    #[test]
    fn start_date_defaults_to_today() {
        let data = SubmissionSagaData::new(OrganizationDraft::default(), today());

        assert_eq!(data.start_date, today());
        assert!(data.organization_id.is_none());
        assert!(!data.organization_created);
    }

    #[test]
    fn explicit_start_date_and_organization_id_are_carried_over() {
        let draft = OrganizationDraft::default()
            .with_value(DraftField::StartDate, "2026-12-01")
            .with_organization_id("org-9");

        let data = SubmissionSagaData::new(draft, today());

        assert_eq!(data.start_date, NaiveDate::from_ymd_opt(2026, 12, 1).expect("valid date"));
        assert_eq!(data.organization_id.as_deref(), Some("org-9"));
    }

    #[test]
    fn organization_variables_join_phone_and_null_blank_optionals() {
        let draft = OrganizationDraft::default()
            .with_value(DraftField::Name, " Grace Chapel ")
            .with_value(DraftField::Phone, "555-123-4567")
            .with_value(DraftField::AdminPassword, "correct horse");

        let vars = SubmissionSagaData::new(draft, today()).organization_variables();

        assert_eq!(vars["input"]["name"], "Grace Chapel");
        assert_eq!(vars["input"]["phone"], "+1 555-123-4567");
        assert_eq!(vars["input"]["website"], Value::Null);
        assert_eq!(vars["input"]["adminUser"]["phone"], Value::Null);
        assert_eq!(vars["input"]["adminUser"]["password"], "correct horse");
    }

    #[test]
    fn subscription_variables_carry_admin_metadata() {
        let draft = OrganizationDraft::default()
            .with_value(DraftField::AdminFirstName, "Ruth")
            .with_value(DraftField::AdminLastName, "Boaz")
            .with_value(DraftField::AdminEmail, "ruth@grace.org")
            .with_value(DraftField::AdminPhone, "555 987 6543")
            .with_value(DraftField::BillingCycle, "yearly");

        let vars =
            SubmissionSagaData::new(draft, today()).subscription_variables("org-1", "starter");

        let input = &vars["input"];
        assert_eq!(input["organizationId"], "org-1");
        assert_eq!(input["planId"], "starter");
        assert_eq!(input["startDate"], "2026-10-18");
        assert_eq!(input["metadata"]["adminFirstName"], "Ruth");
        assert_eq!(input["metadata"]["adminLastName"], "Boaz");
        assert_eq!(input["metadata"]["adminEmail"], "ruth@grace.org");
        assert_eq!(input["metadata"]["adminPhone"], "+1 555 987 6543");
        assert_eq!(input["metadata"]["billingCycle"], "YEARLY");
    }
}
