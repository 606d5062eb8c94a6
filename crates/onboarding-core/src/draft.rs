use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::BillingCycle;

/// Date format accepted for the subscription start date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DEFAULT_PHONE_COUNTRY_CODE: &str = "+1";

/// A user-editable field of the organization draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DraftField {
    Name,
    Email,
    PhoneCountryCode,
    Phone,
    Website,
    Address,
    City,
    State,
    Country,
    PostalCode,
    AdminFirstName,
    AdminLastName,
    AdminEmail,
    AdminPhoneCountryCode,
    AdminPhone,
    AdminPassword,
    PlanId,
    BillingCycle,
    StartDate,
}

impl DraftField {
    pub const ALL: [DraftField; 19] = [
        Self::Name,
        Self::Email,
        Self::PhoneCountryCode,
        Self::Phone,
        Self::Website,
        Self::Address,
        Self::City,
        Self::State,
        Self::Country,
        Self::PostalCode,
        Self::AdminFirstName,
        Self::AdminLastName,
        Self::AdminEmail,
        Self::AdminPhoneCountryCode,
        Self::AdminPhone,
        Self::AdminPassword,
        Self::PlanId,
        Self::BillingCycle,
        Self::StartDate,
    ];

    /// Key used in error maps and in serialized drafts.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::PhoneCountryCode => "phoneCountryCode",
            Self::Phone => "phone",
            Self::Website => "website",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::Country => "country",
            Self::PostalCode => "postalCode",
            Self::AdminFirstName => "adminFirstName",
            Self::AdminLastName => "adminLastName",
            Self::AdminEmail => "adminEmail",
            Self::AdminPhoneCountryCode => "adminPhoneCountryCode",
            Self::AdminPhone => "adminPhone",
            Self::AdminPassword => "adminPassword",
            Self::PlanId => "planId",
            Self::BillingCycle => "billingCycle",
            Self::StartDate => "startDate",
        }
    }

    /// Human-readable label for prompts and summaries.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Organization name",
            Self::Email => "Organization email",
            Self::PhoneCountryCode => "Phone country code",
            Self::Phone => "Phone number",
            Self::Website => "Website",
            Self::Address => "Street address",
            Self::City => "City",
            Self::State => "State / province",
            Self::Country => "Country",
            Self::PostalCode => "Postal code",
            Self::AdminFirstName => "Admin first name",
            Self::AdminLastName => "Admin last name",
            Self::AdminEmail => "Admin email",
            Self::AdminPhoneCountryCode => "Admin phone country code",
            Self::AdminPhone => "Admin phone",
            Self::AdminPassword => "Admin password",
            Self::PlanId => "Subscription plan",
            Self::BillingCycle => "Billing cycle",
            Self::StartDate => "Start date",
        }
    }

    #[must_use]
    pub fn is_secret(self) -> bool {
        matches!(self, Self::AdminPassword)
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DraftField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}

/// The record assembled across the wizard steps.
///
/// Updates never mutate a draft in place: [`OrganizationDraft::with_value`]
/// and [`OrganizationDraft::with_organization_id`] return a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrganizationDraft {
    name: String,
    email: String,
    phone_country_code: String,
    phone: String,
    website: String,
    address: String,
    city: String,
    state: String,
    country: String,
    postal_code: String,
    admin_first_name: String,
    admin_last_name: String,
    admin_email: String,
    admin_phone_country_code: String,
    admin_phone: String,
    admin_password: String,
    plan_id: String,
    billing_cycle: String,
    start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    organization_id: Option<String>,
}

impl Default for OrganizationDraft {
    fn default() -> Self {
        Self::with_defaults(DEFAULT_PHONE_COUNTRY_CODE, BillingCycle::default())
    }
}

impl OrganizationDraft {
    /// Create an empty draft seeded with the given defaults.
    #[must_use]
    pub fn with_defaults(phone_country_code: &str, billing_cycle: BillingCycle) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone_country_code: phone_country_code.to_string(),
            phone: String::new(),
            website: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            country: String::new(),
            postal_code: String::new(),
            admin_first_name: String::new(),
            admin_last_name: String::new(),
            admin_email: String::new(),
            admin_phone_country_code: phone_country_code.to_string(),
            admin_phone: String::new(),
            admin_password: String::new(),
            plan_id: String::new(),
            billing_cycle: billing_cycle.as_str().to_string(),
            start_date: String::new(),
            organization_id: None,
        }
    }

    #[must_use]
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Email => &self.email,
            DraftField::PhoneCountryCode => &self.phone_country_code,
            DraftField::Phone => &self.phone,
            DraftField::Website => &self.website,
            DraftField::Address => &self.address,
            DraftField::City => &self.city,
            DraftField::State => &self.state,
            DraftField::Country => &self.country,
            DraftField::PostalCode => &self.postal_code,
            DraftField::AdminFirstName => &self.admin_first_name,
            DraftField::AdminLastName => &self.admin_last_name,
            DraftField::AdminEmail => &self.admin_email,
            DraftField::AdminPhoneCountryCode => &self.admin_phone_country_code,
            DraftField::AdminPhone => &self.admin_phone,
            DraftField::AdminPassword => &self.admin_password,
            DraftField::PlanId => &self.plan_id,
            DraftField::BillingCycle => &self.billing_cycle,
            DraftField::StartDate => &self.start_date,
        }
    }

    /// Return a copy of this draft with `field` set to `value`.
    ///
    /// Writes are never rejected; checking values is the validator's job.
    #[must_use]
    pub fn with_value(&self, field: DraftField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.slot_mut(field) = value.into();
        next
    }

    /// Return a copy of this draft carrying the identifier of a created organization.
    #[must_use]
    pub fn with_organization_id(&self, organization_id: impl Into<String>) -> Self {
        Self {
            organization_id: Some(organization_id.into()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn organization_id(&self) -> Option<&str> {
        self.organization_id.as_deref()
    }

    /// Parsed billing cycle, or `None` when the stored text is not a known cycle.
    #[must_use]
    pub fn billing_cycle(&self) -> Option<BillingCycle> {
        self.billing_cycle.parse().ok()
    }

    /// Parsed start date, or `None` when unset or malformed.
    #[must_use]
    pub fn start_date(&self) -> Option<NaiveDate> {
        let raw = self.start_date.trim();
        if raw.is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
    }

    /// Fields that differ between `self` and `other`.
    #[must_use]
    pub fn changed_fields(&self, other: &Self) -> Vec<DraftField> {
        DraftField::ALL
            .into_iter()
            .filter(|field| self.get(*field) != other.get(*field))
            .collect()
    }

    fn slot_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Name => &mut self.name,
            DraftField::Email => &mut self.email,
            DraftField::PhoneCountryCode => &mut self.phone_country_code,
            DraftField::Phone => &mut self.phone,
            DraftField::Website => &mut self.website,
            DraftField::Address => &mut self.address,
            DraftField::City => &mut self.city,
            DraftField::State => &mut self.state,
            DraftField::Country => &mut self.country,
            DraftField::PostalCode => &mut self.postal_code,
            DraftField::AdminFirstName => &mut self.admin_first_name,
            DraftField::AdminLastName => &mut self.admin_last_name,
            DraftField::AdminEmail => &mut self.admin_email,
            DraftField::AdminPhoneCountryCode => &mut self.admin_phone_country_code,
            DraftField::AdminPhone => &mut self.admin_phone,
            DraftField::AdminPassword => &mut self.admin_password,
            DraftField::PlanId => &mut self.plan_id,
            DraftField::BillingCycle => &mut self.billing_cycle,
            DraftField::StartDate => &mut self.start_date,
        }
    }
}
