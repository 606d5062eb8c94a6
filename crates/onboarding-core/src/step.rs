use std::fmt;

use clap::ValueEnum;

use crate::draft::DraftField;

/// One stage of the onboarding wizard, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum WizardStep {
    BasicInfo,
    Address,
    AdminUser,
    SubscriptionPlan,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        Self::BasicInfo,
        Self::Address,
        Self::AdminUser,
        Self::SubscriptionPlan,
        Self::Review,
    ];

    #[must_use]
    pub fn first() -> Self {
        Self::BasicInfo
    }

    /// Zero-based position in [`WizardStep::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::BasicInfo => 0,
            Self::Address => 1,
            Self::AdminUser => 2,
            Self::SubscriptionPlan => 3,
            Self::Review => 4,
        }
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.index()
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
    }

    #[must_use]
    pub fn is_last(self) -> bool {
        self.next().is_none()
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Info",
            Self::Address => "Address",
            Self::AdminUser => "Admin User",
            Self::SubscriptionPlan => "Subscription Plan",
            Self::Review => "Review",
        }
    }

    /// Draft fields edited on this step.
    #[must_use]
    pub fn fields(self) -> &'static [DraftField] {
        match self {
            Self::BasicInfo => &[
                DraftField::Name,
                DraftField::Email,
                DraftField::PhoneCountryCode,
                DraftField::Phone,
                DraftField::Website,
            ],
            Self::Address => &[
                DraftField::Address,
                DraftField::City,
                DraftField::State,
                DraftField::Country,
                DraftField::PostalCode,
            ],
            Self::AdminUser => &[
                DraftField::AdminFirstName,
                DraftField::AdminLastName,
                DraftField::AdminEmail,
                DraftField::AdminPhoneCountryCode,
                DraftField::AdminPhone,
                DraftField::AdminPassword,
            ],
            Self::SubscriptionPlan => &[
                DraftField::PlanId,
                DraftField::BillingCycle,
                DraftField::StartDate,
            ],
            Self::Review => &[],
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
