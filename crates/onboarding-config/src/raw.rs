use onboarding_core::Plan;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawConfig {
    #[serde(default)]
    pub(crate) wizard: RawWizardSection,
    #[serde(default)]
    pub(crate) permissions: RawPermissionsSection,
    #[serde(default)]
    pub(crate) plans: Vec<Plan>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawWizardSection {
    #[serde(default, rename = "default-phone-country-code")]
    pub(crate) default_phone_country_code: Option<String>,
    #[serde(default, rename = "default-billing-cycle")]
    pub(crate) default_billing_cycle: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawPermissionsSection {
    #[serde(default)]
    pub(crate) granted: Vec<String>,
}
