use std::path::Path;

use indexmap::IndexMap;
use onboarding_core::{BillingCycle, OrganizationDraft, Plan};

use crate::error::ConfigError;
use crate::raw::RawConfig;

const DEFAULT_PHONE_COUNTRY_CODE: &str = "+1";

/// Values a fresh draft starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardDefaults {
    phone_country_code: String,
    billing_cycle: BillingCycle,
}

impl Default for WizardDefaults {
    fn default() -> Self {
        Self {
            phone_country_code: DEFAULT_PHONE_COUNTRY_CODE.to_string(),
            billing_cycle: BillingCycle::default(),
        }
    }
}

impl WizardDefaults {
    #[must_use]
    pub fn phone_country_code(&self) -> &str {
        &self.phone_country_code
    }

    #[must_use]
    pub fn billing_cycle(&self) -> BillingCycle {
        self.billing_cycle
    }

    #[must_use]
    pub fn new_draft(&self) -> OrganizationDraft {
        OrganizationDraft::with_defaults(&self.phone_country_code, self.billing_cycle)
    }
}

#[derive(Debug, Clone, Default)]
pub struct OnboardingConfig {
    defaults: WizardDefaults,
    granted_permissions: Vec<String>,
    plans: IndexMap<String, Plan>,
}

impl OnboardingConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// describes an invalid plan catalog.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_raw(raw)
    }

    /// Load `path` when it exists, otherwise fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be loaded.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or describes an
    /// invalid plan catalog.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: "<inline>".into(),
            source,
        })?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let mut defaults = WizardDefaults::default();
        if let Some(code) = raw.wizard.default_phone_country_code {
            defaults.phone_country_code = code;
        }
        if let Some(cycle) = raw.wizard.default_billing_cycle {
            defaults.billing_cycle = cycle.parse().map_err(ConfigError::InvalidBillingCycle)?;
        }

        let mut plans = IndexMap::new();
        for (position, plan) in raw.plans.into_iter().enumerate() {
            if plan.id.trim().is_empty() {
                return Err(ConfigError::EmptyPlanId { position });
            }
            if !plan.amount.is_finite() || plan.amount < 0.0 {
                return Err(ConfigError::InvalidAmount { id: plan.id });
            }
            if plans.contains_key(&plan.id) {
                return Err(ConfigError::DuplicatePlan { id: plan.id });
            }
            plans.insert(plan.id.clone(), plan);
        }

        Ok(Self {
            defaults,
            granted_permissions: raw.permissions.granted,
            plans,
        })
    }

    #[must_use]
    pub fn defaults(&self) -> &WizardDefaults {
        &self.defaults
    }

    #[must_use]
    pub fn granted_permissions(&self) -> &[String] {
        &self.granted_permissions
    }

    #[must_use]
    pub fn is_granted(&self, permission: &str) -> bool {
        self.granted_permissions.iter().any(|p| p == permission)
    }

    /// Plans in the order they were declared.
    pub fn plans(&self) -> impl Iterator<Item = &Plan> {
        self.plans.values()
    }

    #[must_use]
    pub fn plan(&self, id: &str) -> Option<&Plan> {
        self.plans.get(id)
    }

    #[must_use]
    pub fn plan_list(&self) -> Vec<Plan> {
        self.plans.values().cloned().collect()
    }
}
