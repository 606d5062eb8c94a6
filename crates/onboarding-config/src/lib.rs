mod config;
mod error;
mod raw;

pub use config::{OnboardingConfig, WizardDefaults};
pub use error::ConfigError;

/// File name looked up when no configuration path is given.
pub const DEFAULT_CONFIG_FILE: &str = "onboarding.toml";
