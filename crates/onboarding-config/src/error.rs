use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file '{}'", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid default billing cycle")]
    InvalidBillingCycle(#[source] onboarding_core::CoreError),

    #[error("plan at position {position} has an empty id")]
    EmptyPlanId { position: usize },

    #[error("plan '{id}' is defined more than once")]
    DuplicatePlan { id: String },

    #[error("plan '{id}' must have a finite, non-negative amount")]
    InvalidAmount { id: String },
}
