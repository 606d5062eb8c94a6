mod plans;
mod validate;
mod wizard;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Subcommand;
use onboarding_config::{OnboardingConfig, WizardDefaults};
use onboarding_core::{OrganizationDraft, WizardStep};
use serde_json::Value;
use tracing::debug;

use crate::error::{CliError, Result};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List the subscription plans on offer
    Plans,
    /// Validate a draft file without submitting it
    Validate {
        /// Draft as JSON, keyed like the wizard fields (e.g. "adminEmail")
        #[arg(long)]
        draft: PathBuf,

        /// Validate only this step
        #[arg(long, value_enum)]
        step: Option<WizardStep>,
    },
    /// Walk through the onboarding wizard and submit in dry-run mode
    Wizard {
        /// Prefill the wizard from a JSON draft
        #[arg(long)]
        draft: Option<PathBuf>,
    },
}

impl Commands {
    pub(crate) fn execute(self, config: &OnboardingConfig, today: NaiveDate) -> Result<()> {
        match self {
            Self::Plans => {
                plans::run(config);
                Ok(())
            }
            Self::Validate { draft, step } => {
                let draft = read_draft(&draft, config.defaults())?;
                validate::run(config, today, &draft, step)
            }
            Self::Wizard { draft } => {
                let draft = match draft {
                    Some(path) => read_draft(&path, config.defaults())?,
                    None => config.defaults().new_draft(),
                };
                wizard::run(config, today, draft)
            }
        }
    }
}

fn read_draft(path: &Path, defaults: &WizardDefaults) -> Result<OrganizationDraft> {
    let content = fs::read_to_string(path).map_err(|source| CliError::ReadDraft {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "reading draft");
    parse_draft(&content, defaults).map_err(|source| CliError::ParseDraft {
        path: path.to_path_buf(),
        source,
    })
}

/// Keys missing from the file take the configured wizard defaults.
fn parse_draft(content: &str, defaults: &WizardDefaults) -> serde_json::Result<OrganizationDraft> {
    let mut value: Value = serde_json::from_str(content)?;
    if let (Value::Object(fields), Value::Object(seed)) =
        (&mut value, serde_json::to_value(defaults.new_draft())?)
    {
        for (key, default) in seed {
            fields.entry(key).or_insert(default);
        }
    }
    serde_json::from_value(value)
}
