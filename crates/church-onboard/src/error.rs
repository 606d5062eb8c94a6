use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error")]
    Config(#[from] onboarding_config::ConfigError),

    #[error("onboarding failed")]
    Operation(#[from] onboarding_operations::OperationError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("failed to read draft '{}'", path.display())]
    ReadDraft {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse draft '{}'", path.display())]
    ParseDraft {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("draft has {count} validation error(s)")]
    InvalidDraft { count: usize },

    #[error("interactive mode requires a terminal")]
    NotATty,
}

pub type Result<T> = std::result::Result<T, CliError>;
