use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid billing cycle '{0}' (expected MONTHLY or YEARLY)")]
    InvalidBillingCycle(String),

    #[error("unknown draft field '{0}'")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
