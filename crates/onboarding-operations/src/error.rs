use onboarding_saga::SagaError;
use thiserror::Error;

use crate::traits::{RemoteError, RemoteOperation};

/// Details about a failed compensation during saga rollback.
#[derive(Debug)]
pub struct CompensationFailure {
    /// Name of the step whose compensation failed.
    pub step: String,
    /// Description of what the compensation was trying to do.
    pub description: String,
    /// The error that occurred during compensation.
    pub error: Box<OperationError>,
}

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("permission '{permission}' is required to create an organization")]
    PermissionDenied { permission: &'static str },

    #[error("the wizard has already been closed")]
    WizardClosed,

    #[error("a submission is already in progress")]
    SubmissionInProgress,

    #[error("cannot submit: '{field}' is not set")]
    MissingPrecondition { field: &'static str },

    #[error("remote operation '{}' failed", operation.name())]
    Remote {
        operation: RemoteOperation,
        #[source]
        source: RemoteError,
    },

    #[error("organization '{organization_id}' could not be deactivated")]
    DeactivationFailed {
        organization_id: String,
        #[source]
        source: RemoteError,
    },

    #[error("remote operation '{}' returned no identifier", operation.name())]
    EmptyResponse { operation: RemoteOperation },

    #[error("submission saga failed at step '{step}'")]
    SagaFailed {
        step: String,
        #[source]
        source: Box<OperationError>,
    },

    #[error(
        "submission saga failed at step '{step}' and {} compensation(s) also failed", compensation_failures.len()
    )]
    SagaCompensationFailed {
        step: String,
        source: Box<OperationError>,
        compensation_failures: Vec<CompensationFailure>,
    },

    #[error("submission saga failed for an unclassified reason")]
    UnclassifiedSagaFailure,
}

pub type Result<T> = std::result::Result<T, OperationError>;

impl OperationError {
    /// The error that started a saga rollback, or `self` for direct failures.
    #[must_use]
    pub fn root_cause(&self) -> &OperationError {
        match self {
            Self::SagaFailed { source, .. } | Self::SagaCompensationFailed { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }

    /// Organization created during a submission whose rollback could not
    /// deactivate it again. A retry should reuse it instead of creating another.
    #[must_use]
    pub fn orphaned_organization_id(&self) -> Option<&str> {
        let Self::SagaCompensationFailed {
            compensation_failures,
            ..
        } = self
        else {
            return None;
        };
        compensation_failures
            .iter()
            .find_map(|failure| match failure.error.as_ref() {
                Self::DeactivationFailed {
                    organization_id, ..
                } => Some(organization_id.as_str()),
                _ => None,
            })
    }
}

impl From<SagaError<OperationError>> for OperationError {
    fn from(err: SagaError<OperationError>) -> Self {
        match err {
            SagaError::StepFailed { step, source } => Self::SagaFailed {
                step,
                source: Box::new(source),
            },
            SagaError::CompensationFailed {
                failed_step,
                step_error,
                compensation_errors,
            } => {
                let compensation_failures = compensation_errors
                    .into_iter()
                    .map(|e| CompensationFailure {
                        step: e.step,
                        description: e.description,
                        error: Box::new(e.error),
                    })
                    .collect();
                Self::SagaCompensationFailed {
                    step: failed_step,
                    source: Box::new(step_error),
                    compensation_failures,
                }
            }
            other => Self::SagaFailed {
                step: other.failed_step().to_string(),
                source: Box::new(Self::UnclassifiedSagaFailure),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_precondition_names_the_field() {
        let err = OperationError::MissingPrecondition {
            field: "organizationId",
        };

        assert!(err.to_string().contains("organizationId"));
    }

    #[test]
    fn remote_error_names_operation_and_keeps_source() {
        let err = OperationError::Remote {
            operation: RemoteOperation::CreateSubscription,
            source: RemoteError::new("connection reset"),
        };

        assert!(err.to_string().contains("CreateSubscription"));
        let source = std::error::Error::source(&err);
        assert!(source.is_some_and(|s| s.to_string() == "connection reset"));
    }

    #[test]
    fn saga_step_failure_converts_and_keeps_root_cause() {
        let saga_err = SagaError::StepFailed {
            step: "create_subscription".to_string(),
            source: OperationError::EmptyResponse {
                operation: RemoteOperation::CreateSubscription,
            },
        };

        let err = OperationError::from(saga_err);

        assert!(matches!(err, OperationError::SagaFailed { ref step, .. } if step == "create_subscription"));
        assert!(matches!(
            err.root_cause(),
            OperationError::EmptyResponse { .. }
        ));
    }

    #[test]
    fn saga_compensation_failure_converts_each_failure() {
        let saga_err = SagaError::CompensationFailed {
            failed_step: "create_subscription".to_string(),
            step_error: OperationError::MissingPrecondition { field: "planId" },
            compensation_errors: vec![onboarding_saga::CompensationError {
                step: "ensure_organization".to_string(),
                description: "deactivate the created organization".to_string(),
                error: OperationError::DeactivationFailed {
                    organization_id: "org-4".to_string(),
                    source: RemoteError::new("timeout"),
                },
            }],
        };

        let err = OperationError::from(saga_err);

        let OperationError::SagaCompensationFailed {
            compensation_failures,
            ..
        } = &err
        else {
            panic!("expected SagaCompensationFailed");
        };
        assert_eq!(compensation_failures.len(), 1);
        assert_eq!(compensation_failures[0].step, "ensure_organization");
        assert!(err.to_string().contains("1 compensation(s) also failed"));
        assert_eq!(err.orphaned_organization_id(), Some("org-4"));
    }

    #[test]
    fn rolled_back_failure_leaves_no_orphan() {
        let err = OperationError::from(SagaError::StepFailed {
            step: "create_subscription".to_string(),
            source: OperationError::MissingPrecondition { field: "planId" },
        });

        assert_eq!(err.orphaned_organization_id(), None);
    }
}
