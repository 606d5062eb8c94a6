use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Failure reported by the remote layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteError {
    pub message: String,
}

impl RemoteError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Mutations issued while onboarding an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    CreateOrganization,
    CreateSubscription,
    DeactivateOrganization,
}

impl RemoteOperation {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CreateOrganization => "CreateOrganization",
            Self::CreateSubscription => "CreateSubscription",
            Self::DeactivateOrganization => "DeactivateOrganization",
        }
    }

    /// Field of the response `data` object holding the mutation result.
    #[must_use]
    pub fn root_field(self) -> &'static str {
        match self {
            Self::CreateOrganization => "createOrganization",
            Self::CreateSubscription => "createSubscription",
            Self::DeactivateOrganization => "deactivateOrganization",
        }
    }

    #[must_use]
    pub fn document(self) -> &'static str {
        match self {
            Self::CreateOrganization => {
                "mutation CreateOrganization($input: CreateOrganizationInput!) { \
                 createOrganization(input: $input) { id name } }"
            }
            Self::CreateSubscription => {
                "mutation CreateSubscription($input: CreateSubscriptionInput!) { \
                 createSubscription(input: $input) { id status startDate } }"
            }
            Self::DeactivateOrganization => {
                "mutation DeactivateOrganization($id: ID!) { \
                 deactivateOrganization(id: $id) { id } }"
            }
        }
    }
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Executes mutations against the dashboard's remote data layer.
pub trait RemoteExecutor: Send + Sync {
    /// Run `operation` with `variables`, returning the response `data` object.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails or the server rejects the
    /// operation.
    fn execute(&self, operation: RemoteOperation, variables: &Value) -> Result<Value, RemoteError>;
}

/// Identifier returned for `operation`, if the response carries one.
///
/// Numeric identifiers are rendered as text; blank strings count as absent.
#[must_use]
pub fn response_id(operation: RemoteOperation, data: &Value) -> Option<String> {
    match data.get(operation.root_field())?.get("id")? {
        Value::String(id) if !id.trim().is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Copy of `value` with every `password` entry masked, for logging.
#[must_use]
pub fn redact_secrets(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, inner)| {
                    if key.eq_ignore_ascii_case("password") {
                        (key.clone(), Value::String("***".to_string()))
                    } else {
                        (key.clone(), redact_secrets(inner))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact_secrets).collect()),
        other => other.clone(),
    }
}
