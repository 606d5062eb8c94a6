use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use serde_json::{Value, json};
use tracing::{debug, info};

use crate::traits::{RemoteError, RemoteExecutor, RemoteOperation, redact_secrets};

/// An operation recorded by [`DryRunExecutor`], with secrets masked.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedOperation {
    pub operation: RemoteOperation,
    pub variables: Value,
    pub id: String,
}

/// Remote executor that performs nothing and answers with synthetic ids.
///
/// Every operation is logged and kept in a journal so callers can show
/// what a real run would have sent.
#[derive(Debug, Default)]
pub struct DryRunExecutor {
    counter: AtomicU64,
    journal: Mutex<Vec<IssuedOperation>>,
}

impl DryRunExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn journal(&self) -> Vec<IssuedOperation> {
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn next_id(&self, operation: RemoteOperation) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("dry-run-{}-{n}", operation.root_field())
    }
}

impl RemoteExecutor for DryRunExecutor {
    fn execute(&self, operation: RemoteOperation, variables: &Value) -> Result<Value, RemoteError> {
        let id = match operation {
            RemoteOperation::DeactivateOrganization => variables
                .get("id")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| RemoteError::new("deactivation requires an organization id"))?,
            _ => self.next_id(operation),
        };
        let variables = redact_secrets(variables);
        info!(operation = %operation, id = %id, variables = %variables, "dry run");
        debug!(document = operation.document(), "dry run document");

        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(IssuedOperation {
                operation,
                variables,
                id: id.clone(),
            });

        Ok(json!({ operation.root_field(): { "id": id } }))
    }
}
