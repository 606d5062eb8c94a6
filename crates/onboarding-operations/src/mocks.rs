use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{Value, json};

use crate::submission::SubmissionReceipt;
use crate::traits::{
    PermissionChecker, RemoteError, RemoteExecutor, RemoteOperation, WizardCallbacks,
};

/// Remote layer answering with fixed identifiers unless told otherwise.
pub struct MockRemoteExecutor {
    organization_id: String,
    subscription_id: String,
    scripted: HashMap<RemoteOperation, Result<Value, RemoteError>>,
    calls: Mutex<Vec<(RemoteOperation, Value)>>,
}

impl MockRemoteExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            organization_id: "org-1".to_string(),
            subscription_id: "sub-1".to_string(),
            scripted: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_organization_id(mut self, id: &str) -> Self {
        self.organization_id = id.to_string();
        self
    }

    #[must_use]
    pub fn with_subscription_id(mut self, id: &str) -> Self {
        self.subscription_id = id.to_string();
        self
    }

    /// Answer `operation` with `data` instead of a generated identifier.
    #[must_use]
    pub fn with_response(mut self, operation: RemoteOperation, data: Value) -> Self {
        self.scripted.insert(operation, Ok(data));
        self
    }

    #[must_use]
    pub fn with_failure(mut self, operation: RemoteOperation, message: &str) -> Self {
        self.scripted.insert(operation, Err(RemoteError::new(message)));
        self
    }

    /// # Panics
    ///
    /// Panics if the call log mutex is poisoned.
    pub fn calls(&self) -> Vec<(RemoteOperation, Value)> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn calls_for(&self, operation: RemoteOperation) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|(op, _)| *op == operation)
            .map(|(_, variables)| variables)
            .collect()
    }

    pub fn call_count(&self, operation: RemoteOperation) -> usize {
        self.calls_for(operation).len()
    }
}

impl Default for MockRemoteExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteExecutor for MockRemoteExecutor {
    fn execute(&self, operation: RemoteOperation, variables: &Value) -> Result<Value, RemoteError> {
        self.calls
            .lock()
            .expect("lock")
            .push((operation, variables.clone()));

        if let Some(scripted) = self.scripted.get(&operation) {
            return scripted.clone();
        }
        let id = match operation {
            RemoteOperation::CreateOrganization => json!(self.organization_id),
            RemoteOperation::CreateSubscription => json!(self.subscription_id),
            RemoteOperation::DeactivateOrganization => variables["id"].clone(),
        };
        Ok(json!({ operation.root_field(): { "id": id } }))
    }
}

pub struct MockPermissions {
    granted: Vec<String>,
}

impl MockPermissions {
    #[must_use]
    pub fn granting(permissions: &[&str]) -> Self {
        Self {
            granted: permissions.iter().map(ToString::to_string).collect(),
        }
    }

    #[must_use]
    pub fn none() -> Self {
        Self {
            granted: Vec::new(),
        }
    }
}

impl PermissionChecker for MockPermissions {
    fn has_permission(&self, key: &str) -> bool {
        self.granted.iter().any(|p| p == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackEvent {
    Success(SubmissionReceipt),
    Close,
}

#[derive(Debug, Default)]
pub struct RecordingCallbacks {
    events: Vec<CallbackEvent>,
}

impl RecordingCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[CallbackEvent] {
        &self.events
    }

    pub fn close_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, CallbackEvent::Close))
            .count()
    }

    pub fn success_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, CallbackEvent::Success(_)))
            .count()
    }
}

impl WizardCallbacks for RecordingCallbacks {
    fn on_success(&mut self, receipt: &SubmissionReceipt) {
        self.events.push(CallbackEvent::Success(receipt.clone()));
    }

    fn on_close(&mut self) {
        self.events.push(CallbackEvent::Close);
    }
}
