mod callbacks;
mod permission;
mod remote;

pub use callbacks::WizardCallbacks;
pub use permission::{CREATE_ORGANIZATION_PERMISSION, PermissionChecker};
pub use remote::{RemoteError, RemoteExecutor, RemoteOperation, redact_secrets, response_id};
