mod dry_run;
mod permissions;

pub use dry_run::{DryRunExecutor, IssuedOperation};
pub use permissions::StaticPermissionChecker;
