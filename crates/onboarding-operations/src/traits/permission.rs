/// Permission required to open the onboarding wizard.
pub const CREATE_ORGANIZATION_PERMISSION: &str = "organizations.create";

/// Authorization capability handed to components that need it.
pub trait PermissionChecker: Send + Sync {
    fn has_permission(&self, key: &str) -> bool;
}
