use crate::traits::PermissionChecker;

/// Grants a fixed set of permission keys.
#[derive(Debug, Clone, Default)]
pub struct StaticPermissionChecker {
    granted: Vec<String>,
}

impl StaticPermissionChecker {
    #[must_use]
    pub fn new<I, S>(granted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            granted: granted.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn granted(&self) -> &[String] {
        &self.granted
    }
}

impl PermissionChecker for StaticPermissionChecker {
    fn has_permission(&self, key: &str) -> bool {
        self.granted.iter().any(|granted| granted == key)
    }
}
