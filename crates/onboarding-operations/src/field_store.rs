use onboarding_core::{DraftField, OrganizationDraft};

use crate::validation::{ErrorKey, ValidationErrors};

/// The draft being edited together with its current error set.
#[derive(Debug, Clone, Default)]
pub struct FieldStore {
    draft: OrganizationDraft,
    errors: ValidationErrors,
}

impl FieldStore {
    #[must_use]
    pub fn new(draft: OrganizationDraft) -> Self {
        Self {
            draft,
            errors: ValidationErrors::new(),
        }
    }

    #[must_use]
    pub fn draft(&self) -> &OrganizationDraft {
        &self.draft
    }

    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Store `value` for `field` and drop that field's error, if any.
    ///
    /// Errors of other fields are left as they are.
    pub fn update_field(&mut self, field: DraftField, value: impl Into<String>) -> &OrganizationDraft {
        self.draft = self.draft.with_value(field, value);
        self.errors.remove(field);
        &self.draft
    }

    /// Replace the whole error set with the outcome of a validation run.
    pub fn replace_errors(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors = ValidationErrors::new();
    }

    pub fn set_submit_error(&mut self, message: impl Into<String>) {
        self.errors.remove(ErrorKey::Submit);
        self.errors.insert(ErrorKey::Submit, message);
    }

    pub fn set_organization_id(&mut self, organization_id: impl Into<String>) {
        self.draft = self.draft.with_organization_id(organization_id);
    }

    /// Drop everything entered so far, keeping nothing for later sessions.
    pub fn discard(&mut self) {
        *self = Self::default();
    }
}
