use std::fmt;

use indexmap::IndexMap;
use onboarding_core::DraftField;

/// Key of an entry in the wizard's error map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKey {
    Field(DraftField),
    /// Aggregated failure of the final submission.
    Submit,
}

impl ErrorKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Field(field) => field.key(),
            Self::Submit => "submit",
        }
    }
}

impl From<DraftField> for ErrorKey {
    fn from(field: DraftField) -> Self {
        Self::Field(field)
    }
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-keyed error messages, in the order they were reported.
///
/// An empty map means the checked step passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: IndexMap<ErrorKey, String>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn get(&self, key: impl Into<ErrorKey>) -> Option<&str> {
        self.entries.get(&key.into()).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: impl Into<ErrorKey>) -> bool {
        self.entries.contains_key(&key.into())
    }

    /// Record `message` for `key`, keeping the first message already present.
    pub fn insert(&mut self, key: impl Into<ErrorKey>, message: impl Into<String>) {
        self.entries
            .entry(key.into())
            .or_insert_with(|| message.into());
    }

    pub fn remove(&mut self, key: impl Into<ErrorKey>) -> Option<String> {
        self.entries.shift_remove(&key.into())
    }

    /// Append entries of `other` whose keys are not present yet.
    pub fn merge(&mut self, other: ValidationErrors) {
        for (key, message) in other.entries {
            self.insert(key, message);
        }
    }

    #[must_use]
    pub fn submit_error(&self) -> Option<&str> {
        self.get(ErrorKey::Submit)
    }

    pub fn keys(&self) -> impl Iterator<Item = ErrorKey> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorKey, &str)> {
        self.entries.iter().map(|(key, msg)| (*key, msg.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, message) in self.iter() {
            writeln!(f, "{key}: {message}")?;
        }
        Ok(())
    }
}
