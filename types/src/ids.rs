use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("shortcut id must not be empty")]
pub struct ShortcutIdError;

/// Opaque identifier for a shortcut entry (link or folder).
///
/// Stable for the entry's lifetime. Uniqueness across a whole
/// [`ShortcutList`](crate::ShortcutList) is enforced by the list, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortcutId(String);

impl ShortcutId {
    pub fn new(value: impl Into<String>) -> Result<Self, ShortcutIdError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(ShortcutIdError)
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ShortcutId {
    type Error = ShortcutIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ShortcutId {
    type Error = ShortcutIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShortcutId> for String {
    fn from(value: ShortcutId) -> Self {
        value.0
    }
}

impl AsRef<str> for ShortcutId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ShortcutId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ShortcutId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for ShortcutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
