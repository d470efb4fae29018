//! Case-insensitive agent identity key.
//!
//! [`AgentName`] is a bounded string newtype used as the registry identity.
//! Equality and lookup are ASCII case-insensitive (the companion server is
//! not consistent about casing), while display preserves the first-seen
//! spelling.

use std::fmt;

use serde::Serialize;

use super::bounded::BoundedStr;

/// Byte capacity of an agent name.
pub const NAME_CAPACITY: usize = 32;

/// Identity key for an agent record.
///
/// Bounded to [`NAME_CAPACITY`] bytes. Two names are equal when they match
/// ASCII case-insensitively; the registry relies on this for upsert
/// matching, so a name must resolve to at most one record.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct AgentName(BoundedStr<NAME_CAPACITY>);

impl AgentName {
    /// Creates a name from `value`, truncating to capacity.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(BoundedStr::truncated(value))
    }

    /// Returns the stored spelling.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Case-insensitive match against an arbitrary string.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.as_str().eq_ignore_ascii_case(other)
    }
}

impl PartialEq for AgentName {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other.as_str())
    }
}

impl Eq for AgentName {}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AgentName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
