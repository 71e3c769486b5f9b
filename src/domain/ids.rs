//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::Serialize;

/// Sportsbook identifier - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors. Book names are normalized to lowercase so
/// feed rows that disagree on casing still land in the same bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Book(String);

impl Book {
    /// Create a new Book from a string, lowercasing it.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_ascii_lowercase())
    }

    /// Get the book identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Book {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Book {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Event identifier - newtype for type safety.
///
/// Unique within one refresh window of the upstream feed; carries no
/// identity across refreshes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EventId(String);

impl EventId {
    /// Create a new EventId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the event ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
