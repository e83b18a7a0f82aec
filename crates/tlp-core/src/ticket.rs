//! Ticket identifiers and extraction from entry notes.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for ticket types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// A validated issue-tracker ticket identifier.
///
/// Ticket IDs must be non-empty strings. Their shape is otherwise dictated
/// by the configured matcher pattern, not validated here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketId(String);

impl TicketId {
    /// Creates a new ID after validation.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::Empty { field: "ticket ID" });
        }
        Ok(Self(id))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TicketId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TicketId> for String {
    fn from(id: TicketId) -> Self {
        id.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TicketId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Extracts an optional ticket identifier from free text.
///
/// Aggregation depends only on this capability, so alternate tracker ID
/// schemes can be substituted without touching grouping logic.
pub trait TicketMatcher {
    /// Returns the ticket the note refers to, if any.
    fn extract(&self, note: &str) -> Option<TicketId>;
}

/// Regex-backed matcher; the first match in the note wins.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    pattern: Regex,
}

impl RegexMatcher {
    /// Compiles the pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl TicketMatcher for RegexMatcher {
    fn extract(&self, note: &str) -> Option<TicketId> {
        let matched = self.pattern.find(note)?;
        // A match is a non-empty substring unless the pattern itself matches
        // empty input; treat that as no ticket.
        TicketId::new(matched.as_str()).ok()
    }
}
