//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// User identifier issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one registered listener in a [`ListenerRegistry`](super::ListenerRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListenerId(Uuid);

impl ListenerId {
    /// Creates a new random ListenerId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ListenerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_rejects_empty() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn user_id_keeps_value() {
        let id = UserId::new("uid-42").unwrap();
        assert_eq!(id.as_str(), "uid-42");
        assert_eq!(format!("{}", id), "uid-42");
    }

    #[test]
    fn user_id_serializes_transparently() {
        let id = UserId::new("uid-42").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"uid-42\"");
    }

    #[test]
    fn listener_ids_are_unique() {
        assert_ne!(ListenerId::new(), ListenerId::new());
    }

    #[test]
    fn listener_id_round_trips_through_display() {
        let id = ListenerId::new();
        let parsed: ListenerId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
