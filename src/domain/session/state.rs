//! SessionState - the single tagged answer to "who is signed in?".
//!
//! Presentation code never branches on raw identity options; it reads a
//! `SessionState` and uses the selectors below.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Identity;

/// Current authentication status of the application.
///
/// The identity is carried by the `Authenticated` variant only, so an
/// `Identity` exists exactly when the state is `Authenticated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "status", content = "identity", rename_all = "snake_case")]
pub enum SessionState {
    /// The provider has not answered yet.
    #[default]
    Initializing,
    /// The provider confirmed that nobody is signed in.
    Anonymous,
    /// The provider confirmed a signed-in identity.
    Authenticated(Identity),
}

impl SessionState {
    /// Builds the state a provider confirmation stands for.
    ///
    /// Provider answers are always resolved, so this never yields `Initializing`.
    pub fn confirmed(identity: Option<Identity>) -> Self {
        match identity {
            Some(identity) => SessionState::Authenticated(identity),
            None => SessionState::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, SessionState::Anonymous)
    }

    /// Returns true once the provider has answered at least once.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, SessionState::Initializing)
    }

    pub fn current_identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    /// Short status name, matching the serialized tag.
    pub fn status_name(&self) -> &'static str {
        match self {
            SessionState::Initializing => "initializing",
            SessionState::Anonymous => "anonymous",
            SessionState::Authenticated(_) => "authenticated",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Authenticated(identity) => write!(f, "authenticated({})", identity.id),
            other => write!(f, "{}", other.status_name()),
        }
    }
}
