//! The signed-in person as reported by the identity provider.
//!
//! `Identity` is only ever constructed from a provider answer. The rest of
//! the system treats it as opaque display data.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

/// Provider-issued record describing the signed-in person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable provider user id.
    pub id: UserId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Profile picture location, if the provider has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_uri: Option<String>,
}

impl Identity {
    /// Creates an identity with only the provider id set.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            display_name: None,
            email: None,
            avatar_uri: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_avatar_uri(mut self, avatar_uri: impl Into<String>) -> Self {
        self.avatar_uri = Some(avatar_uri.into());
        self
    }

    /// Name to show in navigation: display name, then email, then the raw id.
    pub fn label(&self) -> &str {
        non_blank(self.display_name.as_deref())
            .or_else(|| non_blank(self.email.as_deref()))
            .unwrap_or_else(|| self.id.as_str())
    }

    /// Uppercase first character of [`label`](Self::label), for avatar placeholders.
    pub fn initial(&self) -> Option<char> {
        self.label()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
