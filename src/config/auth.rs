//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::domain::foundation::UserId;
use crate::domain::session::Identity;

/// Authentication configuration for the development identity provider
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Subject id the dev provider signs in as
    #[serde(default = "default_dev_user_id")]
    pub dev_user_id: String,

    #[serde(default = "default_dev_display_name")]
    pub dev_display_name: Option<String>,

    #[serde(default = "default_dev_email")]
    pub dev_email: Option<String>,

    #[serde(default)]
    pub dev_avatar_uri: Option<String>,

    /// Report a remembered sign-in at startup
    #[serde(default)]
    pub restore_session: bool,

    /// Delay before the provider's first confirmation
    #[serde(default)]
    pub confirm_delay_ms: u64,

    /// Simulated popup round trip
    #[serde(default)]
    pub popup_latency_ms: u64,
}

impl AuthConfig {
    /// Build the identity the dev provider signs in as.
    pub fn dev_identity(&self) -> Result<Identity, ValidationError> {
        let id = UserId::new(self.dev_user_id.clone())
            .map_err(|_| ValidationError::MissingRequired("STUDENT_SPOT__AUTH__DEV_USER_ID"))?;

        let mut identity = Identity::new(id);
        if let Some(name) = non_blank(&self.dev_display_name) {
            identity = identity.with_display_name(name);
        }
        if let Some(email) = non_blank(&self.dev_email) {
            identity = identity.with_email(email);
        }
        if let Some(uri) = non_blank(&self.dev_avatar_uri) {
            identity = identity.with_avatar_uri(uri);
        }
        Ok(identity)
    }

    pub fn confirm_delay(&self) -> Duration {
        Duration::from_millis(self.confirm_delay_ms)
    }

    pub fn popup_latency(&self) -> Duration {
        Duration::from_millis(self.popup_latency_ms)
    }

    /// Validate authentication configuration
    ///
    /// The dev provider accepts any sign-in, so it is refused in production.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if *environment == Environment::Production {
            return Err(ValidationError::DevGatewayInProduction);
        }
        self.dev_identity()?;
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            dev_user_id: default_dev_user_id(),
            dev_display_name: default_dev_display_name(),
            dev_email: default_dev_email(),
            dev_avatar_uri: None,
            restore_session: false,
            confirm_delay_ms: 0,
            popup_latency_ms: 0,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn default_dev_user_id() -> String {
    "dev-member".to_string()
}

fn default_dev_display_name() -> Option<String> {
    Some("Dev Member".to_string())
}

fn default_dev_email() -> Option<String> {
    Some("dev-member@studentspot.local".to_string())
}
