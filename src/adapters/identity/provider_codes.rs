//! Translation of provider-native auth error codes.
//!
//! The hosted provider reports failures as `auth/<reason>` codes. Anything
//! not listed here collapses to `AuthErrorKind::Unknown`.

use crate::domain::session::{AuthError, AuthErrorKind};

/// Maps a provider error code onto the fixed taxonomy.
pub fn kind_for_provider_code(code: &str) -> AuthErrorKind {
    match code.trim() {
        "auth/popup-blocked" => AuthErrorKind::PopupBlocked,
        "auth/popup-closed-by-user" | "auth/cancelled-popup-request" => {
            AuthErrorKind::PopupClosedByUser
        }
        "auth/unauthorized-domain" => AuthErrorKind::UnauthorizedDomain,
        "auth/operation-not-allowed" => AuthErrorKind::OperationNotAllowed,
        "auth/network-request-failed" => AuthErrorKind::NetworkFailure,
        _ => AuthErrorKind::Unknown,
    }
}

/// Builds an [`AuthError`] from a provider failure, keeping the provider
/// message (or the code itself when the message is empty) as detail.
pub fn translate_provider_error(code: &str, message: &str) -> AuthError {
    let detail = if message.trim().is_empty() { code } else { message };
    AuthError::new(kind_for_provider_code(code), detail)
}
