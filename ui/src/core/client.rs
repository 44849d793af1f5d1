//! Glue between views and the REST client.

use api::{ApiClient, ApiError, ClientConfig};

use super::auth::{session, AuthStore};
use super::config::config;

/// A client for the configured backend carrying the current session token.
pub fn api_client() -> ApiClient {
    ApiClient::new(ClientConfig::new(config().api_base.clone())).with_token(session().token())
}

/// Banner text for a failed request, or `None` when nothing should be shown
/// (the owning view is gone).
pub fn error_banner(err: &ApiError) -> Option<String> {
    banner_for(err, &session())
}

/// A 401 while signed in means the token was rejected and ends the session.
/// Signed out, it answers a sign-in attempt and the backend's reason is shown.
fn banner_for(err: &ApiError, store: &AuthStore) -> Option<String> {
    match err {
        ApiError::Cancelled => None,
        ApiError::Unauthorized { .. } if store.is_authenticated() => {
            store.logout();
            Some(crate::t!("error-session-expired"))
        }
        ApiError::Unauthorized { message } => {
            Some(message.clone().unwrap_or_else(|| crate::t!("error-credentials")))
        }
        ApiError::Network(detail) => {
            tracing::warn!(%detail, "network failure");
            Some(crate::t!("error-network"))
        }
        ApiError::Decode(detail) => {
            tracing::warn!(%detail, "unexpected response body");
            Some(crate::t!("error-generic"))
        }
        ApiError::Status { message, .. } => Some(message.clone()),
    }
}
