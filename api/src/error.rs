//! Error type shared by every API call.

use thiserror::Error;

/// Result alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors surfaced by [`crate::ApiClient`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Transport failure (DNS, connection reset, CORS rejection, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response that is not an auth failure.
    #[error("Request failed ({status}): {message}")]
    Status { status: u16, message: String },

    /// 401 from the backend. With a stored token this means the token is no
    /// longer valid; on the sign-in endpoints it means bad credentials.
    #[error("Unauthorized: {}", message.as_deref().unwrap_or("no detail"))]
    Unauthorized { message: Option<String> },

    /// Body did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The owning [`crate::RequestScope`] was cancelled before the response was applied.
    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    /// Build an error from a failed HTTP status and the raw response body.
    ///
    /// The backend reports failures as `{"message": ...}` or `{"detail": ...}`;
    /// anything else falls back to the trimmed body or the status text.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = body_message(body);
        if status == 401 {
            return ApiError::Unauthorized { message };
        }
        let message = message.unwrap_or_else(|| format!("HTTP {status}"));
        ApiError::Status { status, message }
    }
}

fn body_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "detail", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty() && trimmed.len() <= 200).then(|| trimmed.to_string())
        })
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
