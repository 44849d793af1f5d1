use reqwest::{header, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{ApiError, Result};

/// Connection settings for an [`ApiClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Scheme + host (+ optional prefix), e.g. `https://api.pitchcraft.app`.
    pub base_url: String,
    /// Bearer token of the signed-in user, if any.
    pub token: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }
}

/// Thin JSON-over-HTTP client. Cloning is cheap; the underlying connection
/// pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.config.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Join the configured base with an absolute API path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// `Authorization` header value for the current token.
    pub fn bearer(&self) -> Option<String> {
        self.config.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header(header::ACCEPT, "application/json");
        match self.bearer() {
            Some(value) => builder.header(header::AUTHORIZATION, value),
            None => builder,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path).send().await?;
        decode(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, body).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(method, path).json(body).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        tracing::debug!(status = status.as_u16(), "api request failed");
        return Err(ApiError::from_status(status.as_u16(), &text));
    }
    parse_body(&text)
}

/// Parse a success body. Empty bodies (204, bare 200) decode as `{}` so
/// acknowledgement types with all-default fields still work.
pub(crate) fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T> {
    let body = if text.trim().is_empty() { "{}" } else { text };
    serde_json::from_str(body).map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Ack;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(ClientConfig::new(base))
    }

    #[test]
    fn url_join_handles_slashes() {
        assert_eq!(
            client("https://api.example.com/").url("/api/v1/users/me"),
            "https://api.example.com/api/v1/users/me"
        );
        assert_eq!(
            client("https://api.example.com").url("api/v1/users/me"),
            "https://api.example.com/api/v1/users/me"
        );
    }

    #[test]
    fn bearer_only_with_non_blank_token() {
        let anon = client("http://localhost").with_token(Some("  ".into()));
        assert_eq!(anon.bearer(), None);

        let signed = client("http://localhost").with_token(Some("abc123".into()));
        assert_eq!(signed.bearer().as_deref(), Some("Bearer abc123"));
    }

    #[test]
    fn empty_body_decodes_as_ack() {
        let ack: Ack = parse_body("").expect("empty body should decode");
        assert_eq!(ack.message, None);
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let err = parse_body::<Ack>("<html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
