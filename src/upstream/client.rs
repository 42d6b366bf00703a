//! Authenticated HTTP client for the NAS upstream.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use reqwest::header;
use thiserror::Error;

use crate::config::UpstreamConfig;

/// Failure modes of the outbound fetch.
///
/// Every variant is terminal for the request it belongs to and maps to
/// 502 Bad Gateway at the HTTP boundary.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The fetch exceeded the configured timeout.
    #[error("upstream request timed out")]
    Timeout,

    /// The target string could not be turned into a request.
    #[error("invalid target url: {0}")]
    BadUrl(String),

    /// The upstream answered with a non-success status.
    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),

    /// Connection-level failure (refused, reset, DNS).
    #[error("upstream request failed: {0}")]
    Transport(String),

    /// The response head arrived but the body could not be read.
    #[error("failed to read upstream body: {0}")]
    Body(String),
}

impl UpstreamError {
    fn from_transport(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            UpstreamError::Status(status)
        } else if err.is_timeout() {
            UpstreamError::Timeout
        } else if err.is_builder() {
            UpstreamError::BadUrl(err.to_string())
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}

/// Build the `Authorization` header value for a credential pair.
pub fn basic_auth_token(username: &str, password: &str) -> String {
    let token = STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {token}")
}

/// Client for the authenticated outbound GET.
///
/// Holds one connection pool and the precomputed auth token for the
/// process lifetime.
pub struct UpstreamClient {
    client: reqwest::Client,
    auth: String,
}

impl UpstreamClient {
    /// Create a client from the upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        // The NAS sits on the local network; never route through a
        // system proxy.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .no_proxy()
            .build()?;

        Ok(Self {
            client,
            auth: basic_auth_token(&config.username, &config.password),
        })
    }

    /// Fetch the target URL and buffer the full response body.
    ///
    /// Non-2xx upstream statuses count as failures, matching a transport
    /// that raises on error status.
    pub async fn fetch(&self, target_url: &str) -> Result<Bytes, UpstreamError> {
        let response = self
            .client
            .get(target_url)
            .header(header::AUTHORIZATION, self.auth.as_str())
            .header(header::ACCEPT, "*/*")
            .send()
            .await
            .map_err(UpstreamError::from_transport)?;

        let response = response
            .error_for_status()
            .map_err(UpstreamError::from_transport)?;

        response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Body(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_token_rfc_vector() {
        // RFC 7617 §2 example credentials.
        assert_eq!(
            basic_auth_token("Aladdin", "open sesame"),
            "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="
        );
    }

    #[test]
    fn test_basic_auth_token_empty_password() {
        assert_eq!(basic_auth_token("it", ""), "Basic aXQ6");
    }

    #[test]
    fn test_client_from_default_config() {
        assert!(UpstreamClient::new(&UpstreamConfig::default()).is_ok());
    }
}
