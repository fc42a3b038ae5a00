// src/github/client.rs
// =============================================================================
// This module wraps reqwest with the fixed headers the GitHub REST API
// expects, and turns non-success responses into a typed RemoteError.
//
// Key decisions:
// - Every request carries the versioned Accept header and a client
//   identifier; no authentication token is ever sent
// - Non-success statuses become RemoteError { status, message } where the
//   message comes from the API error body when it parses, with a generic
//   fallback when it doesn't
// - Network/transport failures propagate as the underlying reqwest error
// - No retries anywhere
//
// Rust concepts:
// - Custom error types: implementing Display + std::error::Error so the
//   error works with anyhow and can be downcast by callers
// - Generics: get_json<T> deserializes into whatever the caller asks for
// =============================================================================

use anyhow::Result;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;

/// Accept header value requesting the versioned JSON media type.
const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// Client identifier sent with every request.
const USER_AGENT: &str = "portfolio-scout";

/// A non-success HTTP response from the API.
///
/// Carries the status code and the server-supplied message (or a generic
/// fallback). Callers that need the status can downcast the anyhow error
/// back to this type.
#[derive(Debug, Clone)]
pub struct RemoteError {
    /// HTTP status code (e.g. 404, 403)
    pub status: u16,
    /// Server-supplied message, or a generic fallback
    pub message: String,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)
    }
}

impl std::error::Error for RemoteError {}

// Shape of the API's JSON error body; only the message matters to us
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// HTTP client for the GitHub REST API.
///
/// Cheap to clone (reqwest::Client is reference-counted internally), so
/// concurrent tasks each get their own handle.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
}

impl GithubClient {
    /// Creates a client with the fixed API headers.
    pub fn new() -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http })
    }

    /// Issues a GET request and deserializes the JSON response body.
    ///
    /// On a non-success status this fails with RemoteError; on transport
    /// failure the reqwest error comes back through anyhow unchanged.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http
            .get(url)
            .header("Accept", ACCEPT_HEADER)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Try to pull the server's message out of the error body;
            // fall back to a generic message when the body is unparsable
            let message = match response.json::<ApiErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => "request failed".to_string(),
            };
            return Err(RemoteError {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn test_remote_error_downcast() {
        let err = RemoteError {
            status: 403,
            message: "rate limit exceeded".to_string(),
        };
        let any: anyhow::Error = err.into();
        let back = any.downcast_ref::<RemoteError>().unwrap();
        assert_eq!(back.status, 403);
    }
}
