//! HTTP transport abstraction.
//!
//! The conversation store only needs JSON GET and POST. Keeping the transport
//! behind a trait lets tests swap reqwest for [`MockHttpClient`].
//!
//! [`MockHttpClient`]: crate::adapters::MockHttpClient

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use thiserror::Error;

/// Request headers, name to value.
pub type Headers = HashMap<String, String>;

/// Status and raw body of a finished request.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Keep 2xx responses; anything else becomes [`HttpError::Status`] with
    /// the body as message.
    pub fn error_for_status(self) -> Result<Self, HttpError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(HttpError::Status {
            status: self.status,
            message: self.text(),
        })
    }
}

/// Transport-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Other(String),
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;

    /// POST `body` verbatim. Callers set `Content-Type` themselves.
    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(Response::new(200, "").is_success());
        assert!(Response::new(204, "").is_success());
        assert!(!Response::new(302, "").is_success());
        assert!(!Response::new(404, "").is_success());
    }

    #[test]
    fn test_error_for_status_keeps_body() {
        let err = Response::new(503, "maintenance")
            .error_for_status()
            .unwrap_err();
        assert_eq!(
            err,
            HttpError::Status {
                status: 503,
                message: "maintenance".to_string()
            }
        );
        assert_eq!(err.to_string(), "HTTP 503: maintenance");
        assert!(Response::new(201, "").error_for_status().is_ok());
    }

    #[test]
    fn test_json_body() {
        let response = Response::new(200, r#"{"ok": true}"#);
        let value: serde_json::Value = response.json().unwrap();
        assert_eq!(value["ok"], true);
    }
}
