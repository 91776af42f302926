//! Errors returned by the remote conversation store.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::traits::HttpError;

/// Failure of a call to the conversation service.
///
/// Every variant is recoverable; the drawer turns them into state
/// transitions or notices and never lets them escape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The service could not be reached.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The call did not finish within the configured timeout.
    #[error("{operation} timed out after {secs}s")]
    Timeout { operation: String, secs: u64 },

    /// The service answered with a non-2xx status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The body could not be decoded into the expected payload.
    #[error("invalid response: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

impl RemoteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RemoteError::Connection(_) | RemoteError::Timeout { .. } => ErrorCategory::Network,
            RemoteError::Status { status, .. } => match *status {
                408 | 429 => ErrorCategory::Network,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Client,
            },
            RemoteError::Decode(_) => ErrorCategory::Server,
            RemoteError::Other(_) => ErrorCategory::Client,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Short code for log fields.
    pub fn error_code(&self) -> &'static str {
        match self {
            RemoteError::Connection(_) => "REMOTE_CONNECTION",
            RemoteError::Timeout { .. } => "REMOTE_TIMEOUT",
            RemoteError::Status { .. } => "REMOTE_STATUS",
            RemoteError::Decode(_) => "REMOTE_DECODE",
            RemoteError::Other(_) => "REMOTE_OTHER",
        }
    }

    /// Text suitable for a notice in the drawer.
    pub fn user_message(&self) -> String {
        match self {
            RemoteError::Connection(_) => {
                "Can't reach messaging right now. Check your connection.".to_string()
            }
            RemoteError::Timeout { .. } => "Messaging is taking too long to respond.".to_string(),
            RemoteError::Status { status, .. } => match *status {
                401 | 403 => "Your session has expired. Please sign in again.".to_string(),
                404 => "That conversation no longer exists.".to_string(),
                429 => "Too many requests. Please wait a moment.".to_string(),
                500..=599 => "Messaging is having trouble. Please try again later.".to_string(),
                _ => format!("Request failed (HTTP {}).", status),
            },
            RemoteError::Decode(_) => "Received an unexpected response from messaging.".to_string(),
            RemoteError::Other(msg) => msg.clone(),
        }
    }
}

impl From<HttpError> for RemoteError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ConnectionFailed(msg) => RemoteError::Connection(msg),
            HttpError::Timeout(msg) => RemoteError::Timeout {
                operation: msg,
                secs: 0,
            },
            HttpError::Status { status, message } => RemoteError::Status { status, message },
            HttpError::InvalidRequest(msg) => RemoteError::Other(format!("invalid request: {}", msg)),
            HttpError::Other(msg) => RemoteError::Other(msg),
        }
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        RemoteError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_categories() {
        let not_found = RemoteError::Status {
            status: 404,
            message: "missing".to_string(),
        };
        assert_eq!(not_found.category(), ErrorCategory::Client);
        assert!(!not_found.is_retryable());

        let unavailable = RemoteError::Status {
            status: 503,
            message: "down".to_string(),
        };
        assert_eq!(unavailable.category(), ErrorCategory::Server);
        assert!(unavailable.is_retryable());

        let limited = RemoteError::Status {
            status: 429,
            message: "slow down".to_string(),
        };
        assert!(limited.is_retryable());
    }

    #[test]
    fn test_timeout_is_network_and_retryable() {
        let err = RemoteError::Timeout {
            operation: "get_messages".to_string(),
            secs: 15,
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.is_retryable());
        assert_eq!(err.to_string(), "get_messages timed out after 15s");
    }

    #[test]
    fn test_from_http_error() {
        let err: RemoteError = HttpError::ConnectionFailed("refused".to_string()).into();
        assert_eq!(err, RemoteError::Connection("refused".to_string()));

        let err: RemoteError = HttpError::Status {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "REMOTE_STATUS");
    }

    #[test]
    fn test_from_json_error_is_decode() {
        let json_err = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        let err: RemoteError = json_err.into();
        assert!(matches!(err, RemoteError::Decode(_)));
        assert_eq!(err.category(), ErrorCategory::Server);
    }

    #[test]
    fn test_user_message_for_session_expiry() {
        let err = RemoteError::Status {
            status: 401,
            message: String::new(),
        };
        assert!(err.user_message().contains("sign in"));
    }
}
