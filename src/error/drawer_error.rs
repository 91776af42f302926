//! Unified error type for the messaging drawer.

use thiserror::Error;

use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::remote::RemoteError;

/// Everything that can go wrong inside the drawer.
#[derive(Debug, Error)]
pub enum DrawerError {
    /// A call to the conversation service failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Configuration is missing or invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A user action was refused before anything was sent.
    #[error("{0}")]
    Rejected(String),

    #[error("{context}: {error}")]
    WithContext {
        error: Box<DrawerError>,
        context: ErrorContext,
    },
}

impl DrawerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DrawerError::Remote(err) => err.category(),
            DrawerError::Config(_) => ErrorCategory::Configuration,
            DrawerError::Rejected(_) => ErrorCategory::User,
            DrawerError::WithContext { error, .. } => error.category(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    pub fn user_message(&self) -> String {
        match self {
            DrawerError::Remote(err) => err.user_message(),
            DrawerError::Config(msg) => format!("Messaging is not configured: {}", msg),
            DrawerError::Rejected(msg) => msg.clone(),
            DrawerError::WithContext { error, .. } => error.user_message(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            DrawerError::Remote(err) => err.error_code(),
            DrawerError::Config(_) => "CONFIG_INVALID",
            DrawerError::Rejected(_) => "ACTION_REJECTED",
            DrawerError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Wrap this error with context. An existing context is replaced rather than nested.
    pub fn with_context(self, context: ErrorContext) -> Self {
        match self {
            DrawerError::WithContext { error, .. } => DrawerError::WithContext { error, context },
            other => DrawerError::WithContext {
                error: Box::new(other),
                context,
            },
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            DrawerError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// The remote failure underneath any context wrapping.
    pub fn as_remote(&self) -> Option<&RemoteError> {
        match self {
            DrawerError::Remote(err) => Some(err),
            DrawerError::WithContext { error, .. } => error.as_remote(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_converts() {
        let err: DrawerError = RemoteError::Connection("refused".to_string()).into();
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.is_retryable());
        assert_eq!(err.error_code(), "REMOTE_CONNECTION");
    }

    #[test]
    fn test_rejected_is_user_category() {
        let err = DrawerError::Rejected("Message is empty".to_string());
        assert_eq!(err.category(), ErrorCategory::User);
        assert!(!err.is_retryable());
        assert_eq!(err.user_message(), "Message is empty");
    }

    #[test]
    fn test_with_context_does_not_nest() {
        let err = DrawerError::Config("empty url".to_string())
            .with_context(ErrorContext::new("first"))
            .with_context(ErrorContext::new("second").with_thread_id("t1"));

        let ctx = err.context().unwrap();
        assert_eq!(ctx.operation, "second");
        assert_eq!(err.category(), ErrorCategory::Configuration);
        match err {
            DrawerError::WithContext { error, .. } => {
                assert!(matches!(*error, DrawerError::Config(_)));
            }
            _ => panic!("expected WithContext"),
        }
    }

    #[test]
    fn test_as_remote_sees_through_context() {
        let err = DrawerError::from(RemoteError::Decode("bad".to_string()))
            .with_context(ErrorContext::new("get_messages"));
        assert_eq!(err.as_remote(), Some(&RemoteError::Decode("bad".to_string())));
        assert!(err.to_string().contains("[get_messages]"));
    }
}
