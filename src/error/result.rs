//! Result alias and context extension for drawer operations.

use super::context::ErrorContext;
use super::drawer_error::DrawerError;
use super::remote::RemoteError;

pub type DrawerResult<T> = Result<T, DrawerError>;

/// Extension trait for attaching an [`ErrorContext`] to a failed result.
pub trait ResultExt<T> {
    fn context(self, ctx: ErrorContext) -> DrawerResult<T>;

    /// Like [`ResultExt::context`] but only builds the context on error.
    fn with_context<F>(self, f: F) -> DrawerResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T> ResultExt<T> for DrawerResult<T> {
    fn context(self, ctx: ErrorContext) -> DrawerResult<T> {
        self.map_err(|e| e.with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> DrawerResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for Result<T, RemoteError> {
    fn context(self, ctx: ErrorContext) -> DrawerResult<T> {
        self.map_err(|e| DrawerError::from(e).with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> DrawerResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| DrawerError::from(e).with_context(f()))
    }
}
