//! Context attached to drawer errors for logging.

use std::fmt;

use crate::conversation::Generation;

/// The operation that failed and what it was acting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// e.g. `send_message`.
    pub operation: String,
    pub thread_id: Option<String>,
    /// Load generation the failing request was issued under.
    pub generation: Option<Generation>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            thread_id: None,
            generation: None,
        }
    }

    pub fn with_thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    pub fn with_generation(mut self, generation: Generation) -> Self {
        self.generation = Some(generation);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.operation)?;
        if let Some(thread_id) = &self.thread_id {
            write!(f, " thread={}", thread_id)?;
        }
        if let Some(generation) = self.generation {
            write!(f, " gen={}", generation)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_operation_only() {
        assert_eq!(
            ErrorContext::new("get_conversations").to_string(),
            "[get_conversations]"
        );
    }

    #[test]
    fn test_display_with_thread_and_generation() {
        let ctx = ErrorContext::new("get_messages")
            .with_thread_id("t1")
            .with_generation(4);
        assert_eq!(ctx.to_string(), "[get_messages] thread=t1 gen=4");
    }
}
