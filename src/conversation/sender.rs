//! Outgoing message validation and in-flight bookkeeping.
//!
//! Nothing is echoed locally: a sent message only shows up once the reload
//! that follows a successful send returns it from the server.

use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

use crate::error::DrawerError;

use super::active::Selection;

/// Why a send was refused before reaching the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendRejection {
    #[error("message is empty")]
    EmptyText,

    #[error("no conversation is open")]
    NoActiveThread,

    #[error("conversation {0} is not the open conversation")]
    NotActive(String),

    #[error("a message to {0} is still being sent")]
    InFlight(String),
}

impl From<SendRejection> for DrawerError {
    fn from(rejection: SendRejection) -> Self {
        DrawerError::Rejected(rejection.to_string())
    }
}

/// A validated message ready to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub thread_id: String,
    /// Trimmed text
    pub text: String,
}

#[derive(Debug, Default)]
pub struct MessageSender {
    in_flight: HashSet<String>,
}

impl MessageSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a send request and mark the thread as in flight.
    pub fn prepare(
        &mut self,
        selection: &Selection,
        thread_id: &str,
        text: &str,
    ) -> Result<OutgoingMessage, SendRejection> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SendRejection::EmptyText);
        }

        match selection.thread_id() {
            None => return Err(SendRejection::NoActiveThread),
            Some(active) if active != thread_id => {
                return Err(SendRejection::NotActive(thread_id.to_string()))
            }
            Some(_) => {}
        }

        if !self.in_flight.insert(thread_id.to_string()) {
            return Err(SendRejection::InFlight(thread_id.to_string()));
        }

        debug!(thread_id, len = text.len(), "send accepted");
        Ok(OutgoingMessage {
            thread_id: thread_id.to_string(),
            text: text.to_string(),
        })
    }

    /// Release the in-flight slot once the remote call has returned.
    pub fn finish(&mut self, thread_id: &str) {
        self.in_flight.remove(thread_id);
    }

    pub fn is_sending(&self, thread_id: &str) -> bool {
        self.in_flight.contains(thread_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::LoadStatus;

    fn active(id: &str) -> Selection {
        Selection::Active {
            thread_id: id.to_string(),
            token: 1,
            activation: 1,
            status: LoadStatus::Ready,
        }
    }

    #[test]
    fn test_blank_text_rejected() {
        let mut sender = MessageSender::new();
        assert_eq!(
            sender.prepare(&active("t1"), "t1", ""),
            Err(SendRejection::EmptyText)
        );
        assert_eq!(
            sender.prepare(&active("t1"), "t1", "  \n\t "),
            Err(SendRejection::EmptyText)
        );
        assert!(!sender.is_sending("t1"));
    }

    #[test]
    fn test_requires_matching_active_thread() {
        let mut sender = MessageSender::new();
        assert_eq!(
            sender.prepare(&Selection::Idle, "t1", "hi"),
            Err(SendRejection::NoActiveThread)
        );
        assert_eq!(
            sender.prepare(&active("t2"), "t1", "hi"),
            Err(SendRejection::NotActive("t1".to_string()))
        );
    }

    #[test]
    fn test_text_is_trimmed_and_in_flight_tracked() {
        let mut sender = MessageSender::new();
        let outgoing = sender.prepare(&active("t1"), "t1", "  hello \n").unwrap();
        assert_eq!(outgoing.text, "hello");
        assert!(sender.is_sending("t1"));

        assert_eq!(
            sender.prepare(&active("t1"), "t1", "again"),
            Err(SendRejection::InFlight("t1".to_string()))
        );

        sender.finish("t1");
        assert!(sender.prepare(&active("t1"), "t1", "again").is_ok());
    }

    #[test]
    fn test_rejection_converts_to_drawer_error() {
        let err: DrawerError = SendRejection::EmptyText.into();
        assert_eq!(err.error_code(), "ACTION_REJECTED");
    }
}
