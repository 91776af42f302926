//! Remote conversation store abstraction.
//!
//! This is the whole surface the drawer consumes from the messaging service.
//! Implementations are injected at construction time; there is no global store.

use async_trait::async_trait;

use crate::error::RemoteError;
use crate::models::{ConversationSummary, ServerMessage};

/// Operations on the remote conversation/message store.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Summaries of every conversation visible to the current user.
    async fn get_conversations(&self) -> Result<Vec<ConversationSummary>, RemoteError>;

    /// Full message history of one conversation, in any order.
    async fn get_messages(&self, thread_id: &str) -> Result<Vec<ServerMessage>, RemoteError>;

    /// Post a message. Success means the server has stored it.
    async fn send_message(&self, thread_id: &str, text: &str) -> Result<(), RemoteError>;

    /// Persist that the current user has read the conversation.
    async fn mark_as_read(&self, thread_id: &str) -> Result<(), RemoteError>;
}
