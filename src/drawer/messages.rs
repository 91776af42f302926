//! DrawerMessage enum for results posted back by spawned remote calls.

use crate::conversation::Generation;
use crate::error::RemoteError;
use crate::models::{ConversationSummary, ServerMessage};

/// Outcome of a remote call, delivered to the drawer's merge loop
#[derive(Debug, Clone)]
pub enum DrawerMessage {
    /// Conversation list fetch finished
    ThreadsLoaded(Result<Vec<ConversationSummary>, RemoteError>),
    /// History fetch finished; `token` identifies the fetch
    MessagesLoaded {
        thread_id: String,
        token: Generation,
        result: Result<Vec<ServerMessage>, RemoteError>,
    },
    /// Send finished; `text` is what was submitted
    MessageSent {
        thread_id: String,
        text: String,
        result: Result<(), RemoteError>,
    },
    /// Read-state persistence finished
    MarkReadFinished {
        thread_id: String,
        result: Result<(), RemoteError>,
    },
}

impl DrawerMessage {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            DrawerMessage::ThreadsLoaded(_) => "threads_loaded",
            DrawerMessage::MessagesLoaded { .. } => "messages_loaded",
            DrawerMessage::MessageSent { .. } => "message_sent",
            DrawerMessage::MarkReadFinished { .. } => "mark_read_finished",
        }
    }
}
