//! Conversation-level state: which thread is open, its read state, and
//! outgoing messages.

pub mod active;
pub mod read_state;
pub mod sender;

pub use active::{ActiveConversation, Generation, LoadOutcome, LoadStatus, Selection};
pub use read_state::ReadStateTracker;
pub use sender::{MessageSender, OutgoingMessage, SendRejection};
