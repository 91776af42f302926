use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{deserialize_id, deserialize_nullable_string};

/// Who wrote a message, relative to the signed-in user.
///
/// Rendering and ordering only ever look at this, never at raw sender ids.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Authorship {
    Mine,
    Theirs,
}

impl Authorship {
    /// Compare a message's sender against the current session's user id.
    pub fn from_sender(sender_id: &str, current_user_id: &str) -> Self {
        if sender_id == current_user_id {
            Authorship::Mine
        } else {
            Authorship::Theirs
        }
    }
}

/// Message format returned by the conversation service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerMessage {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub sender_id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ServerMessage {
    /// Convert to a client [`Message`], resolving authorship against the
    /// current user.
    pub fn into_message(self, current_user_id: &str) -> Message {
        Message {
            authorship: Authorship::from_sender(&self.sender_id, current_user_id),
            id: self.id,
            text: self.content,
            sent_at: self.created_at,
        }
    }
}

/// One chat entry in a loaded conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: String,
    pub authorship: Authorship,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl Message {
    pub fn is_mine(&self) -> bool {
        self.authorship == Authorship::Mine
    }
}

/// Sort messages ascending by `sent_at`.
///
/// The sort is stable, so entries sharing a timestamp keep the order the
/// server returned them in.
pub fn sort_by_sent_at(messages: &mut [Message]) {
    messages.sort_by_key(|m| m.sent_at);
}

/// Whether `messages` is non-decreasing by `sent_at`.
pub fn is_chronological(messages: &[Message]) -> bool {
    messages.windows(2).all(|w| w[0].sent_at <= w[1].sent_at)
}
