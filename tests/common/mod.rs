//! Common test utilities for integration tests.
//!
//! Fixtures for conversation payloads and a drawer wired to the in-memory
//! conversation store.
//!
//! ```ignore
//! let remote = MockConversationStore::new(USER_ID);
//! remote.set_conversations(vec![summary("t1", "Ada", 2)]);
//! let mut drawer = drawer_with(&remote);
//! drawer.open();
//! drawer.settle().await;
//! ```

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use threadline::adapters::{MockConversationStore, StaticSession};
use threadline::drawer::Drawer;
use threadline::models::{ConversationSummary, ServerMessage, ThreadKind};

pub const USER_ID: &str = "u-me";
pub const OTHER_ID: &str = "u-ada";

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

pub fn summary(id: &str, name: &str, unread: u32) -> ConversationSummary {
    ConversationSummary {
        id: id.to_string(),
        name: name.to_string(),
        unread_count: unread,
        last_message: String::new(),
        last_message_time: None,
        kind: ThreadKind::Direct,
        subtitle: None,
        participant_id: Some(OTHER_ID.to_string()),
    }
}

pub fn group(id: &str, name: &str, unread: u32) -> ConversationSummary {
    ConversationSummary {
        kind: ThreadKind::Group,
        participant_id: None,
        ..summary(id, name, unread)
    }
}

pub fn community(id: &str, name: &str, unread: u32) -> ConversationSummary {
    ConversationSummary {
        kind: ThreadKind::Community,
        participant_id: None,
        ..summary(id, name, unread)
    }
}

/// The signed-in user's own conversation.
pub fn self_thread(id: &str) -> ConversationSummary {
    ConversationSummary {
        participant_id: Some(USER_ID.to_string()),
        ..summary(id, "Notes to self", 0)
    }
}

pub fn theirs(id: &str, text: &str, secs: i64) -> ServerMessage {
    ServerMessage {
        id: id.to_string(),
        sender_id: OTHER_ID.to_string(),
        content: text.to_string(),
        created_at: at(secs),
    }
}

pub fn mine(id: &str, text: &str, secs: i64) -> ServerMessage {
    ServerMessage {
        sender_id: USER_ID.to_string(),
        ..theirs(id, text, secs)
    }
}

pub fn drawer_with(remote: &MockConversationStore) -> Drawer {
    Drawer::new(
        Arc::new(remote.clone()),
        Arc::new(StaticSession::new(USER_ID)),
    )
}

/// Drawer with the conversation list already loaded.
pub async fn opened_drawer(remote: &MockConversationStore) -> Drawer {
    let mut drawer = drawer_with(remote);
    drawer.open();
    drawer.settle().await;
    drawer
}
