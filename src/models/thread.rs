use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{
    deserialize_id, deserialize_nullable_string, deserialize_optional_id,
    deserialize_unread_count, Message,
};

/// Kind of conversation - drives the groups/communities tabs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThreadKind {
    /// One-to-one conversation (default)
    #[default]
    #[serde(alias = "dm")]
    Direct,
    Group,
    Community,
}

/// Helper to deserialize ThreadKind with null handling
fn deserialize_thread_kind<'de, D>(deserializer: D) -> Result<ThreadKind, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<ThreadKind>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

/// Conversation summary as returned by the conversation list endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationSummary {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_unread_count")]
    pub unread_count: u32,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub last_message: String,
    #[serde(default)]
    pub last_message_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_thread_kind")]
    pub kind: ThreadKind,
    #[serde(default)]
    pub subtitle: Option<String>,
    /// The other party of a direct conversation. Equal to the current user
    /// for the self conversation.
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub participant_id: Option<String>,
}

/// Message history of a thread.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum MessageHistory {
    /// Not fetched yet
    #[default]
    Unloaded,
    /// Ascending by `sent_at`, exactly as the last fetch returned it
    Loaded(Vec<Message>),
}

impl MessageHistory {
    pub fn is_loaded(&self) -> bool {
        matches!(self, MessageHistory::Loaded(_))
    }

    /// Loaded messages, or `None` while unloaded.
    pub fn messages(&self) -> Option<&[Message]> {
        match self {
            MessageHistory::Loaded(messages) => Some(messages),
            MessageHistory::Unloaded => None,
        }
    }
}

/// A conversation in the drawer
#[derive(Debug, Clone, PartialEq)]
pub struct Thread {
    pub id: String,
    pub kind: ThreadKind,
    pub display_name: String,
    pub subtitle: String,
    /// Single character shown in the avatar bubble
    pub avatar_glyph: String,
    pub unread_count: u32,
    pub last_message_preview: String,
    pub last_message_time: Option<DateTime<Utc>>,
    pub messages: MessageHistory,
    /// The user's own notes-to-self conversation; never carries unread state
    pub is_self: bool,
}

impl Thread {
    /// Build a thread from a list-sync summary. History starts unloaded.
    pub fn from_summary(summary: ConversationSummary, current_user_id: &str) -> Self {
        let is_self = summary.kind == ThreadKind::Direct
            && summary.participant_id.as_deref() == Some(current_user_id);
        let avatar_glyph = avatar_glyph_for(&summary.name);

        Self {
            id: summary.id,
            kind: summary.kind,
            display_name: summary.name,
            subtitle: summary.subtitle.unwrap_or_default(),
            avatar_glyph,
            unread_count: if is_self { 0 } else { summary.unread_count },
            last_message_preview: summary.last_message,
            last_message_time: summary.last_message_time,
            messages: MessageHistory::Unloaded,
            is_self,
        }
    }
}

/// First alphanumeric character of the name, uppercased; `?` when there is none.
pub fn avatar_glyph_for(name: &str) -> String {
    name.chars()
        .find(|c| c.is_alphanumeric())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_minimal_payload() {
        let json = r#"{"id": 12, "name": "Ada", "unread_count": 2, "last_message": "see you", "last_message_time": "2024-05-01T10:00:00Z"}"#;
        let summary: ConversationSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.id, "12");
        assert_eq!(summary.kind, ThreadKind::Direct);
        assert_eq!(summary.unread_count, 2);
        assert!(summary.subtitle.is_none());
    }

    #[test]
    fn test_summary_kind_aliases_and_null() {
        let s: ConversationSummary =
            serde_json::from_str(r#"{"id":"a","kind":"dm"}"#).unwrap();
        assert_eq!(s.kind, ThreadKind::Direct);
        let s: ConversationSummary =
            serde_json::from_str(r#"{"id":"a","kind":"community"}"#).unwrap();
        assert_eq!(s.kind, ThreadKind::Community);
        let s: ConversationSummary =
            serde_json::from_str(r#"{"id":"a","kind":null,"name":null,"last_message":null}"#)
                .unwrap();
        assert_eq!(s.kind, ThreadKind::Direct);
        assert_eq!(s.name, "");
    }

    #[test]
    fn test_from_summary_starts_unloaded() {
        let summary: ConversationSummary = serde_json::from_str(
            r#"{"id":"t1","name":"rust jobs","unread_count":4,"kind":"group","subtitle":"Hiring"}"#,
        )
        .unwrap();
        let thread = Thread::from_summary(summary, "me");
        assert_eq!(thread.messages, MessageHistory::Unloaded);
        assert_eq!(thread.avatar_glyph, "R");
        assert_eq!(thread.subtitle, "Hiring");
        assert_eq!(thread.unread_count, 4);
        assert!(!thread.is_self);
    }

    #[test]
    fn test_self_conversation_has_no_unread() {
        let summary: ConversationSummary = serde_json::from_str(
            r#"{"id":"notes","name":"You","unread_count":3,"participant_id":"me"}"#,
        )
        .unwrap();
        let thread = Thread::from_summary(summary, "me");
        assert!(thread.is_self);
        assert_eq!(thread.unread_count, 0);
    }

    #[test]
    fn test_avatar_glyph() {
        assert_eq!(avatar_glyph_for("  émile"), "É");
        assert_eq!(avatar_glyph_for("#general"), "G");
        assert_eq!(avatar_glyph_for(""), "?");
    }

    #[test]
    fn test_history_accessors() {
        assert!(!MessageHistory::Unloaded.is_loaded());
        assert!(MessageHistory::Unloaded.messages().is_none());
        let loaded = MessageHistory::Loaded(Vec::new());
        assert!(loaded.is_loaded());
        assert_eq!(loaded.messages().map(|m| m.len()), Some(0));
    }
}
