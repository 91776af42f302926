//! In-memory conversation store for tests.
//!
//! Behaves like a tiny server: sent messages are appended to the thread's
//! history with a server-assigned id and timestamp, so a reload after a send
//! returns them. Individual calls can be scripted to fail, and history loads
//! can be held open with a [`Gate`] to reproduce out-of-order completions.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use crate::error::RemoteError;
use crate::models::{ConversationSummary, ServerMessage};
use crate::traits::ConversationStore;

/// A call made against the mock, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    GetConversations,
    GetMessages(String),
    SendMessage { thread_id: String, text: String },
    MarkAsRead(String),
}

/// Holds a pending call open until released or dropped.
#[derive(Debug)]
pub struct Gate(oneshot::Sender<()>);

impl Gate {
    pub fn release(self) {
        let _ = self.0.send(());
    }
}

#[derive(Debug, Default)]
struct Inner {
    user_id: String,
    conversations: Vec<ConversationSummary>,
    conversations_failure: Option<RemoteError>,
    messages: HashMap<String, Vec<ServerMessage>>,
    message_failures: HashMap<String, RemoteError>,
    message_gates: HashMap<String, oneshot::Receiver<()>>,
    send_failure: Option<RemoteError>,
    send_gate: Option<oneshot::Receiver<()>>,
    mark_read_failure: Option<RemoteError>,
    next_message_id: u64,
    calls: Vec<StoreCall>,
}

/// Scriptable [`ConversationStore`]. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockConversationStore {
    inner: Arc<Mutex<Inner>>,
}

impl MockConversationStore {
    /// `user_id` becomes the `sender_id` of messages sent through the mock.
    pub fn new(user_id: &str) -> Self {
        let store = Self::default();
        store.inner.lock().unwrap().user_id = user_id.to_string();
        store
    }

    pub fn set_conversations(&self, conversations: Vec<ConversationSummary>) {
        let mut inner = self.inner.lock().unwrap();
        inner.conversations = conversations;
        inner.conversations_failure = None;
    }

    pub fn fail_conversations(&self, error: RemoteError) {
        self.inner.lock().unwrap().conversations_failure = Some(error);
    }

    pub fn set_messages(&self, thread_id: &str, messages: Vec<ServerMessage>) {
        let mut inner = self.inner.lock().unwrap();
        inner.messages.insert(thread_id.to_string(), messages);
        inner.message_failures.remove(thread_id);
    }

    pub fn fail_messages(&self, thread_id: &str, error: RemoteError) {
        self.inner
            .lock()
            .unwrap()
            .message_failures
            .insert(thread_id.to_string(), error);
    }

    /// Hold the next `get_messages(thread_id)` open until the gate is released.
    /// The response is read at release time, not at call time.
    pub fn hold_messages(&self, thread_id: &str) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.inner
            .lock()
            .unwrap()
            .message_gates
            .insert(thread_id.to_string(), rx);
        Gate(tx)
    }

    pub fn fail_send(&self, error: Option<RemoteError>) {
        self.inner.lock().unwrap().send_failure = error;
    }

    /// Hold the next `send_message` open until the gate is released.
    pub fn hold_send(&self) -> Gate {
        let (tx, rx) = oneshot::channel();
        self.inner.lock().unwrap().send_gate = Some(rx);
        Gate(tx)
    }

    pub fn fail_mark_read(&self, error: Option<RemoteError>) {
        self.inner.lock().unwrap().mark_read_failure = error;
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn count_calls(&self, predicate: impl Fn(&StoreCall) -> bool) -> usize {
        self.inner
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| predicate(c))
            .count()
    }

    fn record(&self, call: StoreCall) {
        self.inner.lock().unwrap().calls.push(call);
    }

    /// Server clock for a new message: never earlier than the thread's latest entry.
    fn next_timestamp(history: &[ServerMessage]) -> DateTime<Utc> {
        let now = Utc::now();
        match history.iter().map(|m| m.created_at).max() {
            Some(latest) if latest >= now => latest + Duration::seconds(1),
            _ => now,
        }
    }
}

#[async_trait]
impl ConversationStore for MockConversationStore {
    async fn get_conversations(&self) -> Result<Vec<ConversationSummary>, RemoteError> {
        self.record(StoreCall::GetConversations);
        let inner = self.inner.lock().unwrap();
        match inner.conversations_failure {
            Some(ref err) => Err(err.clone()),
            None => Ok(inner.conversations.clone()),
        }
    }

    async fn get_messages(&self, thread_id: &str) -> Result<Vec<ServerMessage>, RemoteError> {
        self.record(StoreCall::GetMessages(thread_id.to_string()));

        let gate = self.inner.lock().unwrap().message_gates.remove(thread_id);
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let inner = self.inner.lock().unwrap();
        if let Some(err) = inner.message_failures.get(thread_id) {
            return Err(err.clone());
        }
        Ok(inner.messages.get(thread_id).cloned().unwrap_or_default())
    }

    async fn send_message(&self, thread_id: &str, text: &str) -> Result<(), RemoteError> {
        self.record(StoreCall::SendMessage {
            thread_id: thread_id.to_string(),
            text: text.to_string(),
        });

        let gate = self.inner.lock().unwrap().send_gate.take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let mut inner = self.inner.lock().unwrap();
        if let Some(ref err) = inner.send_failure {
            return Err(err.clone());
        }

        inner.next_message_id += 1;
        let id = format!("srv-{}", inner.next_message_id);
        let sender_id = inner.user_id.clone();
        let history = inner.messages.entry(thread_id.to_string()).or_default();
        let created_at = Self::next_timestamp(history);
        history.push(ServerMessage {
            id,
            sender_id,
            content: text.to_string(),
            created_at,
        });
        Ok(())
    }

    async fn mark_as_read(&self, thread_id: &str) -> Result<(), RemoteError> {
        self.record(StoreCall::MarkAsRead(thread_id.to_string()));
        let inner = self.inner.lock().unwrap();
        match inner.mark_read_failure {
            Some(ref err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
