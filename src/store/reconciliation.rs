//! List sync and history merge for ThreadStore

use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

use crate::error::RemoteError;
use crate::models::{sort_by_sent_at, ConversationSummary, Message, MessageHistory, Thread};
use crate::traits::ConversationStore;

use super::{LoadState, ThreadStore};

/// Result of one list sync.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    /// Threads visible after the sync (0 on failure)
    pub thread_count: usize,
    /// Set when the fetch failed; the caller shows a retryable notice
    pub error: Option<RemoteError>,
}

impl ThreadStore {
    /// Fetch the conversation list and merge it in. Never fails: a remote
    /// error is recorded in the load state and returned in the report.
    pub async fn load(
        &mut self,
        remote: &dyn ConversationStore,
        active_thread_id: Option<&str>,
    ) -> SyncReport {
        self.mark_loading();
        let result = remote.get_conversations().await;
        self.apply_sync(result, active_thread_id)
    }

    /// Merge the outcome of a `get_conversations` call.
    ///
    /// Summaries replace the list wholesale, keyed by id, except for fields
    /// owned elsewhere: a loaded history is kept, and the local unread counter
    /// wins for the active thread and for threads read after this request was
    /// issued. Ids absent from the new list are dropped.
    pub fn apply_sync(
        &mut self,
        result: Result<Vec<ConversationSummary>, RemoteError>,
        active_thread_id: Option<&str>,
    ) -> SyncReport {
        let read_during_sync = std::mem::take(&mut self.read_during_sync);
        let summaries = match result {
            Ok(summaries) => summaries,
            Err(err) => {
                warn!(error = %err, code = err.error_code(), "conversation list sync failed");
                self.load_state = LoadState::Failed(err.clone());
                return SyncReport {
                    thread_count: 0,
                    error: Some(err),
                };
            }
        };

        let mut previous: HashMap<String, Thread> = std::mem::take(&mut self.threads);
        let mut seen = HashSet::new();
        self.thread_order.clear();

        for summary in summaries {
            if !seen.insert(summary.id.clone()) {
                debug!(thread_id = %summary.id, "duplicate conversation in sync, keeping first");
                continue;
            }

            let mut thread = Thread::from_summary(summary, &self.current_user_id);
            if let Some(existing) = previous.remove(&thread.id) {
                if existing.messages.is_loaded() {
                    thread.messages = existing.messages;
                }
                if active_thread_id == Some(thread.id.as_str())
                    || read_during_sync.contains(&thread.id)
                {
                    thread.unread_count = existing.unread_count;
                }
            }

            self.thread_order.push(thread.id.clone());
            self.threads.insert(thread.id.clone(), thread);
        }

        if !previous.is_empty() {
            debug!(dropped = previous.len(), "conversations no longer listed by server");
        }

        self.load_state = LoadState::Loaded;
        info!(count = self.thread_order.len(), "conversation list synced");

        SyncReport {
            thread_count: self.thread_order.len(),
            error: None,
        }
    }

    /// Install a freshly fetched history for one thread.
    ///
    /// Messages are sorted ascending by `sent_at`. Only `messages` and the
    /// last-message preview are touched. Returns `false` when the thread is
    /// not in the store.
    pub fn apply_reload(&mut self, thread_id: &str, mut messages: Vec<Message>) -> bool {
        let Some(thread) = self.threads.get_mut(thread_id) else {
            debug!(thread_id, "history loaded for unknown thread, ignoring");
            return false;
        };

        sort_by_sent_at(&mut messages);

        if let Some(last) = messages.last() {
            let newer = thread
                .last_message_time
                .map_or(true, |known| last.sent_at >= known);
            if newer {
                thread.last_message_preview = last.text.clone();
                thread.last_message_time = Some(last.sent_at);
            }
        }

        debug!(thread_id, count = messages.len(), "history merged");
        thread.messages = MessageHistory::Loaded(messages);
        true
    }
}
