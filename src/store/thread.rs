//! Thread queries and per-thread field updates for ThreadStore

use crate::models::{Message, Thread};

use super::{LoadState, ThreadStore};

impl ThreadStore {
    /// Threads in server order. Empty while the last sync is in the failed state.
    pub fn threads(&self) -> Vec<&Thread> {
        if matches!(self.load_state, LoadState::Failed(_)) {
            return Vec::new();
        }
        self.thread_order
            .iter()
            .filter_map(|id| self.threads.get(id))
            .collect()
    }

    /// Look up a thread regardless of load state, so an open conversation
    /// keeps rendering even when a later list sync fails.
    pub fn get_thread(&self, id: &str) -> Option<&Thread> {
        self.threads.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.threads.contains_key(id)
    }

    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    /// Loaded history of a thread; `None` when unknown or not fetched yet.
    pub fn messages(&self, id: &str) -> Option<&[Message]> {
        self.threads.get(id).and_then(|t| t.messages.messages())
    }

    /// Sum of unread counters for the drawer badge. The self conversation never counts.
    pub fn total_unread(&self) -> u32 {
        self.threads
            .values()
            .filter(|t| !t.is_self)
            .map(|t| t.unread_count)
            .sum()
    }

    /// Zero a thread's unread counter.
    ///
    /// While a list request is in flight the id is remembered, so the
    /// response cannot bring back a count the user has already read.
    /// Returns `true` if the counter changed.
    pub fn reset_unread(&mut self, thread_id: &str) -> bool {
        let Some(thread) = self.threads.get_mut(thread_id) else {
            return false;
        };
        if self.load_state == LoadState::Loading {
            self.read_during_sync.insert(thread_id.to_string());
        }
        if thread.unread_count == 0 {
            return false;
        }
        thread.unread_count = 0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteError;
    use crate::models::ConversationSummary;

    fn summary(id: &str, unread: u32) -> ConversationSummary {
        ConversationSummary {
            id: id.to_string(),
            name: format!("Thread {}", id),
            unread_count: unread,
            last_message: String::new(),
            last_message_time: None,
            kind: Default::default(),
            subtitle: None,
            participant_id: None,
        }
    }

    fn loaded_store() -> ThreadStore {
        let mut store = ThreadStore::new("me");
        store.apply_sync(
            Ok(vec![summary("t1", 1), summary("t2", 0), summary("t3", 4)]),
            None,
        );
        store
    }

    #[test]
    fn test_threads_keep_server_order() {
        let store = loaded_store();
        let ids: Vec<&str> = store.threads().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn test_reset_unread() {
        let mut store = loaded_store();
        assert!(store.reset_unread("t1"));
        assert_eq!(store.get_thread("t1").unwrap().unread_count, 0);
        assert!(!store.reset_unread("t1"));
        assert!(!store.reset_unread("missing"));
    }

    #[test]
    fn test_reset_during_sync_is_remembered() {
        let mut store = loaded_store();
        store.reset_unread("t1");
        assert!(store.read_during_sync.is_empty());

        store.mark_loading();
        store.reset_unread("t2");
        store.reset_unread("missing");
        assert!(store.read_during_sync.contains("t2"));
        assert!(!store.read_during_sync.contains("missing"));
    }

    #[test]
    fn test_total_unread_excludes_self() {
        let mut store = ThreadStore::new("me");
        let mut own = summary("notes", 9);
        own.participant_id = Some("me".to_string());
        store.apply_sync(Ok(vec![summary("t1", 2), own]), None);
        assert_eq!(store.total_unread(), 2);
    }

    #[test]
    fn test_failed_sync_hides_list_but_keeps_lookup() {
        let mut store = loaded_store();
        store.apply_sync(Err(RemoteError::Connection("down".to_string())), None);

        assert!(store.threads().is_empty());
        assert!(store.get_thread("t2").is_some());
        assert!(store.messages("t2").is_none());
    }
}
