//! Read-state tracker.
//!
//! Clears a thread's unread counter when it is opened and decides whether the
//! remote store should be told. The remote call is fire-and-forget: its
//! failure never restores the local counter.

use tracing::debug;

use crate::store::ThreadStore;

use super::active::Generation;

#[derive(Debug, Default)]
pub struct ReadStateTracker {
    /// Thread and activation most recently marked
    last_marked: Option<(String, Generation)>,
}

impl ReadStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero the unread counter of `thread_id` for this activation.
    ///
    /// Returns `true` when the caller should send `mark_as_read` to the
    /// remote store. Repeated calls for the same activation do nothing, and
    /// the self conversation or an unknown id is never marked.
    pub fn mark_read(
        &mut self,
        store: &mut ThreadStore,
        thread_id: &str,
        activation: Generation,
    ) -> bool {
        if self.already_marked(thread_id, activation) {
            return false;
        }

        let Some(thread) = store.get_thread(thread_id) else {
            debug!(thread_id, "not marking unknown thread as read");
            return false;
        };
        if thread.is_self {
            debug!(thread_id, "self conversation has no read state");
            return false;
        }

        store.reset_unread(thread_id);
        self.last_marked = Some((thread_id.to_string(), activation));
        debug!(thread_id, activation, "marked read");
        true
    }

    pub fn already_marked(&self, thread_id: &str, activation: Generation) -> bool {
        matches!(&self.last_marked, Some((id, a)) if id == thread_id && *a == activation)
    }

    /// Forget the last activation, e.g. when the drawer closes.
    pub fn reset(&mut self) {
        self.last_marked = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConversationSummary;

    fn store() -> ThreadStore {
        let summary = |id: &str, unread: u32, participant: Option<&str>| ConversationSummary {
            id: id.to_string(),
            name: id.to_string(),
            unread_count: unread,
            last_message: String::new(),
            last_message_time: None,
            kind: Default::default(),
            subtitle: None,
            participant_id: participant.map(str::to_string),
        };

        let mut store = ThreadStore::new("me");
        store.apply_sync(
            Ok(vec![summary("t1", 3, Some("ada")), summary("notes", 0, Some("me"))]),
            None,
        );
        store
    }

    #[test]
    fn test_mark_read_once_per_activation() {
        let mut store = store();
        let mut tracker = ReadStateTracker::new();

        assert!(tracker.mark_read(&mut store, "t1", 1));
        assert_eq!(store.get_thread("t1").unwrap().unread_count, 0);
        assert!(!tracker.mark_read(&mut store, "t1", 1));

        // a new activation of the same thread marks again
        assert!(tracker.mark_read(&mut store, "t1", 4));
    }

    #[test]
    fn test_self_and_unknown_threads_are_skipped() {
        let mut store = store();
        let mut tracker = ReadStateTracker::new();
        assert!(!tracker.mark_read(&mut store, "notes", 1));
        assert!(!tracker.mark_read(&mut store, "ghost", 2));
    }

    #[test]
    fn test_reset_forgets_activation() {
        let mut store = store();
        let mut tracker = ReadStateTracker::new();
        tracker.mark_read(&mut store, "t1", 1);
        tracker.reset();
        assert!(!tracker.already_marked("t1", 1));
    }
}
