//! Thread store
//!
//! Holds the conversation list shown in the drawer. The list is replaced on
//! every sync, but merged by id so fields owned by other components survive:
//! a loaded message history is never replaced by an unloaded one, and a
//! thread read locally after the in-flight list request was issued keeps its
//! zeroed unread counter.

mod reconciliation;
mod thread;

use std::collections::{HashMap, HashSet};

use crate::error::RemoteError;
use crate::models::Thread;

pub use reconciliation::SyncReport;

/// State of the most recent list sync.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    /// The last sync failed; the visible list is empty until a retry succeeds
    Failed(RemoteError),
}

#[derive(Debug, Default)]
pub struct ThreadStore {
    /// Threads indexed by id
    pub(crate) threads: HashMap<String, Thread>,
    /// Ids in server order
    pub(crate) thread_order: Vec<String>,
    pub(crate) load_state: LoadState,
    /// Used to resolve authorship and the self conversation
    pub(crate) current_user_id: String,
    /// Threads zeroed while a list request was in flight. That response
    /// predates the read, so its counters are ignored for these ids.
    pub(crate) read_during_sync: HashSet<String>,
}

impl ThreadStore {
    pub fn new(current_user_id: impl Into<String>) -> Self {
        Self {
            current_user_id: current_user_id.into(),
            ..Self::default()
        }
    }

    pub fn current_user_id(&self) -> &str {
        &self.current_user_id
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Error of the last sync, if it failed. Always retryable from the UI.
    pub fn load_error(&self) -> Option<&RemoteError> {
        match self.load_state {
            LoadState::Failed(ref err) => Some(err),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    /// Flag a sync as in flight. Existing threads stay visible meanwhile.
    pub fn mark_loading(&mut self) {
        self.load_state = LoadState::Loading;
        self.read_during_sync.clear();
    }

    /// Drop every thread and return to the never-loaded state.
    pub fn clear(&mut self) {
        self.threads.clear();
        self.thread_order.clear();
        self.read_during_sync.clear();
        self.load_state = LoadState::NotLoaded;
    }
}
