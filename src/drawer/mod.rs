//! The messaging drawer.
//!
//! [`Drawer`] owns the thread store, the active conversation, read state,
//! the sender and the filter. Remote calls run as spawned tasks that post a
//! [`DrawerMessage`] back over an unbounded channel; [`Drawer::handle_message`]
//! applies them one at a time and is the only place results from the network
//! touch the thread collection.

mod actions;
mod handlers;
mod messages;
mod notice;

pub use messages::DrawerMessage;
pub use notice::{Notice, NoticeSource};

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::conversation::{
    ActiveConversation, LoadStatus, MessageSender, ReadStateTracker, Selection,
};
use crate::filter::{FilterState, Tab};
use crate::input::Keybindings;
use crate::models::{Message, Thread};
use crate::store::ThreadStore;
use crate::traits::{ConversationStore, SessionProvider};

pub struct Drawer {
    remote: Arc<dyn ConversationStore>,
    session: Arc<dyn SessionProvider>,
    store: ThreadStore,
    active: ActiveConversation,
    read_state: ReadStateTracker,
    sender: MessageSender,
    filter: FilterState,
    keybindings: Keybindings,
    /// Composer text
    draft: String,
    notice: Option<Notice>,
    request_timeout: Duration,
    message_tx: mpsc::UnboundedSender<DrawerMessage>,
    message_rx: mpsc::UnboundedReceiver<DrawerMessage>,
    /// Spawned tasks whose message has not been handled yet
    pending_tasks: usize,
}

impl Drawer {
    pub fn new(remote: Arc<dyn ConversationStore>, session: Arc<dyn SessionProvider>) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let store = ThreadStore::new(session.current_user_id());

        Self {
            remote,
            session,
            store,
            active: ActiveConversation::new(),
            read_state: ReadStateTracker::new(),
            sender: MessageSender::new(),
            filter: FilterState::default(),
            keybindings: Keybindings::new(),
            draft: String::new(),
            notice: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            message_tx,
            message_rx,
            pending_tasks: 0,
        }
    }

    /// Upper bound for each remote call made by the drawer.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_keybindings(mut self, keybindings: Keybindings) -> Self {
        self.keybindings = keybindings;
        self
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn store(&self) -> &ThreadStore {
        &self.store
    }

    pub fn current_user_id(&self) -> &str {
        self.session.current_user_id()
    }

    pub fn selection(&self) -> &Selection {
        self.active.selection()
    }

    pub fn active_thread_id(&self) -> Option<&str> {
        self.active.thread_id()
    }

    pub fn active_status(&self) -> Option<LoadStatus> {
        self.active.status()
    }

    pub fn active_thread(&self) -> Option<&Thread> {
        self.active.thread_id().and_then(|id| self.store.get_thread(id))
    }

    /// History of the open conversation, once loaded.
    ///
    /// `None` while the current activation is [`LoadStatus::Failed`], even if
    /// an earlier activation left a history in the store.
    pub fn active_messages(&self) -> Option<&[Message]> {
        if self.active.status() == Some(LoadStatus::Failed) {
            return None;
        }
        self.active.thread_id().and_then(|id| self.store.messages(id))
    }

    /// Threads after applying the current tab and query.
    pub fn visible_threads(&self) -> Vec<&Thread> {
        self.filter.apply(self.store.threads())
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn tab(&self) -> Tab {
        self.filter.tab
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_sending(&self, thread_id: &str) -> bool {
        self.sender.is_sending(thread_id)
    }

    /// Badge count for the drawer toggle.
    pub fn unread_badge(&self) -> u32 {
        self.store.total_unread()
    }

    pub fn pending_tasks(&self) -> usize {
        self.pending_tasks
    }

    // ------------------------------------------------------------------
    // Message loop
    // ------------------------------------------------------------------

    /// Wait for the next task result and apply it.
    ///
    /// Returns `false` without waiting when nothing is in flight.
    pub async fn process_next(&mut self) -> bool {
        if self.pending_tasks == 0 {
            return false;
        }
        match self.message_rx.recv().await {
            Some(msg) => {
                self.handle_message(msg);
                true
            }
            None => false,
        }
    }

    /// Process results until no task is in flight.
    pub async fn settle(&mut self) {
        while self.process_next().await {}
    }
}
