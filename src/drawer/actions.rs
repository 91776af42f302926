//! User actions on the drawer. Each one updates local state synchronously
//! and spawns whatever remote call it needs.

use crossterm::event::KeyEvent;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::conversation::{Generation, SendRejection};
use crate::error::RemoteError;
use crate::filter::Tab;
use crate::input::DrawerCommand;

use super::{Drawer, DrawerMessage, NoticeSource};

/// Run a remote call with an upper bound on its duration.
async fn bounded<T>(
    operation: &str,
    timeout: Duration,
    call: impl Future<Output = Result<T, RemoteError>>,
) -> Result<T, RemoteError> {
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(RemoteError::Timeout {
            operation: operation.to_string(),
            secs: timeout.as_secs(),
        }),
    }
}

impl Drawer {
    fn spawn_task<F>(&mut self, task: F)
    where
        F: Future<Output = DrawerMessage> + Send + 'static,
    {
        let message_tx = self.message_tx.clone();
        self.pending_tasks += 1;
        tokio::spawn(async move {
            let _ = message_tx.send(task.await);
        });
    }

    /// Open the drawer: fetch the conversation list.
    pub fn open(&mut self) {
        self.refresh();
    }

    /// Re-fetch the conversation list. Ignored while a fetch is running.
    pub fn refresh(&mut self) {
        if self.store.is_loading() {
            debug!("conversation list fetch already running");
            return;
        }
        self.store.mark_loading();

        let remote = Arc::clone(&self.remote);
        let timeout = self.request_timeout;
        self.spawn_task(async move {
            let result = bounded("get_conversations", timeout, remote.get_conversations()).await;
            DrawerMessage::ThreadsLoaded(result)
        });
    }

    /// Make `thread_id` the active conversation.
    ///
    /// Zeroes its unread counter right away and starts the history fetch.
    /// Returns `false` for an unknown id or the thread that is already open.
    pub fn select(&mut self, thread_id: &str) -> bool {
        if !self.store.contains(thread_id) {
            debug!(thread_id, "cannot select unknown thread");
            return false;
        }
        let Some(token) = self.active.select(thread_id) else {
            return false;
        };

        if self.read_state.mark_read(&mut self.store, thread_id, token) {
            self.spawn_mark_read(thread_id);
        }
        self.spawn_history_fetch(thread_id, token);
        true
    }

    /// Return to the list. The thread store is kept as is.
    pub fn close(&mut self) {
        if let Some(thread_id) = self.active.thread_id() {
            let source = NoticeSource::History(thread_id.to_string());
            self.dismiss_notice_from(&source);
        }
        self.active.close();
        self.read_state.reset();
    }

    /// Fetch the open conversation's history again.
    pub fn reload_active(&mut self) -> bool {
        let Some(thread_id) = self.active.thread_id().map(str::to_string) else {
            return false;
        };
        match self.active.reload(&thread_id) {
            Some(token) => {
                self.spawn_history_fetch(&thread_id, token);
                true
            }
            None => false,
        }
    }

    /// Post `text` to `thread_id`, which must be the open conversation.
    ///
    /// Nothing is shown locally until the follow-up reload returns the
    /// message from the server.
    pub fn send(&mut self, thread_id: &str, text: &str) -> Result<(), SendRejection> {
        let outgoing = self
            .sender
            .prepare(self.active.selection(), thread_id, text)
            .inspect_err(|rejection| debug!(thread_id, %rejection, "send rejected"))?;

        info!(thread_id, "sending message");
        let remote = Arc::clone(&self.remote);
        let timeout = self.request_timeout;
        self.spawn_task(async move {
            let result = bounded(
                "send_message",
                timeout,
                remote.send_message(&outgoing.thread_id, &outgoing.text),
            )
            .await;
            DrawerMessage::MessageSent {
                thread_id: outgoing.thread_id,
                text: outgoing.text,
                result,
            }
        });
        Ok(())
    }

    /// Send the draft to the open conversation.
    pub fn submit_draft(&mut self) -> Result<(), SendRejection> {
        let thread_id = self
            .active
            .thread_id()
            .map(str::to_string)
            .ok_or(SendRejection::NoActiveThread)?;
        let draft = self.draft.clone();
        self.send(&thread_id, &draft)
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.filter.tab = tab;
    }

    /// Move to the next (or previous) tab, wrapping around.
    pub fn cycle_tab(&mut self, forward: bool) {
        let tabs = Tab::ALL;
        let current = tabs.iter().position(|t| *t == self.filter.tab).unwrap_or(0);
        let next = if forward {
            (current + 1) % tabs.len()
        } else {
            (current + tabs.len() - 1) % tabs.len()
        };
        self.filter.tab = tabs[next];
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub(super) fn dismiss_notice_from(&mut self, source: &NoticeSource) {
        if self.notice.as_ref().is_some_and(|n| &n.source == source) {
            self.notice = None;
        }
    }

    /// Translate a key press and run the resulting command.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<DrawerCommand> {
        let command = self.keybindings.resolve(key)?;
        self.execute(command.clone());
        Some(command)
    }

    pub fn execute(&mut self, command: DrawerCommand) {
        match command {
            DrawerCommand::Send => {
                // rejections are no-ops; the draft stays put
                let _ = self.submit_draft();
            }
            DrawerCommand::InsertNewline => self.draft.push('\n'),
            DrawerCommand::InsertChar(c) => self.draft.push(c),
            DrawerCommand::Backspace => {
                self.draft.pop();
            }
            DrawerCommand::ClearDraft => self.draft.clear(),
            DrawerCommand::Close => self.close(),
            DrawerCommand::NextTab => self.cycle_tab(true),
            DrawerCommand::PreviousTab => self.cycle_tab(false),
            DrawerCommand::Refresh => self.refresh(),
        }
    }

    pub(super) fn spawn_history_fetch(&mut self, thread_id: &str, token: Generation) {
        debug!(thread_id, token, "fetching history");
        let remote = Arc::clone(&self.remote);
        let timeout = self.request_timeout;
        let thread_id = thread_id.to_string();
        self.spawn_task(async move {
            let result = bounded("get_messages", timeout, remote.get_messages(&thread_id)).await;
            DrawerMessage::MessagesLoaded {
                thread_id,
                token,
                result,
            }
        });
    }

    fn spawn_mark_read(&mut self, thread_id: &str) {
        let remote = Arc::clone(&self.remote);
        let timeout = self.request_timeout;
        let thread_id = thread_id.to_string();
        self.spawn_task(async move {
            let result = bounded("mark_as_read", timeout, remote.mark_as_read(&thread_id)).await;
            DrawerMessage::MarkReadFinished { thread_id, result }
        });
    }
}
