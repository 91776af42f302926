//! Message handling for the Drawer.

use tracing::{debug, info, warn};

use crate::conversation::LoadOutcome;
use crate::error::ErrorContext;
use crate::models::Message;

use super::{Drawer, DrawerMessage, Notice, NoticeSource};

impl Drawer {
    /// Apply the result of a finished remote call.
    pub fn handle_message(&mut self, msg: DrawerMessage) {
        self.pending_tasks = self.pending_tasks.saturating_sub(1);
        debug!(kind = msg.kind(), pending = self.pending_tasks, "handling drawer message");

        match msg {
            DrawerMessage::ThreadsLoaded(result) => {
                let report = self.store.apply_sync(result, self.active.thread_id());
                match report.error {
                    Some(err) => {
                        warn!(
                            context = %ErrorContext::new("get_conversations"),
                            category = %err.category(),
                            error = %err,
                            "conversation list failed"
                        );
                        self.notice = Some(Notice::error(
                            NoticeSource::ThreadList,
                            "Couldn't load conversations.",
                            &err,
                        ));
                    }
                    None => self.dismiss_notice_from(&NoticeSource::ThreadList),
                }
            }

            DrawerMessage::MessagesLoaded {
                thread_id,
                token,
                result,
            } => {
                if self.active.complete_load(&thread_id, token, result.is_ok())
                    == LoadOutcome::Stale
                {
                    warn!(thread_id = %thread_id, token, "discarding superseded history result");
                    return;
                }

                let source = NoticeSource::History(thread_id.clone());
                match result {
                    Ok(raw) => {
                        let user_id = self.session.current_user_id();
                        let messages: Vec<Message> =
                            raw.into_iter().map(|m| m.into_message(user_id)).collect();
                        self.store.apply_reload(&thread_id, messages);
                        self.dismiss_notice_from(&source);
                    }
                    Err(err) => {
                        let ctx = ErrorContext::new("get_messages")
                            .with_thread_id(thread_id.as_str())
                            .with_generation(token);
                        warn!(context = %ctx, category = %err.category(), error = %err, "history fetch failed");
                        self.notice = Some(Notice::error(
                            source,
                            "Couldn't load this conversation.",
                            &err,
                        ));
                    }
                }
            }

            DrawerMessage::MessageSent {
                thread_id,
                text,
                result,
            } => {
                self.sender.finish(&thread_id);
                let source = NoticeSource::Send(thread_id.clone());

                match result {
                    Ok(()) => {
                        info!(thread_id = %thread_id, "message sent");
                        if self.draft.trim() == text {
                            self.draft.clear();
                        }
                        self.dismiss_notice_from(&source);

                        if let Some(token) = self.active.reload(&thread_id) {
                            self.spawn_history_fetch(&thread_id, token);
                        } else {
                            debug!(thread_id = %thread_id, "thread closed before send finished, skipping reload");
                        }
                    }
                    Err(err) => {
                        let ctx = ErrorContext::new("send_message").with_thread_id(thread_id.as_str());
                        warn!(context = %ctx, category = %err.category(), error = %err, "send failed, draft kept");
                        self.notice = Some(Notice::error(source, "Message not sent.", &err));
                    }
                }
            }

            DrawerMessage::MarkReadFinished { thread_id, result } => {
                if let Err(err) = result {
                    let ctx = ErrorContext::new("mark_as_read").with_thread_id(thread_id);
                    warn!(context = %ctx, error = %err, "failed to persist read state");
                }
            }
        }
    }
}
