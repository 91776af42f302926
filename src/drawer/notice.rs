//! User-visible notices (the drawer's toast slot).

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::RemoteError;

/// What a notice is about. A later success for the same source clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeSource {
    ThreadList,
    History(String),
    Send(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: Uuid,
    pub source: NoticeSource,
    pub message: String,
    /// Whether offering "try again" makes sense
    pub retryable: bool,
    pub created_at: DateTime<Utc>,
}

impl Notice {
    pub fn error(source: NoticeSource, headline: &str, err: &RemoteError) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            message: format!("{} {}", headline, err.user_message()),
            retryable: err.is_retryable(),
            created_at: Utc::now(),
        }
    }
}
