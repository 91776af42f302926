//! Fixed-identity session provider.

use crate::traits::SessionProvider;

/// Session whose user id is known up front, e.g. from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSession {
    user_id: String,
}

impl StaticSession {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

impl SessionProvider for StaticSession {
    fn current_user_id(&self) -> &str {
        &self.user_id
    }
}
