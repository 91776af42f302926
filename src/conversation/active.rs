//! Active conversation controller.
//!
//! Tracks which thread is open and whether its history has arrived. Every
//! history fetch is tagged with a generation token; a result is only applied
//! if its token is still the current one, so a slow response for a thread the
//! user already left can never overwrite what is on screen.

use tracing::debug;

/// Generation token attached to a history fetch
pub type Generation = u64;

/// Load status of the active thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// First history fetch is in flight
    Pending,
    /// History is on screen
    Ready,
    /// The first fetch failed; nothing to show
    Failed,
}

/// What the drawer currently has open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Active {
        thread_id: String,
        /// Token of the most recent fetch for this thread
        token: Generation,
        /// Token minted by the `select` that opened this thread
        activation: Generation,
        status: LoadStatus,
    },
}

impl Selection {
    pub fn thread_id(&self) -> Option<&str> {
        match self {
            Selection::Active { thread_id, .. } => Some(thread_id),
            Selection::Idle => None,
        }
    }

    pub fn status(&self) -> Option<LoadStatus> {
        match self {
            Selection::Active { status, .. } => Some(*status),
            Selection::Idle => None,
        }
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.thread_id() == Some(id)
    }
}

/// Outcome of feeding a finished fetch back into the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result belongs to the current fetch and was accepted
    Applied,
    /// A newer selection or reload superseded this fetch
    Stale,
}

#[derive(Debug, Default)]
pub struct ActiveConversation {
    selection: Selection,
    /// Last token handed out; never decreases
    generation: Generation,
}

impl ActiveConversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.selection.thread_id()
    }

    pub fn status(&self) -> Option<LoadStatus> {
        self.selection.status()
    }

    pub fn activation(&self) -> Option<Generation> {
        match self.selection {
            Selection::Active { activation, .. } => Some(activation),
            Selection::Idle => None,
        }
    }

    fn next_generation(&mut self) -> Generation {
        self.generation += 1;
        self.generation
    }

    /// Open `thread_id` and return the token for its history fetch.
    ///
    /// Returns `None` when the thread is already active; the caller should
    /// treat that as a no-op and keep the running activation.
    pub fn select(&mut self, thread_id: &str) -> Option<Generation> {
        if self.selection.is_active(thread_id) {
            debug!(thread_id, "thread already active");
            return None;
        }

        let token = self.next_generation();
        debug!(thread_id, token, "selecting thread");
        self.selection = Selection::Active {
            thread_id: thread_id.to_string(),
            token,
            activation: token,
            status: LoadStatus::Pending,
        };
        Some(token)
    }

    /// Start another fetch for the active thread.
    ///
    /// A ready thread stays ready while the refresh runs; a failed one goes
    /// back to pending. Returns `None` if `thread_id` is not active.
    pub fn reload(&mut self, thread_id: &str) -> Option<Generation> {
        if !self.selection.is_active(thread_id) {
            return None;
        }

        let next = self.next_generation();
        if let Selection::Active { token, status, .. } = &mut self.selection {
            *token = next;
            if *status == LoadStatus::Failed {
                *status = LoadStatus::Pending;
            }
        }
        debug!(thread_id, token = next, "reloading thread");
        Some(next)
    }

    /// Back to idle. Any fetch still in flight becomes stale.
    pub fn close(&mut self) {
        if let Some(thread_id) = self.thread_id() {
            debug!(thread_id, "closing thread");
        }
        self.selection = Selection::Idle;
    }

    pub fn is_current(&self, thread_id: &str, token: Generation) -> bool {
        matches!(
            &self.selection,
            Selection::Active { thread_id: id, token: current, .. }
                if id == thread_id && *current == token
        )
    }

    /// Record the end of a history fetch.
    ///
    /// A failure only moves a pending thread to `Failed`; a thread that is
    /// already showing history keeps it.
    pub fn complete_load(
        &mut self,
        thread_id: &str,
        token: Generation,
        succeeded: bool,
    ) -> LoadOutcome {
        if !self.is_current(thread_id, token) {
            return LoadOutcome::Stale;
        }

        if let Selection::Active { status, .. } = &mut self.selection {
            let next = match (succeeded, *status) {
                (true, _) => LoadStatus::Ready,
                (false, LoadStatus::Ready) => LoadStatus::Ready,
                (false, _) => LoadStatus::Failed,
            };
            *status = next;
            debug!(thread_id, token, status = ?next, "history fetch finished");
        }
        LoadOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_mints_increasing_tokens() {
        let mut active = ActiveConversation::new();
        let a = active.select("a").unwrap();
        let b = active.select("b").unwrap();
        assert!(b > a);
        assert_eq!(active.thread_id(), Some("b"));
        assert_eq!(active.status(), Some(LoadStatus::Pending));
    }

    #[test]
    fn test_reselect_is_noop() {
        let mut active = ActiveConversation::new();
        let token = active.select("a").unwrap();
        assert_eq!(active.select("a"), None);
        assert!(active.is_current("a", token));
    }

    #[test]
    fn test_superseded_result_is_stale() {
        let mut active = ActiveConversation::new();
        let a = active.select("a").unwrap();
        let b = active.select("b").unwrap();

        assert_eq!(active.complete_load("a", a, true), LoadOutcome::Stale);
        assert_eq!(active.status(), Some(LoadStatus::Pending));
        assert_eq!(active.complete_load("b", b, true), LoadOutcome::Applied);
        assert_eq!(active.status(), Some(LoadStatus::Ready));
    }

    #[test]
    fn test_returning_to_a_thread_does_not_revive_old_token() {
        let mut active = ActiveConversation::new();
        let first = active.select("a").unwrap();
        active.select("b");
        let second = active.select("a").unwrap();

        assert_ne!(first, second);
        assert_eq!(active.complete_load("a", first, true), LoadOutcome::Stale);
        assert_eq!(active.complete_load("a", second, true), LoadOutcome::Applied);
    }

    #[test]
    fn test_failure_moves_pending_to_failed() {
        let mut active = ActiveConversation::new();
        let token = active.select("a").unwrap();
        assert_eq!(active.complete_load("a", token, false), LoadOutcome::Applied);
        assert_eq!(active.status(), Some(LoadStatus::Failed));
    }

    #[test]
    fn test_reload_keeps_ready_status() {
        let mut active = ActiveConversation::new();
        let token = active.select("a").unwrap();
        active.complete_load("a", token, true);
        let activation = active.activation();

        let reload = active.reload("a").unwrap();
        assert_eq!(active.status(), Some(LoadStatus::Ready));
        assert_eq!(active.activation(), activation);
        assert!(!active.is_current("a", token));

        assert_eq!(active.complete_load("a", reload, false), LoadOutcome::Applied);
        assert_eq!(active.status(), Some(LoadStatus::Ready));
    }

    #[test]
    fn test_reload_after_failure_goes_pending() {
        let mut active = ActiveConversation::new();
        let token = active.select("a").unwrap();
        active.complete_load("a", token, false);
        active.reload("a").unwrap();
        assert_eq!(active.status(), Some(LoadStatus::Pending));
    }

    #[test]
    fn test_reload_inactive_thread() {
        let mut active = ActiveConversation::new();
        assert_eq!(active.reload("a"), None);
        active.select("a");
        assert_eq!(active.reload("b"), None);
    }

    #[test]
    fn test_close_makes_everything_stale() {
        let mut active = ActiveConversation::new();
        let token = active.select("a").unwrap();
        active.close();
        assert_eq!(active.selection(), &Selection::Idle);
        assert_eq!(active.complete_load("a", token, true), LoadOutcome::Stale);

        let again = active.select("a").unwrap();
        assert!(again > token);
    }
}
