//! Session identity abstraction.
//!
//! The authentication layer lives outside this crate. The drawer only needs
//! the current user's id, and only to decide message authorship.

/// Supplies the signed-in user's id.
pub trait SessionProvider: Send + Sync {
    fn current_user_id(&self) -> &str;
}
