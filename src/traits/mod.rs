//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP transport (GET, POST)
//! - [`ConversationStore`] - the remote conversation/message store
//! - [`SessionProvider`] - current user identity

pub mod http;
pub mod session;
pub mod store;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use session::SessionProvider;
pub use store::ConversationStore;
