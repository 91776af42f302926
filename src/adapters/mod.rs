//! Concrete implementations of the traits in `crate::traits`.
//!
//! - [`ReqwestHttpClient`] - HTTP transport using reqwest
//! - [`HttpConversationStore`] - REST binding of the conversation store
//! - [`StaticSession`] - session with a fixed user id
//!
//! The [`mock`] submodule provides test doubles.

pub mod http_store;
pub mod mock;
pub mod reqwest_http;
pub mod static_session;

pub use http_store::HttpConversationStore;
pub use mock::{MockConversationStore, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
pub use static_session::StaticSession;
