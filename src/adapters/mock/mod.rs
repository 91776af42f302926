//! Test doubles for the trait abstractions.
//!
//! - [`MockHttpClient`] - canned HTTP responses with request recording
//! - [`MockConversationStore`] - in-memory conversation service with
//!   scripted failures and gated responses

pub mod http;
pub mod store;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use store::{Gate, MockConversationStore, StoreCall};
