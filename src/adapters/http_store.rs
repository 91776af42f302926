//! REST binding of [`ConversationStore`].
//!
//! Endpoints, relative to the configured base URL:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `get_conversations` | `GET /conversations` |
//! | `get_messages` | `GET /conversations/{id}/messages` |
//! | `send_message` | `POST /conversations/{id}/messages` `{"content": ...}` |
//! | `mark_as_read` | `POST /conversations/{id}/read` `{}` |
//!
//! List endpoints may answer with a bare JSON array or with the array wrapped
//! in `{"conversations": [...]}` / `{"messages": [...]}`.

use async_trait::async_trait;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::config::DrawerConfig;
use crate::error::RemoteError;
use crate::models::{ConversationSummary, ServerMessage};
use crate::traits::{ConversationStore, Headers, HttpClient, HttpError, Response};

#[derive(Deserialize)]
#[serde(untagged)]
enum ConversationList {
    Bare(Vec<ConversationSummary>),
    Wrapped { conversations: Vec<ConversationSummary> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MessageList {
    Bare(Vec<ServerMessage>),
    Wrapped { messages: Vec<ServerMessage> },
}

/// Conversation store speaking JSON over an injected [`HttpClient`].
#[derive(Debug, Clone)]
pub struct HttpConversationStore<C> {
    client: C,
    base_url: String,
    auth_token: Option<String>,
    /// Reported in timeout errors; the transport applies the limit itself.
    timeout: Duration,
}

impl<C: HttpClient> HttpConversationStore<C> {
    pub fn new(client: C, config: &DrawerConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
            timeout: config.request_timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self, with_body: bool) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if with_body {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(ref token) = self.auth_token {
            headers.insert("Authorization".to_string(), format!("Bearer {}", token));
        }
        headers
    }

    fn conversation_url(&self, thread_id: &str, suffix: &str) -> String {
        format!(
            "{}/conversations/{}/{}",
            self.base_url,
            urlencoding::encode(thread_id),
            suffix
        )
    }

    fn remote_error(&self, operation: &str, err: HttpError) -> RemoteError {
        match err {
            HttpError::Timeout(_) => RemoteError::Timeout {
                operation: operation.to_string(),
                secs: self.timeout.as_secs(),
            },
            other => other.into(),
        }
    }

    /// Await one request and reject non-2xx answers. Timeouts are enforced
    /// by the transport.
    async fn request<F>(&self, operation: &str, request: F) -> Result<Response, RemoteError>
    where
        F: Future<Output = Result<Response, HttpError>>,
    {
        let response = request
            .await
            .and_then(Response::error_for_status)
            .map_err(|e| self.remote_error(operation, e))?;

        debug!(operation, status = response.status, "conversation service responded");
        Ok(response)
    }
}

#[async_trait]
impl<C: HttpClient> ConversationStore for HttpConversationStore<C> {
    async fn get_conversations(&self) -> Result<Vec<ConversationSummary>, RemoteError> {
        let url = format!("{}/conversations", self.base_url);
        let headers = self.headers(false);
        let response = self
            .request("get_conversations", self.client.get(&url, &headers))
            .await?;

        Ok(match response.json::<ConversationList>()? {
            ConversationList::Bare(list) => list,
            ConversationList::Wrapped { conversations } => conversations,
        })
    }

    async fn get_messages(&self, thread_id: &str) -> Result<Vec<ServerMessage>, RemoteError> {
        let url = self.conversation_url(thread_id, "messages");
        let headers = self.headers(false);
        let response = self
            .request("get_messages", self.client.get(&url, &headers))
            .await?;

        Ok(match response.json::<MessageList>()? {
            MessageList::Bare(list) => list,
            MessageList::Wrapped { messages } => messages,
        })
    }

    async fn send_message(&self, thread_id: &str, text: &str) -> Result<(), RemoteError> {
        let url = self.conversation_url(thread_id, "messages");
        let headers = self.headers(true);
        let body = serde_json::json!({ "content": text }).to_string();
        self.request("send_message", self.client.post(&url, &body, &headers))
            .await?;
        Ok(())
    }

    async fn mark_as_read(&self, thread_id: &str) -> Result<(), RemoteError> {
        let url = self.conversation_url(thread_id, "read");
        let headers = self.headers(true);
        self.request("mark_as_read", self.client.post(&url, "{}", &headers))
            .await?;
        Ok(())
    }
}
